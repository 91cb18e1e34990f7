use super::app::App;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;
use super::helpers::{format_number, format_with_spaces, highlight_expression, wrap_text};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app.help_scroll, app.calculator.operators());
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.insert_char(c);
        }
        KeyCode::Backspace => app.delete_backward(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_cursor_by_words(-1);
        }
        KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_cursor_by_words(1);
        }
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => {
            app.cursor_position = 0;
            app.input_scroll = 0;
        }
        KeyCode::End => {
            app.cursor_position = app.input_len();
        }
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    let scroll = if app.show_help { &mut app.help_scroll } else { &mut app.history_scroll };
    match event.kind {
        MouseEventKind::ScrollDown => *scroll = scroll.saturating_add(3),
        MouseEventKind::ScrollUp => *scroll = scroll.saturating_sub(3),
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    if area.width < MIN_TERMINAL_WIDTH || area.height < MIN_TERMINAL_HEIGHT {
        let notice = Paragraph::new(format!(
            "Need at least {}x{}, have {}x{}",
            MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
        ))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
        frame.render_widget(notice, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_history(frame, app, layout[2]);
    app.list_height = layout[2].height as usize;
}

/// Detail lines under an entry, each wrapped and indented below a "- " bullet.
fn push_detail(items: &mut Vec<ListItem<'static>>, text: &str, wrap_width: usize, style: Style) {
    for (idx, line) in wrap_text(text, wrap_width).into_iter().enumerate() {
        let prefix = if idx == 0 { "    - " } else { "      " };
        items.push(ListItem::new(Line::from(Span::styled(format!("{}{}", prefix, line), style))));
    }
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty_msg = Paragraph::new("No calculations yet. Enter an expression to see results here.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let mut items = Vec::new();
    app.item_start_indices.clear();

    let wrap_width = inner_area.width.saturating_sub(6) as usize;
    let operators = app.calculator.operators();

    for (i, entry) in app.history.iter().enumerate() {
        app.item_start_indices.push(items.len());

        let is_selected = i == app.cursor_history;
        let base_style = Style::default()
            .fg(if is_selected { Color::Yellow } else { Color::Cyan });

        let input = format_with_spaces(&entry.input, operators);
        let input_lines = wrap_text(&input, wrap_width);

        for (line_idx, line) in input_lines.into_iter().enumerate() {
            let mut result_spans = vec![];

            if line_idx == 0 {
                result_spans.push(Span::styled("> ", Style::default().fg(Color::Green)));
            } else {
                result_spans.push(Span::styled("  ", Style::default()));
            }

            result_spans.extend(highlight_expression(&line, operators, base_style));

            if line_idx == 0 {
                result_spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
                match &entry.result {
                    Ok(answer) => {
                        result_spans.push(Span::styled(
                            format_number(answer.result),
                            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
                        ));
                    }
                    Err(e) => {
                        result_spans.push(Span::styled(
                            format!("Error: {}", e),
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                        ));
                    }
                }
            }

            items.push(ListItem::new(Line::from(result_spans)));
        }

        if entry.detailed_mode {
            if let Ok(answer) = &entry.result {
                push_detail(
                    &mut items,
                    &format!("Tree: {}", answer.tree),
                    wrap_width,
                    Style::default().fg(Color::Blue),
                );
            }

            for (j, step) in entry.detailed_steps.iter().enumerate() {
                let step_text = format!(
                    "Step {}: {} = {}",
                    j + 1,
                    format_with_spaces(&step.operation, operators),
                    format_number(step.result)
                );
                push_detail(&mut items, &step_text, wrap_width, Style::default().fg(Color::DarkGray));
            }

            let time_str = format!("Time: {:.6} ms", entry.duration.as_secs_f64() * 1000.0);
            push_detail(&mut items, &time_str, wrap_width, Style::default().fg(Color::Magenta));
        }

        if i < app.history.len() - 1 {
            let separator = Span::styled(
                "-".repeat(inner_area.width as usize),
                Style::default().fg(Color::DarkGray)
            );
            items.push(ListItem::new(Line::from(separator)));
        }
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner_area.height as usize);
        app.scroll_to_bottom = false;
    }
    app.history_scroll = app.history_scroll.min(items.len().saturating_sub(1));

    let selected_index = app.item_start_indices.get(app.cursor_history).copied();

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default()
        .with_selected(selected_index)
        .with_offset(app.history_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}

/// One line under the input: operator table, input length against the cap,
/// and the keys for help and quitting.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let len = app.input_len();
    let len_style = if len > app.max_input_len { Style::default().fg(Color::Red) } else { dim };

    let spans = vec![
        Span::styled(app.calculator.operators().to_string(), dim),
        Span::styled(format!("  {}/{}  ", len, app.max_input_len), len_style),
        Span::styled("F1", key),
        Span::styled(" help  ", dim),
        Span::styled("Ctrl+C", key),
        Span::styled(" quit", dim),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let over_limit = app.input_len() > app.max_input_len;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if over_limit { Color::Red } else { Color::DarkGray }))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(3)) as usize;
    let total = app.input_len();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app.input
        .graphemes(true)
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    let paragraph = Paragraph::new(format!("> {}", visible_input));
    frame.render_widget(paragraph, inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix: String = visible_input.graphemes(true).take(visible_cursor).collect();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    frame.set_cursor(cursor_x, inner_area.y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}
