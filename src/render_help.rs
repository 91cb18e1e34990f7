use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::calc_engine::OperatorTable;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)))
}

pub fn render_help(frame: &mut Frame, help_scroll: usize, operators: &OperatorTable) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" exprcalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let mut help_text = vec![
        Line::from(Span::styled("exprcalc - Terminal Expression Calculator", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        heading("Operators:"),
        Line::from("  + : Addition        (e.g., 5 + 3 = 8)"),
        Line::from("  - : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  * : Multiplication  (e.g., 6 * 7 = 42)"),
        Line::from("  / : Division        (e.g., 15 / 3 = 5, 1 / 0 = inf)"),
        Line::from("  ^ : Exponentiation  (e.g., 2 ^ 3 = 8)"),
        Line::from(format!("  Precedence levels: {}", operators)),
        Line::from(""),
        heading("Syntax:"),
        Line::from("  Numbers: 12, -3, 0.5, .25"),
        Line::from("  A minus directly before a number is a sign: 3 * -2"),
        Line::from("  Parentheses group: (3 - 5) / 4"),
        Line::from("  Every operand needs an operator: 2(3) and (2)3 are errors"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <expression> : Show the tree, each step and the time"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  help : Show this help screen"),
        Line::from("  quit : Exit the calculator"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Esc : Close this screen"),
        Line::from(""),
        heading("Examples:"),
    ];
    help_text.extend(
        ["10 - 6 / 2 ^ 5 + 3", "(3 - 5) / 4 + (10 - 2)", "details 5/(2-4)*(10+(10-3))*10", "2 ^ -1"]
            .into_iter()
            .map(|example| Line::from(format!("  {}", example))),
    );

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
