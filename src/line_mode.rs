use std::io::{Write, stdin, stdout};

use anyhow::{Context, Result};
use termion::{
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
    cursor::{Goto, DetectCursorPos},
    clear::CurrentLine as ClearLine,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::calc_engine::Calculator;
use crate::config::Config;
use crate::session::{self, Command};

const PROMPT: &str = "Expression: ";

// Функция для преобразования позиции символа в байтовую позицию
fn char_index_to_byte_index(s: &str, index: usize) -> usize {
    s.grapheme_indices(true)
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn remove_grapheme(s: &mut String, index: usize) {
    let start = char_index_to_byte_index(s, index);
    let end = char_index_to_byte_index(s, index + 1);
    if start < end {
        s.drain(start..end);
    }
}

pub fn run_line(calculator: Calculator, config: &Config) -> Result<()> {
    println!("exprcalc line mode");
    println!("Supports: +, -, *, /, ^ and parentheses");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Special commands: 'quit' to exit, 'clear' to reset history");
    println!("\rAdd 'details' before expression for step-by-step evaluation\n");

    let mut stdout = stdout().into_raw_mode().context("failed to enter raw mode")?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0;  // позиция курсора в графемах
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;

            let prefix: String = expression.graphemes(true).take(cursor_pos).collect();
            let column = 1 + PROMPT.len() + prefix.width();
            write!(stdout, "{}", Goto(column as u16, initial_y))?;
            stdout.flush()?;

            let key = match keys.next() {
                Some(key) => key?,
                None => return Ok(()),
            };
            let len = expression.graphemes(true).count();

            match key {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    write!(stdout, "\r\n")?;
                    return Ok(());
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos = (cursor_pos + 1).min(expression.graphemes(true).count());
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_grapheme(&mut expression, cursor_pos);
                }
                Key::Delete if cursor_pos < len => remove_grapheme(&mut expression, cursor_pos),
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < len => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = len,
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.graphemes(true).count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.graphemes(true).count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let (expression, detailed) = match Command::parse(&expression) {
            None => {
                write!(stdout, "\r\n")?;
                continue;
            }
            Some(Command::Quit) => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                return Ok(());
            }
            Some(Command::Clear) => {
                history.clear();
                history_index = 0;
                write!(stdout, "\r\nHistory cleared\r\n\n")?;
                continue;
            }
            Some(Command::Help) => {
                write!(stdout, "\r\n  Operators: {}\r\n\n", calculator.operators())?;
                continue;
            }
            Some(Command::Evaluate { expression, detailed }) => (expression.to_string(), detailed),
        };

        let evaluation = session::evaluate(&calculator, &expression, detailed, config.max_input_len);
        history.push(expression.clone());
        history_index = history.len();

        match &evaluation.result {
            Ok(answer) => {
                write!(stdout, "\r\n  {} = {}\r\n", expression, answer.result)?;

                if detailed {
                    write!(stdout, "\r\n  Tree: {}\r\n", answer.tree)?;
                    write!(stdout, "\r\n  Step-by-step evaluation:\r\n")?;
                    for (i, step) in evaluation.detailed_steps.iter().enumerate() {
                        write!(stdout, "\r  Step {}: {} = {}\r\n", i + 1, step.operation, step.result)?;
                    }
                    write!(
                        stdout,
                        "\r  Time: {:.6} ms\r\n",
                        evaluation.duration.as_secs_f64() * 1000.0
                    )?;
                }
                write!(stdout, "\r\n")?;
            }
            Err(e) => {
                write!(stdout, "\r\n  {} = Error: {}\r\n\n", expression, e)?;
            }
        }
    }
}
