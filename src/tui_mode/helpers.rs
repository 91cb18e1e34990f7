use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::calc_engine::OperatorTable;

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            let mut chunk = String::new();
            let mut chunk_width = 0;
            for c in word.chars() {
                let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                if chunk_width + char_width > width && !chunk.is_empty() {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(c);
                chunk_width += char_width;
            }
            current_line = chunk;
            current_width = chunk_width;
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        x.to_string()
    } else if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Puts single spaces around binary operators, leaving a sign glued to its number.
pub fn format_with_spaces(expr: &str, operators: &OperatorTable) -> String {
    let mut result = String::new();
    let mut last: Option<char> = None;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        let is_sign = c == '-' && (last.is_none() || last == Some('(') || operators.contains(last));
        if operators.contains(Some(c)) && !is_sign {
            result.push(' ');
            result.push(c);
            result.push(' ');
        } else {
            result.push(c);
        }
        last = Some(c);
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn highlight_expression(
    expr: &str,
    operators: &OperatorTable,
    base_style: Style,
) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default()
        .fg(Color::LightGreen);

    let invalid_style = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::UNDERLINED);

    let mut spans = Vec::new();
    let mut number = String::new();

    for c in expr.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        if !number.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut number), number_style));
        }

        let style = match c {
            _ if operators.contains(Some(c)) => operator_style,
            '(' | ')' => base_style,
            ' ' => Style::default(),
            _ => invalid_style,
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    if !number.is_empty() {
        spans.push(Span::styled(number, number_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.8125), "12.8125");
        assert_eq!(format_number(-425.0), "-425");
        assert_eq!(format_number(1e12), "1.000000e12");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_with_spaces() {
        let ops = OperatorTable::arithmetic();
        assert_eq!(format_with_spaces("5/(2-4)*-3", &ops), "5 / (2 - 4) * -3");
        assert_eq!(format_with_spaces("-2+  5", &ops), "-2 + 5");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("1 + 2 + 3", 5), vec!["1 + 2", "+ 3"]);
        assert_eq!(wrap_text("123456", 4), vec!["1234", "56"]);
        assert_eq!(wrap_text("anything", 0), vec![""]);
    }

    #[test]
    fn test_highlight_groups_numbers() {
        let ops = OperatorTable::arithmetic();
        let spans = highlight_expression("12.5 + x", &ops, Style::default());
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["12.5", " ", "+", " ", "x"]);
    }
}
