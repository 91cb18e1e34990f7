use std::time::{Duration, Instant};

use log::debug;

use crate::calc_engine::{Answer, AppError, Calculator, EvaluationTrace, Step};

/// What a line typed into one of the interactive modes asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Clear,
    Help,
    Evaluate { expression: &'a str, detailed: bool },
}

impl<'a> Command<'a> {
    /// Returns `None` for blank input.
    ///
    /// `details` as a leading or trailing word turns on step-by-step output.
    pub fn parse(input: &'a str) -> Option<Command<'a>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Some(Command::Quit),
            "clear" | "reset" => return Some(Command::Clear),
            "help" => return Some(Command::Help),
            _ => {}
        }

        let command = if let Some(rest) = strip_prefix_ignore_case(input, "details ") {
            Command::Evaluate { expression: rest.trim(), detailed: true }
        } else if let Some(rest) = strip_suffix_ignore_case(input, " details") {
            Command::Evaluate { expression: rest.trim(), detailed: true }
        } else if input.eq_ignore_ascii_case("details") {
            Command::Evaluate { expression: "", detailed: true }
        } else {
            Command::Evaluate { expression: input, detailed: false }
        };
        Some(command)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let start = s.len().checked_sub(suffix.len())?;
    let tail = s.get(start..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..start])
}

/// One evaluated line, as kept in the history of the interactive modes.
pub struct Evaluation {
    pub input: String,
    pub result: Result<Answer, AppError>,
    pub detailed_steps: Vec<Step>,
    pub detailed_mode: bool,
    pub duration: Duration,
}

pub fn evaluate(
    calculator: &Calculator,
    expression: &str,
    detailed_mode: bool,
    max_input_len: usize,
) -> Evaluation {
    let start_time = Instant::now();
    let mut trace = EvaluationTrace::new(detailed_mode);

    let result = if expression.is_empty() {
        Err(AppError::custom("Please enter a valid expression after 'details'"))
    } else if expression.chars().count() > max_input_len {
        Err(AppError::custom(format!(
            "Expression is longer than {} characters!",
            max_input_len
        )))
    } else {
        calculator.calculate_traced(expression, &mut trace)
    };
    let duration = start_time.elapsed();

    if let Err(e) = &result {
        debug!("{:?} rejected: {}", expression, e);
    }

    Evaluation {
        input: expression.to_string(),
        result,
        detailed_steps: trace.steps,
        detailed_mode,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::ValidationError;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("QUIT"), Some(Command::Quit));
        assert_eq!(Command::parse("reset"), Some(Command::Clear));
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(
            Command::parse("1 + 2"),
            Some(Command::Evaluate { expression: "1 + 2", detailed: false })
        );
    }

    #[test]
    fn parses_details_prefix_and_suffix() {
        assert_eq!(
            Command::parse("Details 2 * 3"),
            Some(Command::Evaluate { expression: "2 * 3", detailed: true })
        );
        assert_eq!(
            Command::parse("2 * 3 details"),
            Some(Command::Evaluate { expression: "2 * 3", detailed: true })
        );
        assert_eq!(
            Command::parse("details"),
            Some(Command::Evaluate { expression: "", detailed: true })
        );
    }

    #[test]
    fn evaluation_reports_errors_as_values() {
        let calc = Calculator::default();

        let ok = evaluate(&calc, "(3 - 5) / 4 + (10 - 2)", true, 64);
        assert_eq!(ok.result.as_ref().map(|a| a.result), Ok(7.5));
        assert!(!ok.detailed_steps.is_empty());

        let bad = evaluate(&calc, "2(100)", false, 64);
        assert_eq!(
            bad.result,
            Err(AppError::Validation(ValidationError::UnexpectedSubexpression))
        );

        let long = evaluate(&calc, "1 + 1", false, 3);
        assert!(matches!(long.result, Err(AppError::Custom(_))));

        let empty = evaluate(&calc, "", true, 64);
        assert!(matches!(empty.result, Err(AppError::Custom(_))));
    }
}
