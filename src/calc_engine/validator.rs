use std::sync::Arc;

use log::debug;

use super::error::ValidationError;
use super::number::is_valid_number;
use super::operators::OperatorTable;

/// Single-pass syntax check run ahead of the parsers.
///
/// The scan tracks the open scope depth, the last significant character and
/// the literal being read. Spaces end a literal but are otherwise invisible:
/// they never become the previous character.
pub struct Validator {
    operators: Arc<OperatorTable>,
}

impl Validator {
    pub fn new(operators: Arc<OperatorTable>) -> Self {
        Validator { operators }
    }

    /// Returns the first problem found, or `None` if the input may be parsed.
    pub fn validate(&self, input: &str) -> Option<ValidationError> {
        let result = self.scan(input).err();
        if let Some(err) = result {
            debug!("validation of {:?} failed: {:?}", input, err);
        }
        result
    }

    fn scan(&self, input: &str) -> Result<(), ValidationError> {
        let mut depth = 0usize;
        let mut prev: Option<char> = None;
        let mut current = String::new();

        for c in input.chars() {
            match c {
                ' ' => {
                    flush(&mut current)?;
                    continue;
                }
                '(' => {
                    if !current.is_empty() || ends_operand(prev) {
                        return Err(ValidationError::UnexpectedSubexpression);
                    }
                    depth += 1;
                }
                ')' => {
                    if self.operators.contains(prev)
                        || matches!(prev, Some('.') | Some('('))
                        || depth == 0
                    {
                        return Err(ValidationError::UnexpectedSubexpressionTermination);
                    }
                    flush(&mut current)?;
                    depth -= 1;
                }
                c if self.operators.contains(Some(c)) => {
                    // Every scope opens like a whole expression: only a sign may lead.
                    if c != '-' && matches!(prev, None | Some('(')) {
                        return Err(ValidationError::UnexpectedOperator);
                    }
                    if self.operators.contains(prev) {
                        if !current.is_empty() || c != '-' || prev == Some('-') {
                            return Err(ValidationError::UnexpectedOperator);
                        }
                        current.push('-');
                    } else {
                        flush(&mut current)?;
                    }
                }
                '0'..='9' | '.' => {
                    // A space only splits a literal, but nothing may follow a closed scope.
                    if current.is_empty() && prev == Some(')') {
                        return Err(ValidationError::MissingOperator);
                    }
                    current.push(c);
                }
                _ => return Err(ValidationError::InvalidSymbol),
            }
            prev = Some(c);
        }

        flush(&mut current)?;
        if prev.is_none() || self.operators.contains(prev) || depth != 0 {
            return Err(ValidationError::UnexpectedTermination);
        }
        Ok(())
    }
}

fn ends_operand(prev: Option<char>) -> bool {
    matches!(prev, Some(p) if p.is_ascii_digit() || p == '.' || p == ')')
}

fn flush(current: &mut String) -> Result<(), ValidationError> {
    if !current.is_empty() && !is_valid_number(current) {
        return Err(ValidationError::InvalidConstant);
    }
    current.clear();
    Ok(())
}
