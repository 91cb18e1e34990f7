use std::sync::Arc;

use log::trace;

use super::error::ParseError;
use super::node::Node;
use super::number::parse_number;
use super::operators::OperatorTable;
use super::Parse;

/// Precedence-climbing parser for expressions without parentheses.
///
/// Each level splits on its right-most operator, so the loosest operators end
/// up at the root and operators of equal precedence group to the left.
pub struct FlatParser {
    operators: Arc<OperatorTable>,
}

impl FlatParser {
    pub fn new(operators: Arc<OperatorTable>) -> Self {
        FlatParser { operators }
    }

    fn build(&self, value: &str, precedence: u32) -> Result<Node, ParseError> {
        if value.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let trimmed = value.trim();
        let first = trimmed.chars().next();
        let last = trimmed.chars().next_back();
        if (self.operators.contains(first) && first != Some('-')) || self.operators.contains(last) {
            return Err(ParseError::MalformedExpression);
        }

        if value.chars().any(|c| {
            !c.is_ascii_digit() && c != '.' && !c.is_whitespace() && !self.operators.contains(Some(c))
        }) {
            return Err(ParseError::InvalidOperation);
        }

        if let Some(v) = parse_number(trimmed) {
            return Ok(Node::Constant(v));
        }

        let max = self.operators.max_precedence().unwrap_or(0);
        if precedence > max {
            return Err(ParseError::MalformedExpression);
        }

        let chars: Vec<(usize, char)> = value.char_indices().collect();
        let split = (0..chars.len()).rev().find(|&i| {
            self.operators.precedence_of(chars[i].1) == Some(precedence)
                && !self.is_sign(&chars, i)
        });

        let Some(i) = split else {
            return self.build(value, precedence + 1);
        };

        let (index, op) = chars[i];
        let construct = self
            .operators
            .constructor_for(op)
            .ok_or(ParseError::InvalidOperation)?;

        let left = self.build(&value[..index], precedence);
        let right = self.build(&value[index + op.len_utf8()..], precedence);
        match (left, right) {
            (Ok(l), Ok(r)) => {
                trace!("split {:?} at {:?}", value, op);
                Ok(construct(l, r))
            }
            _ => Err(ParseError::MalformedExpression),
        }
    }

    /// A `-` right before a digit is a sign, not a subtraction, when nothing
    /// but another operator (or the start of input) precedes it.
    fn is_sign(&self, chars: &[(usize, char)], i: usize) -> bool {
        if chars[i].1 != '-' {
            return false;
        }
        let next_is_digit = chars.get(i + 1).map_or(false, |(_, c)| c.is_ascii_digit());
        let before = chars[..i]
            .iter()
            .rev()
            .map(|(_, c)| *c)
            .find(|c| !c.is_whitespace());
        next_is_digit && (before.is_none() || self.operators.contains(before))
    }
}

impl Parse for FlatParser {
    fn parse(&self, input: &str) -> Result<Node, ParseError> {
        let value: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        self.build(&value, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FlatParser {
        FlatParser::new(Arc::new(OperatorTable::arithmetic()))
    }

    fn eval(input: &str) -> f64 {
        parser().parse(input).unwrap().evaluate()
    }

    #[test]
    fn test_constants() {
        assert_eq!(parser().parse("42").unwrap(), Node::Constant(42.0));
        assert_eq!(parser().parse(" -3.5 ").unwrap(), Node::Constant(-3.5));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("10 - 6 / 2 ^ 5 + 3"), 12.8125);
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("2 * 3 ^ 2"), 18.0);
    }

    #[test]
    fn test_left_associativity() {
        let tree = parser().parse("1 - 2 + 3").unwrap();
        assert_eq!(tree.display(), "((1.00 - 2.00) + 3.00)");
        assert_eq!(tree.evaluate(), 2.0);
        assert_eq!(eval("16 / 4 / 2"), 2.0);
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(eval("-2 + 5"), 3.0);
        assert_eq!(eval("2 + -5"), -3.0);
        assert_eq!(eval("3 - 2"), 1.0);
        assert_eq!(eval("3-2"), 1.0);
        assert_eq!(eval("3--2"), 5.0);
        assert_eq!(eval("5/-2*17*10"), -425.0);
        assert_eq!(eval("2^-1"), 0.5);
        assert_eq!(eval("1--2^2"), -3.0);
    }

    #[test]
    fn test_whitespace_inside_constants() {
        assert_eq!(eval("2. 000"), 2.0);
        assert_eq!(eval("2 .000"), 2.0);
        assert_eq!(eval("2 . 000"), 2.0);
        assert_eq!(eval("2.0  00"), 2.0);
        assert_eq!(eval("223 4.000"), 2234.0);
    }

    #[test]
    fn test_division() {
        assert_eq!(eval("-2 / -5"), 0.4);
        assert_eq!(eval("2 / 2 / 0"), f64::INFINITY);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parser().parse(""), Err(ParseError::EmptyExpression));
        assert_eq!(parser().parse("   "), Err(ParseError::EmptyExpression));
        assert_eq!(parser().parse("* 2"), Err(ParseError::MalformedExpression));
        assert_eq!(parser().parse("2 +"), Err(ParseError::MalformedExpression));
        assert_eq!(parser().parse("2 + x"), Err(ParseError::InvalidOperation));
        assert_eq!(parser().parse("(2)"), Err(ParseError::InvalidOperation));
        assert_eq!(parser().parse("2 +* 3"), Err(ParseError::MalformedExpression));
        assert_eq!(parser().parse("1.2.3"), Err(ParseError::MalformedExpression));
    }
}
