pub mod error;
pub mod flat_parser;
pub mod node;
pub mod number;
pub mod operators;
pub mod scope_parser;
pub mod validator;

use std::sync::Arc;

use log::debug;

pub use error::{AppError, ParseError, ValidationError};
pub use flat_parser::FlatParser;
pub use node::{EvaluationTrace, Node, Step};
pub use number::{is_valid_number, parse_number};
pub use operators::{NodeConstructor, OperatorEntry, OperatorTable};
pub use scope_parser::ScopeParser;
pub use validator::Validator;

/// Turns text into an expression tree.
pub trait Parse {
    fn parse(&self, input: &str) -> Result<Node, ParseError>;
}

/// Result of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The input with all whitespace removed.
    pub equation: String,
    /// The parsed tree in its printed form.
    pub tree: String,
    pub result: f64,
}

/// The whole pipeline: validate, parse, evaluate.
pub struct Calculator {
    operators: Arc<OperatorTable>,
    validator: Validator,
    parser: ScopeParser,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(Arc::new(OperatorTable::arithmetic()))
    }
}

impl Calculator {
    pub fn new(operators: Arc<OperatorTable>) -> Self {
        Calculator {
            validator: Validator::new(operators.clone()),
            parser: ScopeParser::new(operators.clone()),
            operators,
        }
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn validate(&self, input: &str) -> Option<ValidationError> {
        self.validator.validate(input)
    }

    pub fn parse(&self, input: &str) -> Result<Node, AppError> {
        if let Some(err) = self.validator.validate(input) {
            return Err(err.into());
        }
        let tree = self.parser.parse(input)?;
        debug!("parsed {:?} into {}", input, tree);
        Ok(tree)
    }

    pub fn calculate(&self, input: &str) -> Result<Answer, AppError> {
        let mut trace = EvaluationTrace::new(false);
        self.calculate_traced(input, &mut trace)
    }

    pub fn calculate_traced(
        &self,
        input: &str,
        trace: &mut EvaluationTrace,
    ) -> Result<Answer, AppError> {
        let tree = self.parse(input)?;
        let result = tree.evaluate_traced(trace);
        debug!("evaluated {:?} to {}", input, result);

        Ok(Answer {
            equation: input.chars().filter(|c| !c.is_whitespace()).collect(),
            tree: tree.display(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate() {
        let calc = Calculator::default();
        let answer = calc.calculate("10 - 6 / 2 ^ 5 + 3").unwrap();
        assert_eq!(answer.equation, "10-6/2^5+3");
        assert_eq!(answer.tree, "((10.00 - (6.00 / (2.00 ^ 5.00))) + 3.00)");
        assert_eq!(answer.result, 12.8125);
    }

    #[test]
    fn test_validation_runs_first() {
        let calc = Calculator::default();
        assert_eq!(
            calc.calculate("2(100)"),
            Err(AppError::Validation(ValidationError::UnexpectedSubexpression))
        );
        assert_eq!(
            calc.calculate("(1 / 0) * 2"),
            Err(AppError::Parse(ParseError::UndefinedSubexpression))
        );
    }

    #[test]
    fn test_traced_calculation() {
        let calc = Calculator::default();
        let mut trace = EvaluationTrace::new(true);
        let answer = calc.calculate_traced("2 * 3 + 4", &mut trace).unwrap();
        assert_eq!(answer.result, 10.0);
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].operation, "2 * 3");
        assert_eq!(trace.steps[1].operation, "6 + 4");
    }
}
