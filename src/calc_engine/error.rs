use thiserror::Error;

/// Problems found by the syntax validator before any parsing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An operator is duplicated or placed where no operand precedes it.
    #[error("Unexpected operator!")]
    UnexpectedOperator,

    /// A character that is neither a digit, a decimal point, an operator,
    /// a parenthesis nor a space.
    #[error("Invalid symbol!")]
    InvalidSymbol,

    /// The expression stops while a scope is still open or right after an operator.
    #[error("Expression ended unexpectedly!")]
    UnexpectedTermination,

    /// A literal that does not match `[-]<digits>[.<digits>]`.
    #[error("Invalid numeric constant!")]
    InvalidConstant,

    /// A constant directly followed by `(`. Implicit multiplication is not supported.
    #[error("Unexpected subexpression!")]
    UnexpectedSubexpression,

    /// `)` after an operator, a decimal point or `(`, or one that closes
    /// more scopes than were opened.
    #[error("Subexpression terminated unexpectedly!")]
    UnexpectedSubexpressionTermination,

    /// A literal directly after a closed scope, such as `(2)3`.
    #[error("Missing operator between operands!")]
    MissingOperator,
}

/// Problems found while turning text into a [`Node`](super::Node) tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown operation detected!")]
    InvalidOperation,

    #[error("Malformed expression!")]
    MalformedExpression,

    #[error("No expression provided!")]
    EmptyExpression,

    /// A parenthesized part evaluated to infinity or NaN, which has no literal form.
    #[error("Subexpression has no finite value!")]
    UndefinedSubexpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    pub fn custom(message: impl Into<String>) -> Self {
        AppError::Custom(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(ValidationError::UnexpectedOperator.to_string(), "Unexpected operator!");
        assert_eq!(
            ValidationError::UnexpectedSubexpressionTermination.to_string(),
            "Subexpression terminated unexpectedly!"
        );
        assert_eq!(ParseError::EmptyExpression.to_string(), "No expression provided!");
    }

    #[test]
    fn app_error_keeps_inner_message() {
        let err: AppError = ParseError::MalformedExpression.into();
        assert_eq!(err, AppError::Parse(ParseError::MalformedExpression));
        assert_eq!(err.to_string(), "Malformed expression!");

        let err: AppError = ValidationError::InvalidSymbol.into();
        assert_eq!(err.to_string(), "Invalid symbol!");

        assert_eq!(AppError::custom("Invalid request!").to_string(), "Invalid request!");
    }
}
