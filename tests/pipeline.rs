use std::sync::Arc;

use exprcalc::calc_engine::{
    AppError, Calculator, Node, OperatorTable, Parse, ParseError, ScopeParser, ValidationError,
    Validator,
};
use pretty_assertions::assert_eq;

fn table() -> Arc<OperatorTable> {
    Arc::new(OperatorTable::arithmetic())
}

fn parse(input: &str) -> Result<Node, ParseError> {
    ScopeParser::new(table()).parse(input)
}

fn validate(input: &str) -> Option<ValidationError> {
    Validator::new(table()).validate(input)
}

#[test]
fn test_precedence() {
    assert_eq!(parse("10 - 6 / 2 ^ 5 + 3").unwrap().evaluate(), 12.8125);
}

#[test]
fn test_parenthesis_flattening() {
    assert_eq!(parse("(3 - 5) / 4 + (10 - 2)").unwrap().evaluate(), 7.5);
    assert_eq!(parse("5/(2-4)*(10+(10-3))*10").unwrap().evaluate(), -425.0);
}

#[test]
fn test_negative_numbers() {
    assert_eq!(parse("-2 + 5").unwrap().evaluate(), 3.0);
    assert_eq!(parse("2 + -5").unwrap().evaluate(), -3.0);
    assert!(validate("--0").is_some());
    assert!(validate("10 + - 5").is_some());
}

#[test]
fn test_malformed_input() {
    for input in ["()", "2(100)", "3.0.0", ")))((("] {
        assert!(validate(input).is_some(), "{:?} should be rejected", input);
    }
    assert_eq!(parse(""), Err(ParseError::EmptyExpression));
    assert_eq!(parse(")))"), Err(ParseError::MalformedExpression));
}

#[test]
fn test_registry_is_write_once() {
    let mut table = OperatorTable::new();
    table.register('+', 0, Node::add);
    table.register('+', 3, Node::add);
    assert_eq!(table.precedence_of('+'), Some(0));
}

#[test]
fn test_display_round_trip() {
    let calc = Calculator::default();
    for input in [
        "10 - 6 / 2 ^ 5 + 3",
        "2 + -5",
        "-2 + 5 * 3",
        "1 - 2 - 3 - 4",
        "2 ^ 3 ^ 2",
        "(3 - 5) / 4 + (10 - 2)",
    ] {
        let tree = calc.parse(input).unwrap();
        let printed = tree.display();
        let reparsed = calc.parse(&printed).unwrap();
        assert_eq!(reparsed.evaluate(), tree.evaluate(), "{:?} printed as {:?}", input, printed);
    }
}

#[test]
fn test_validated_input_parses_structurally() {
    let calc = Calculator::default();
    for input in [
        "1",
        "-1",
        "((2))",
        "-(3) * 2",
        "1 / 0",
        "0 / 0",
        "2 ^ 0.5",
        ".5 + 5.",
        "1 - (2 - (3 - (4 - (5))))",
    ] {
        assert_eq!(validate(input), None, "{:?}", input);
        match parse(input) {
            Err(ParseError::EmptyExpression) | Err(ParseError::InvalidOperation) => {
                panic!("{:?} validated but failed to parse", input)
            }
            _ => {}
        }
        assert!(calc.calculate(input).is_ok(), "{:?}", input);
    }
}

#[test]
fn test_division_by_zero() {
    let calc = Calculator::default();
    assert_eq!(calc.calculate("1 / 0").unwrap().result, f64::INFINITY);
    assert!(calc.calculate("0 / 0").unwrap().result.is_nan());
    assert_eq!(
        calc.calculate("(1 / 0) - 1"),
        Err(AppError::Parse(ParseError::UndefinedSubexpression))
    );
}

#[test]
fn test_error_messages() {
    let calc = Calculator::default();
    let err = calc.calculate("2 + x").unwrap_err();
    assert_eq!(err.to_string(), "Invalid symbol!");
    let err = calc.calculate("(1 + 2").unwrap_err();
    assert_eq!(err.to_string(), "Expression ended unexpectedly!");
}

#[test]
fn test_whitespace_inside_constants() {
    let calc = Calculator::default();
    let answer = calc.calculate("223 4.000").unwrap();
    assert_eq!(answer.result, 2234.0);
    assert_eq!(answer.equation, "2234.000");
    assert_eq!(calc.calculate("2. 000 + 1").unwrap().result, 3.0);
    assert_eq!(
        calc.calculate("(2) 3"),
        Err(AppError::Validation(ValidationError::MissingOperator))
    );
}

#[test]
fn test_negated_scope() {
    let calc = Calculator::default();
    assert_eq!(validate("-(1 - 3)"), None);
    assert_eq!(calc.calculate("-(1 - 3)").unwrap().result, 2.0);
    assert_eq!(calc.calculate("10 * (-(2 - 5)) + 1").unwrap().result, 31.0);
}
