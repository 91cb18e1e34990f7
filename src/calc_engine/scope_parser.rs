use std::sync::Arc;

use log::trace;

use super::error::ParseError;
use super::flat_parser::FlatParser;
use super::node::Node;
use super::operators::OperatorTable;
use super::Parse;

/// Flattens parenthesized scopes before handing the rest to [`FlatParser`].
///
/// Each `( ... )` block is cut out, replaced by a `?<index>` placeholder,
/// parsed on its own and substituted back as the text of its value. The
/// tree returned therefore only reflects the outermost level of the input:
/// inner scopes survive as constants, not as subtrees.
pub struct ScopeParser {
    operators: Arc<OperatorTable>,
    flat: FlatParser,
}

impl ScopeParser {
    pub fn new(operators: Arc<OperatorTable>) -> Self {
        ScopeParser {
            flat: FlatParser::new(Arc::clone(&operators)),
            operators,
        }
    }

    fn extract(input: &str) -> Result<(String, Vec<&str>), ParseError> {
        let mut subs = Vec::new();
        let mut expr = String::with_capacity(input.len());

        let mut rest = input;
        while let Some(c) = rest.chars().next() {
            match c {
                '(' => {
                    let end = closing_paren(rest).ok_or(ParseError::MalformedExpression)?;
                    subs.push(&rest[1..end]);
                    expr.push('?');
                    expr.push_str(&(subs.len() - 1).to_string());
                    rest = &rest[end + 1..];
                }
                ')' => return Err(ParseError::MalformedExpression),
                _ => {
                    expr.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        Ok((expr, subs))
    }

    fn resolve(&self, expr: &str, subs: &[&str]) -> Result<String, ParseError> {
        let mut out = String::with_capacity(expr.len());

        let mut rest = expr;
        while let Some(c) = rest.chars().next() {
            if c != '?' {
                out.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            }

            let digits = rest[1..]
                .find(|d: char| !d.is_ascii_digit())
                .map_or(rest.len(), |end| end + 1);
            let index: usize = rest[1..digits]
                .parse()
                .map_err(|_| ParseError::MalformedExpression)?;
            let sub = subs.get(index).ok_or(ParseError::MalformedExpression)?;

            let value = self.parse(sub)?.evaluate();
            if !value.is_finite() {
                return Err(ParseError::UndefinedSubexpression);
            }
            trace!("scope {:?} flattened to {}", sub, value);
            if value.is_sign_negative() && self.strip_sign(&mut out) {
                out.push_str(&(-value).to_string());
            } else {
                out.push_str(&value.to_string());
            }
            rest = &rest[digits..];
        }
        Ok(out)
    }

    /// Drops a sign written right before a scope, so `-(1 - 3)` reads as `2`
    /// rather than the unparsable `--2`. A `-` following an operand is a
    /// subtraction and stays.
    fn strip_sign(&self, out: &mut String) -> bool {
        let head = out.trim_end();
        let Some(before_sign) = head.strip_suffix('-') else {
            return false;
        };
        let before = before_sign.trim_end().chars().next_back();
        if before.is_some() && !self.operators.contains(before) {
            return false;
        }
        let len = before_sign.len();
        out.truncate(len);
        true
    }
}

impl Parse for ScopeParser {
    fn parse(&self, input: &str) -> Result<Node, ParseError> {
        let (expr, subs) = Self::extract(input)?;
        if subs.is_empty() {
            return self.flat.parse(&expr);
        }
        let flattened = self.resolve(&expr, &subs)?;
        self.flat.parse(&flattened)
    }
}

/// Byte index of the `)` closing the scope opened at the start of `s`.
fn closing_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
