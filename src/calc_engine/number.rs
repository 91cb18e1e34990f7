/// Parses a signed decimal literal: optional leading `-`, digits, at most one `.`.
///
/// The whole token has to match. Exponents, a leading `+`, `inf` and `nan`
/// are rejected even though `f64::from_str` would take them, and so is any
/// literal too large to be finite.
pub fn parse_number(token: &str) -> Option<f64> {
    let digits = token.strip_prefix('-').unwrap_or(token);

    let mut has_dot = false;
    let mut has_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '.' if has_dot => return None,
            '.' => has_dot = true,
            _ => return None,
        }
    }
    if !has_digit {
        return None;
    }

    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn is_valid_number(token: &str) -> bool {
    parse_number(token).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_signed_decimals() {
        assert_eq!(parse_number("442"), Some(442.0));
        assert_eq!(parse_number("-34"), Some(-34.0));
        assert_eq!(parse_number("442.78"), Some(442.78));
        assert_eq!(parse_number("-33.12"), Some(-33.12));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
    }

    #[test]
    fn rejects_everything_else() {
        for token in ["", "-", ".", "-.", "3.0.0", "--1", "+1", "1e5", "inf", "NaN", "1 2", "1-2"] {
            assert!(!is_valid_number(token), "{:?} should be invalid", token);
        }
    }

    #[test]
    fn rejects_overflowing_literals() {
        let huge = format!("1{}", "0".repeat(400));
        assert!(!is_valid_number(&huge));
    }
}
