//! Numeric token parsing for statement text
//!
//! CAS rows print negatives in parentheses and use commas as thousands
//! separators: "(1,234.567)" is -1234.567.

/// Parse a statement number token into a signed float.
///
/// Wrapping parentheses negate; commas are stripped. None when the remainder
/// is not a number.
pub fn parse_signed_number(token: &str) -> Option<f64> {
    let t = token.trim();
    let (t, negative) = match t.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (t, false),
    };
    let v: f64 = t.replace(',', "").parse().ok()?;
    Some(if negative { -v } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_signed_number("102.34"), Some(102.34));
        assert_eq!(parse_signed_number("0.000"), Some(0.0));
        assert_eq!(parse_signed_number("-15.00"), Some(-15.0));
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(parse_signed_number("1,23,456.78"), Some(123456.78));
        assert_eq!(parse_signed_number("5,000.00"), Some(5000.0));
    }

    #[test]
    fn test_parenthesized_is_negative() {
        assert_eq!(parse_signed_number("(1,234.567)"), Some(-1234.567));
        assert_eq!(parse_signed_number("(9.99)"), Some(-9.99));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_signed_number("N/A"), None);
        assert_eq!(parse_signed_number("(abc)"), None);
        assert_eq!(parse_signed_number(""), None);
    }
}
