//! Statement date handling
//!
//! CAS text carries every date as `DD-Mon-YYYY` (e.g. "27-Oct-2024").

use chrono::NaiveDate;

/// True if `s` has the exact 11-character `DD-Mon-YYYY` shape.
///
/// Shape only: the month abbreviation is not checked here, so a token that
/// passes this gate can still fail [`parse_statement_date`].
pub fn is_date_token(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 11 || b[2] != b'-' || b[6] != b'-' {
        return false;
    }
    b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[3].is_ascii_alphabetic()
        && b[4].is_ascii_alphabetic()
        && b[5].is_ascii_alphabetic()
        && b[7..11].iter().all(|c| c.is_ascii_digit())
}

/// Parse a `DD-Mon-YYYY` token into a date.
///
/// Callers are expected to pre-screen with [`is_date_token`]; a token with an
/// unrecognized month abbreviation or impossible day yields None.
pub fn parse_statement_date(token: &str) -> Option<NaiveDate> {
    let mut it = token.split('-');
    let day: u32 = it.next()?.parse().ok()?;
    let month = match it.next()? {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    let year: i32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_months() {
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        for (i, m) in months.iter().enumerate() {
            let d = parse_statement_date(&format!("15-{m}-2024")).unwrap();
            assert_eq!(d, NaiveDate::from_ymd_opt(2024, i as u32 + 1, 15).unwrap());
        }
    }

    #[test]
    fn test_iso_round_trip() {
        let d = parse_statement_date("27-Oct-2024").unwrap();
        assert_eq!(d.to_string(), "2024-10-27");
    }

    #[test]
    fn test_rejects_bad_month() {
        assert!(parse_statement_date("27-Xyz-2024").is_none());
        // lowercase abbreviation is not a statement date
        assert!(parse_statement_date("27-oct-2024").is_none());
    }

    #[test]
    fn test_date_token_shape() {
        assert!(is_date_token("27-Oct-2024"));
        assert!(is_date_token("01-Xyz-1999")); // shape only, month unchecked
        assert!(!is_date_token("27-Oct-24"));
        assert!(!is_date_token("27/Oct/2024"));
        assert!(!is_date_token("2024-10-27"));
        assert!(!is_date_token(""));
    }
}
