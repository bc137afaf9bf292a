//! Transaction row parsing and classification
//!
//! Ledger rows come out of PDF reconstruction as whitespace-separated
//! columns:
//!
//!   27-Oct-2024 1,000.00 101.2500 9.876 Purchase - Systematic 9.876
//!
//! i.e. date, amount, NAV, units, free-text description, closing balance.
//! Negative amounts/units print in parentheses. Tax rows and pledge markers
//! break the column layout and are special-cased first.

use cas_core::{Transaction, TransactionType, is_date_token, parse_signed_number, parse_statement_date};

const STAMP_DUTY_MARKER: &str = "*** Stamp Duty ***";
const STT_MARKER: &str = "*** STT Paid ***";

/// Parse one trimmed line believed to be a ledger row.
///
/// None means the line is not a transaction: a pledge/lien marker, a
/// consolidation/system footer with no numbers, or a row that fails the
/// column layout. Dropping such lines is deliberate best-effort recovery.
pub fn parse_transaction_line(line: &str) -> Option<Transaction> {
    if let Some(txn) = parse_tax_row(line, STAMP_DUTY_MARKER, TransactionType::StampDutyTax) {
        return Some(txn);
    }
    if let Some(txn) = parse_tax_row(line, STT_MARKER, TransactionType::SttTax) {
        return Some(txn);
    }

    let lower = line.to_lowercase();
    if lower.contains("pledge") || lower.contains("lien") {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return None;
    }
    if !is_date_token(tokens[0]) {
        return None;
    }
    let date = parse_statement_date(tokens[0])?;

    let amount = parse_signed_number(tokens[1]);
    let nav = parse_signed_number(tokens[2]);
    let units = parse_signed_number(tokens[3]);
    let balance = parse_signed_number(tokens[tokens.len() - 1]);

    let description = tokens[4..tokens.len() - 1].join(" ");
    if description.is_empty() {
        return None;
    }
    // A row with no numbers at all is a consolidation/system footer
    let all_zero = [amount, nav, units, balance]
        .iter()
        .all(|v| v.unwrap_or(0.0) == 0.0);
    if all_zero {
        return None;
    }

    let units = units.unwrap_or(0.0);
    Some(Transaction {
        date,
        description: description.clone(),
        amount: amount.unwrap_or(0.0),
        units,
        nav: nav.unwrap_or(0.0),
        balance: balance.unwrap_or(0.0),
        txn_type: classify_transaction(&description, units),
    })
}

/// Stamp-duty / STT rows: a date, the marker text, and an amount; no units,
/// NAV, or balance.
fn parse_tax_row(line: &str, marker: &str, txn_type: TransactionType) -> Option<Transaction> {
    if !line.contains(marker) {
        return None;
    }
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    if !is_date_token(first) {
        return None;
    }
    let date = parse_statement_date(first)?;
    let amount = tokens.next().and_then(parse_signed_number).unwrap_or(0.0);
    Some(Transaction {
        date,
        description: marker.to_string(),
        amount,
        units: 0.0,
        nav: 0.0,
        balance: 0.0,
        txn_type,
    })
}

/// Classify a row by its description.
///
/// Categories overlap textually ("Switch In - Purchase"), so the order of
/// checks matters and must not be rearranged.
pub fn classify_transaction(description: &str, units: f64) -> TransactionType {
    let d = description.to_lowercase();
    if d.contains("redemption") || (d.contains("purchase") && d.contains("revers")) {
        TransactionType::Redemption
    } else if d.contains("purchase") || d.contains("systematic") || d.contains("sip") {
        TransactionType::Purchase
    } else if d.contains("switch") {
        if units >= 0.0 {
            TransactionType::SwitchIn
        } else {
            TransactionType::SwitchOut
        }
    } else if d.contains("dividend") {
        TransactionType::Dividend
    } else if d.contains("consolidation") {
        TransactionType::Consolidation
    } else if d.contains("cancelled") {
        TransactionType::Cancelled
    } else if d.contains("demat") {
        TransactionType::Demat
    } else {
        TransactionType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_basic_purchase_row() {
        let txn =
            parse_transaction_line("27-Oct-2024 1,000.00 101.2500 9.876 Purchase - SIP 9.876")
                .unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 10, 27).unwrap());
        assert_eq!(txn.amount, 1000.0);
        assert_eq!(txn.nav, 101.25);
        assert_eq!(txn.units, 9.876);
        assert_eq!(txn.balance, 9.876);
        assert_eq!(txn.description, "Purchase - SIP");
        assert_eq!(txn.txn_type, TransactionType::Purchase);
    }

    #[test]
    fn test_parenthesized_redemption_row() {
        let txn = parse_transaction_line(
            "15-Jan-2025 (5,000.00) 102.0000 (49.020) Redemption 450.500",
        )
        .unwrap();
        assert_eq!(txn.amount, -5000.0);
        assert_eq!(txn.units, -49.02);
        assert_eq!(txn.balance, 450.5);
        assert_eq!(txn.txn_type, TransactionType::Redemption);
    }

    #[test]
    fn test_stamp_duty_row() {
        let txn = parse_transaction_line("27-Oct-2024 0.50 *** Stamp Duty ***").unwrap();
        assert_eq!(txn.txn_type, TransactionType::StampDutyTax);
        assert_eq!(txn.description, "*** Stamp Duty ***");
        assert_eq!(txn.amount, 0.5);
        assert_eq!(txn.units, 0.0);
        assert_eq!(txn.nav, 0.0);
        assert_eq!(txn.balance, 0.0);
    }

    #[test]
    fn test_stt_row() {
        let txn = parse_transaction_line("15-Jan-2025 0.05 *** STT Paid ***").unwrap();
        assert_eq!(txn.txn_type, TransactionType::SttTax);
    }

    #[test]
    fn test_tax_row_without_date_is_dropped() {
        assert!(parse_transaction_line("balance 0.50 *** Stamp Duty ***").is_none());
    }

    #[test]
    fn test_pledge_lines_are_not_transactions() {
        assert!(parse_transaction_line("12-Feb-2025 *** Units Pledged *** 100.000").is_none());
        assert!(parse_transaction_line("12-Feb-2025 *** Lien Marked *** 100.000").is_none());
    }

    #[test]
    fn test_all_zero_row_is_noise() {
        assert!(
            parse_transaction_line("01-Apr-2024 0.00 0.0000 0.000 Address Updated 0.000").is_none()
        );
    }

    #[test]
    fn test_short_row_is_dropped() {
        assert!(parse_transaction_line("27-Oct-2024 1,000.00 101.25 9.876").is_none());
    }

    #[test]
    fn test_classifier_table() {
        let cases = [
            ("Purchase - SIP", 9.0, TransactionType::Purchase),
            ("Systematic Investment (1)", 9.0, TransactionType::Purchase),
            ("Purchase-reversed", 9.0, TransactionType::Redemption),
            ("Redemption", -9.0, TransactionType::Redemption),
            ("Switch In", 9.0, TransactionType::SwitchIn),
            ("Switch Out", -9.0, TransactionType::SwitchOut),
            ("Dividend Reinvested", 1.0, TransactionType::Dividend),
            ("Consolidation In", 1.0, TransactionType::Consolidation),
            ("Purchase Cancelled", 0.0, TransactionType::Purchase),
            ("Cancelled", 0.0, TransactionType::Cancelled),
            ("Demat Conversion", -1.0, TransactionType::Demat),
            ("Misc Charges", 0.0, TransactionType::Other),
        ];
        for (desc, units, expected) in cases {
            assert_eq!(classify_transaction(desc, units), expected, "{desc}");
        }
    }
}
