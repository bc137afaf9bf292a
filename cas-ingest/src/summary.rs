//! Summary-statement parser
//!
//! A summary CAS has no ledger, just current holdings in a bounded section:
//!
//!   ... Market Value Folio No. ...
//!   123456 / 78 1,031.00 H123 - HDFC Flexi Cap Fund - Direct Growth
//!   9.876 31-Mar-2025 104.5000 CAMS INF179K01CR2 1,000.00
//!   Total 5,000.00 4,500.00
//!
//! Each holding is exactly two consecutive non-empty lines. The section
//! boundaries are mandatory; a malformed pair is skipped, not fatal.

use anyhow::{Context, Result};
use cas_core::{
    CasType, Statement, StatementPeriod, SummaryHolding, parse_signed_number,
    parse_statement_date, resolve_amc,
};
use regex::Regex;

use crate::investor::extract_investor_info;

const SECTION_START: &str = "Market Value Folio No.";

/// Parse a summary (holdings-only) statement.
pub fn parse_summary(text: &str) -> Result<Statement> {
    let mut statement = Statement::new(CasType::Summary);
    statement.investor_info = extract_investor_info(text)?;

    let as_on_re = Regex::new(r"As\s+on\s+(\d{2}-[A-Za-z]{3}-\d{4})")?;
    if let Some(caps) = as_on_re.captures(text)
        && let Some(date) = parse_statement_date(&caps[1])
    {
        statement.statement_period = Some(StatementPeriod {
            from: date,
            to: date,
        });
    }

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let start = lines
        .iter()
        .position(|l| l.contains(SECTION_START))
        .context("summary holdings section start marker not found")?;
    let end = lines[start..]
        .iter()
        .position(|l| l.starts_with("Total "))
        .map(|off| start + off)
        .context("summary holdings section end marker (Total line) not found")?;

    let total_re = Regex::new(r"^Total\s+([\d,]+\.?\d*)\s+([\d,]+\.?\d*)")?;
    let caps = total_re
        .captures(lines[end])
        .context("summary Total line does not carry value and cost")?;
    statement.current_value = parse_signed_number(&caps[1]);
    statement.cost = parse_signed_number(&caps[2]);

    statement.holdings = scan_holdings(&lines[start + 1..end])?;
    Ok(statement)
}

/// Walk the bounded section pairing consecutive non-empty lines. A pair
/// that fails either pattern advances the scan by one line so a later
/// well-formed pair is still found.
fn scan_holdings(section: &[&str]) -> Result<Vec<SummaryHolding>> {
    let line1_re = Regex::new(
        r"(?x)
        ^(?P<folio>\d[\d\s/]*?)\s+
        (?P<value>[\d,]+\.\d+)\s+
        (?P<code>[\w\s]+?)\s*-\s*
        (?P<scheme>.+)$",
    )?;
    let line2_re = Regex::new(
        r"(?x)
        ^(?P<units>[\d,]+\.\d+)\s+
        (?P<date>\d{2}-[A-Za-z]{3}-\d{4})\s+
        (?P<nav>[\d,]+\.\d+)\s+
        (?P<rta>\w+)\s+
        (?P<isin>[A-Z0-9]{12})\s+
        (?P<cost>[\d,]+\.\d+)\s*$",
    )?;

    let rows: Vec<&str> = section.iter().copied().filter(|l| !l.is_empty()).collect();
    let mut holdings = Vec::new();
    let mut i = 0;
    while i + 1 < rows.len() {
        // A holding's first line always starts with the folio number
        if !rows[i].starts_with(|c: char| c.is_ascii_digit()) {
            i += 1;
            continue;
        }
        let Some(c1) = line1_re.captures(rows[i]) else {
            i += 1;
            continue;
        };
        let Some(c2) = line2_re.captures(rows[i + 1]) else {
            i += 1;
            continue;
        };
        let (Some(current_value), Some(units), Some(nav), Some(cost), Some(nav_date)) = (
            parse_signed_number(&c1["value"]),
            parse_signed_number(&c2["units"]),
            parse_signed_number(&c2["nav"]),
            parse_signed_number(&c2["cost"]),
            parse_statement_date(&c2["date"]),
        ) else {
            i += 1;
            continue;
        };
        let scheme = c1["scheme"].trim().to_string();
        holdings.push(SummaryHolding {
            folio: c1["folio"].trim().to_string(),
            current_value,
            cost,
            rta_code: c1["code"].trim().to_string(),
            scheme: scheme.clone(),
            units,
            nav_date,
            nav,
            rta: c2["rta"].to_string(),
            isin: c2["isin"].to_string(),
            amc: resolve_amc(&scheme).to_string(),
        });
        i += 2;
    }
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_text() -> String {
        "\
Consolidated Account Summary
As on 31-Mar-2025

investor@example.com
ANITA SHARMA
12 MG Road
9876543210

Units NAV Date NAV Market Value Folio No. Scheme Name
123456 / 78 1,031.00 H123 - HDFC Flexi Cap Fund - Direct Growth
9.876 31-Mar-2025 104.5000 CAMS INF179K01CR2 1,000.00
Total 5,000.00 4,500.00
"
        .to_string()
    }

    #[test]
    fn test_summary_end_to_end() {
        let st = parse_summary(&summary_text()).unwrap();
        assert_eq!(st.current_value, Some(5000.0));
        assert_eq!(st.cost, Some(4500.0));
        assert_eq!(st.holdings.len(), 1);

        let h = &st.holdings[0];
        assert_eq!(h.folio, "123456 / 78");
        assert_eq!(h.current_value, 1031.0);
        assert_eq!(h.scheme, "HDFC Flexi Cap Fund - Direct Growth");
        assert_eq!(h.units, 9.876);
        assert_eq!(h.nav, 104.5);
        assert_eq!(h.nav_date.to_string(), "2025-03-31");
        assert_eq!(h.rta, "CAMS");
        assert_eq!(h.isin, "INF179K01CR2");
        assert_eq!(h.cost, 1000.0);
        assert_eq!(h.amc, "HDFC Mutual Fund");

        let period = st.statement_period.unwrap();
        assert_eq!(period.from.to_string(), "2025-03-31");
        assert_eq!(period.from, period.to);
    }

    #[test]
    fn test_missing_section_start_is_structural_error() {
        let text = summary_text().replace("Market Value Folio No.", "holdings");
        assert!(parse_summary(&text).is_err());
    }

    #[test]
    fn test_missing_total_is_structural_error() {
        let text = summary_text().replace("Total 5,000.00 4,500.00", "");
        assert!(parse_summary(&text).is_err());
    }

    #[test]
    fn test_bad_pair_is_skipped() {
        let text = summary_text().replace(
            "9.876 31-Mar-2025 104.5000 CAMS INF179K01CR2 1,000.00",
            "garbled continuation line",
        );
        let st = parse_summary(&text).unwrap();
        assert!(st.holdings.is_empty());
        // Totals still parse; the skip is row-level, not fatal
        assert_eq!(st.current_value, Some(5000.0));
    }
}
