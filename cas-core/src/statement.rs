//! Output types for parsed Consolidated Account Statements (CAS)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which statement variant the text was parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasType {
    #[serde(rename = "SUMMARY")]
    Summary,
    #[serde(rename = "DETAILED")]
    Detailed,
}

/// Statement reporting period, present on detailed statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Investor contact block. Every field is extracted independently and
/// absence is valid, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorInfo {
    pub email: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// Root output of a parse: one statement, fully owned, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub statement_period: Option<StatementPeriod>,
    pub file_type: String,
    pub cas_type: CasType,
    pub investor_info: InvestorInfo,
    pub folios: Vec<Folio>,
    /// Aggregate market value across holdings (SUMMARY only)
    pub current_value: Option<f64>,
    /// Aggregate cost across holdings (SUMMARY only)
    pub cost: Option<f64>,
    /// Flattened holdings (SUMMARY only; empty for DETAILED)
    pub holdings: Vec<SummaryHolding>,
}

/// An investor's account with one AMC, grouping scheme holdings.
///
/// Within a single parse at most one Folio exists per (folio, amc) pair;
/// a later block with the same pair merges into the existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folio {
    /// Folio number as printed; may carry non-digits after the leading digits
    pub folio: String,
    pub amc: String,
    #[serde(rename = "PAN")]
    pub pan: Option<String>,
    #[serde(rename = "KYC")]
    pub kyc: Option<String>,
    #[serde(rename = "PANKYC")]
    pub pan_kyc: Option<String>,
    pub schemes: Vec<Scheme>,
}

/// One fund holding within a folio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub scheme: String,
    /// 12 characters when present
    pub isin: Option<String>,
    /// Not populated by the text parser
    pub amfi: Option<String>,
    pub advisor: Option<String>,
    pub rta_code: String,
    pub rta: String,
    pub nominees: Vec<String>,
    /// Opening unit balance as stated
    pub open: f64,
    /// Closing unit balance as stated
    pub close: f64,
    /// Closing balance recomputed from transactions, kept separate so the
    /// stated figure can be reconciled against the ledger
    pub close_calculated: f64,
    pub valuation: Valuation,
    pub transactions: Vec<Transaction>,
}

/// Point-in-time snapshot from the "NAV on" / "Total Cost Value" lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub date: Option<NaiveDate>,
    pub nav: f64,
    pub value: f64,
    pub cost: f64,
}

/// A single ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    /// Signed unit change
    pub units: f64,
    pub nav: f64,
    /// Unit balance after this transaction
    pub balance: f64,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
}

/// Classified transaction kind. The wire spelling is part of the external
/// contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "PURCHASE")]
    Purchase,
    #[serde(rename = "REDEMPTION")]
    Redemption,
    #[serde(rename = "SWITCH_IN")]
    SwitchIn,
    #[serde(rename = "SWITCH_OUT")]
    SwitchOut,
    #[serde(rename = "DIVIDEND")]
    Dividend,
    #[serde(rename = "STAMP_DUTY_TAX")]
    StampDutyTax,
    #[serde(rename = "STT_TAX")]
    SttTax,
    #[serde(rename = "DEMAT")]
    Demat,
    #[serde(rename = "CONSOLIDATION")]
    Consolidation,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "OTHER")]
    Other,
}

/// One holding row of a summary statement. Summary statements carry no
/// ledger, so this flattened view replaces Scheme/Transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryHolding {
    pub folio: String,
    pub current_value: f64,
    pub cost: f64,
    pub rta_code: String,
    pub scheme: String,
    pub units: f64,
    pub nav_date: NaiveDate,
    pub nav: f64,
    pub rta: String,
    pub isin: String,
    pub amc: String,
}

impl Statement {
    /// Fresh statement shell for the given variant
    pub fn new(cas_type: CasType) -> Self {
        Statement {
            statement_period: None,
            file_type: crate::FILE_TYPE.to_string(),
            cas_type,
            investor_info: InvestorInfo::default(),
            folios: Vec::new(),
            current_value: None,
            cost: None,
            holdings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_spellings() {
        let json = serde_json::to_string(&TransactionType::StampDutyTax).unwrap();
        assert_eq!(json, "\"STAMP_DUTY_TAX\"");
        let json = serde_json::to_string(&TransactionType::SwitchOut).unwrap();
        assert_eq!(json, "\"SWITCH_OUT\"");
        let json = serde_json::to_string(&CasType::Detailed).unwrap();
        assert_eq!(json, "\"DETAILED\"");
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let txn = Transaction {
            date: NaiveDate::from_ymd_opt(2024, 10, 27).unwrap(),
            description: "Purchase - SIP".to_string(),
            amount: 1000.0,
            units: 9.876,
            nav: 101.25,
            balance: 9.876,
            txn_type: TransactionType::Purchase,
        };
        let v: serde_json::Value = serde_json::to_value(&txn).unwrap();
        assert_eq!(v["date"], "2024-10-27");
        assert_eq!(v["type"], "PURCHASE");
    }
}
