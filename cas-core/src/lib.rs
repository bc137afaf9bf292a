//! cas-core: output model and leaf utilities for CAS statement parsing

pub mod amc;
pub mod date;
pub mod num;
pub mod statement;

pub use amc::{AMC_CATALOG, UNKNOWN_AMC, best_amc_match, match_amc_prefix, resolve_amc};
pub use date::{is_date_token, parse_statement_date};
pub use num::parse_signed_number;
pub use statement::{
    CasType, Folio, InvestorInfo, Scheme, Statement, StatementPeriod, SummaryHolding, Transaction,
    TransactionType, Valuation,
};

/// Provenance tag stamped on every parsed statement.
pub const FILE_TYPE: &str = "CAMS";
