//! cas-ingest: parsers turning extracted CAS text into structured statements
//!
//! Input is page-oriented plain text reconstructed from a statement PDF;
//! whitespace, line wraps, and row layout are whatever the reconstruction
//! produced. The parsers here are deliberately tolerant: a malformed row is
//! dropped, only a missing section boundary or empty input fails the parse.

pub mod detailed;
pub mod detect;
pub mod investor;
pub mod scheme_info;
pub mod summary;
pub mod txn_line;

pub use detailed::parse_detailed;
pub use detect::detect_cas_type;
pub use investor::extract_investor_info;
pub use scheme_info::{SchemeInfo, SchemeInfoOutcome, extract_scheme_info};
pub use summary::parse_summary;
pub use txn_line::{classify_transaction, parse_transaction_line};

use anyhow::{Result, bail};
use cas_core::{CasType, Statement};

/// Parse extracted CAS text, choosing the summary or detailed strategy.
///
/// This is the single entry point: detection is fail-open, so text matching
/// neither variant phrase is still attempted as a detailed statement.
pub fn parse_cas_text(text: &str) -> Result<Statement> {
    if text.trim().is_empty() {
        bail!("empty CAS text: nothing to parse");
    }
    match detect_cas_type(text) {
        CasType::Summary => parse_summary(text),
        CasType::Detailed => parse_detailed(text),
    }
}
