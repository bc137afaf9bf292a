//! Statement variant detection

use cas_core::CasType;

/// Decide which parsing strategy fits the document.
///
/// "Consolidated Account Summary" marks the holdings-only variant;
/// "Consolidated Account Statement" the full-ledger one. Text with neither
/// phrase is still attempted as detailed rather than rejected.
pub fn detect_cas_type(text: &str) -> CasType {
    if text.contains("Consolidated Account Summary") {
        CasType::Summary
    } else {
        CasType::Detailed
    }
}
