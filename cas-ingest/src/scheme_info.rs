//! Scheme header extraction
//!
//! A detailed-statement scheme header is one logical line:
//!
//!   128TSDGG - Axis ELSS Tax Saver Fund - Direct Growth -
//!   ISIN : INF846K01EW2 (Advisor : INA100006898) Registrar : KFINTECH
//!
//! PDF reconstruction wraps these freely, sometimes mid-ISIN, so extraction
//! is two-valued: a parsed record, or "not yet parseable" so the caller can
//! append the next raw line and retry.

use anyhow::Result;
use regex::Regex;

/// Advisor codes are kept only with a SEBI registration prefix, or the
/// literal DIRECT marker used by direct plans.
const ADVISOR_PREFIXES: &[&str] = &["ARN", "INA", "INZ", "INP"];

/// Parsed scheme header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeInfo {
    pub rta_code: String,
    pub scheme: String,
    pub isin: Option<String>,
    pub advisor: Option<String>,
    pub rta: String,
}

/// Outcome of one extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeInfoOutcome {
    Parsed(SchemeInfo),
    /// The line does not (yet) carry a complete header; the caller may
    /// append the next raw line and retry
    Incomplete,
}

/// Try to extract scheme-header fields from one accumulated line.
///
/// An ISIN candidate is accepted only when, with embedded whitespace
/// removed, it is exactly 12 characters; a shorter candidate means the wrap
/// split the ISIN and the caller should retry with more input.
pub fn extract_scheme_info(line: &str) -> Result<SchemeInfoOutcome> {
    let re = Regex::new(
        r"(?x)
        ^(?P<code>\w+)\s*-\s*
        (?P<name>.+?)\s*
        (?:-\s*ISIN\s*:?\s*(?P<isin>[A-Z0-9][A-Z0-9\s]*?))?\s*
        (?:\(\s*Advisor\s*:?\s*(?P<advisor>[\w-]+)\s*\))?\s*
        Registrar\s*:?\s*(?P<rta>\S+)\s*$",
    )?;

    let Some(caps) = re.captures(line) else {
        return Ok(SchemeInfoOutcome::Incomplete);
    };

    let isin = match caps.name("isin") {
        Some(m) => {
            let compact: String = m.as_str().split_whitespace().collect();
            if compact.len() < 12 {
                return Ok(SchemeInfoOutcome::Incomplete);
            }
            if compact.len() > 12 {
                // Not an ISIN; treat the header as unparseable
                return Ok(SchemeInfoOutcome::Incomplete);
            }
            Some(compact)
        }
        None => None,
    };

    let advisor = caps
        .name("advisor")
        .map(|m| m.as_str().to_string())
        .filter(|a| {
            let upper = a.to_uppercase();
            upper == "DIRECT" || ADVISOR_PREFIXES.iter().any(|p| upper.starts_with(p))
        });

    Ok(SchemeInfoOutcome::Parsed(SchemeInfo {
        rta_code: caps["code"].to_string(),
        scheme: clean_scheme_name(&caps["name"])?,
        isin,
        advisor,
        rta: caps["rta"].to_string(),
    }))
}

/// Drop the demat qualifier and any "formerly ..." aside, collapse spaces
fn clean_scheme_name(name: &str) -> Result<String> {
    let demat_re = Regex::new(r"(?i)\(\s*non(?:\s|-)?demat\s*\)|\(\s*demat\s*\)")?;
    let formerly_re = Regex::new(r"(?i)\([^)]*formerly[^)]*\)")?;
    let cleaned = demat_re.replace_all(name, " ");
    let cleaned = formerly_re.replace_all(&cleaned, " ");
    Ok(cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}
