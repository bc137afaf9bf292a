//! Fund-house (AMC) catalog and fuzzy name resolution
//!
//! Scheme names in CAS text are free-form ("HDFC Flexi Cap Fund - Direct
//! Growth"), so holdings are attributed to a fund house by fuzzy-matching the
//! first token of the name against a fixed catalog. One shared table serves
//! both the summary and detailed parsers.

/// Sentinel returned when no catalog entry clears the match threshold
pub const UNKNOWN_AMC: &str = "Unknown AMC";

/// Fund houses appearing in CAMS/KFintech consolidated statements
pub const AMC_CATALOG: &[&str] = &[
    "360 ONE Mutual Fund",
    "Aditya Birla Sun Life Mutual Fund",
    "Axis Mutual Fund",
    "Bajaj Finserv Mutual Fund",
    "Bandhan Mutual Fund",
    "Bank of India Mutual Fund",
    "Baroda BNP Paribas Mutual Fund",
    "BOI AXA Mutual Fund",
    "Canara Robeco Mutual Fund",
    "DHFL Pramerica Mutual Fund",
    "DSP Mutual Fund",
    "Edelweiss Mutual Fund",
    "Franklin Templeton Mutual Fund",
    "Groww Mutual Fund",
    "HDFC Mutual Fund",
    "Helios Mutual Fund",
    "HSBC Mutual Fund",
    "ICICI Prudential Mutual Fund",
    "IDBI Mutual Fund",
    "IDFC Mutual Fund",
    "IIFL Mutual Fund",
    "Indiabulls Mutual Fund",
    "Invesco Mutual Fund",
    "ITI Mutual Fund",
    "JM Financial Mutual Fund",
    "Kotak Mahindra Mutual Fund",
    "L&T Mutual Fund",
    "LIC Mutual Fund",
    "Mahindra Manulife Mutual Fund",
    "Mirae Asset Mutual Fund",
    "Motilal Oswal Mutual Fund",
    "Navi Mutual Fund",
    "Nippon India Mutual Fund",
    "NJ Mutual Fund",
    "Old Bridge Mutual Fund",
    "PGIM India Mutual Fund",
    "PPFAS Mutual Fund",
    "Principal Mutual Fund",
    "Quant Mutual Fund",
    "Quantum Mutual Fund",
    "Samco Mutual Fund",
    "SBI Mutual Fund",
    "Shriram Mutual Fund",
    "Sundaram Mutual Fund",
    "Tata Mutual Fund",
    "Taurus Mutual Fund",
    "Trust Mutual Fund",
    "Union Mutual Fund",
    "UTI Mutual Fund",
    "WhiteOak Capital Mutual Fund",
    "Zerodha Mutual Fund",
];

/// Lowercase and collapse every non-alphanumeric run to a single space
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// Classic two-row Levenshtein over chars
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let sub = prev[j] + usize::from(ca != cb);
            curr[j + 1] = sub.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Best catalog entry for a free-text scheme/holding name, with its score.
///
/// Compares first normalized tokens only. Ties go to the earlier catalog
/// entry, so the result is deterministic.
pub fn best_amc_match(name: &str) -> (&'static str, f64) {
    let key = normalize(name);
    let key = first_token(&key);
    let mut best = (AMC_CATALOG[0], f64::MIN);
    for entry in AMC_CATALOG {
        let entry_norm = normalize(entry);
        let score = similarity(key, first_token(&entry_norm));
        if score > best.1 {
            best = (entry, score);
        }
    }
    best
}

/// Resolve a free-text scheme/holding name to a catalog AMC name, or
/// [`UNKNOWN_AMC`] when the best score does not clear 0.6.
pub fn resolve_amc(name: &str) -> &'static str {
    let (amc, score) = best_amc_match(name);
    if score > 0.6 { amc } else { UNKNOWN_AMC }
}

/// The catalog entry `line` starts with, if any (case-insensitive).
///
/// Detailed statements introduce each folio block with a bare AMC name line;
/// first catalog entry to match wins.
pub fn match_amc_prefix(line: &str) -> Option<&'static str> {
    let lower = line.to_lowercase();
    AMC_CATALOG
        .iter()
        .find(|amc| lower.starts_with(&amc.to_lowercase()))
        .copied()
}
