//! Investor contact extraction
//!
//! Both statement variants print the investor block the same way: an email
//! line, the investor name on the next line, postal address lines, then a
//! mobile number. Every field is optional and extracted independently.

use anyhow::Result;
use cas_core::InvestorInfo;
use regex::Regex;

const MAX_ADDRESS_LINES: usize = 5;

/// Pull email/name/mobile/address out of the document header block.
///
/// The email line anchors the block; without one, only the mobile number is
/// still searched for. Absence of any field is valid.
pub fn extract_investor_info(text: &str) -> Result<InvestorInfo> {
    let email_re = Regex::new(r"[A-Za-z0-9][A-Za-z0-9.+_-]*@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+")?;
    let mobile_re = Regex::new(r"^(?:\+91[-\s]?)?\d{10}$")?;
    let mobile_labelled_re = Regex::new(r"Mobile\s*:?\s*((?:\+91[-\s]?)?\d{10})")?;

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut info = InvestorInfo::default();

    let anchor = lines.iter().position(|l| email_re.is_match(l));
    if let Some(pos) = anchor {
        info.email = email_re.find(lines[pos]).map(|m| m.as_str().to_string());

        // Name is the next non-empty line
        let mut j = pos + 1;
        while j < lines.len() && lines[j].is_empty() {
            j += 1;
        }
        if j < lines.len() {
            info.name = Some(lines[j].to_string());
            j += 1;
        }

        // Address lines follow until the mobile number
        let mut address = Vec::new();
        while j < lines.len() && address.len() < MAX_ADDRESS_LINES {
            let line = lines[j];
            j += 1;
            if line.is_empty() {
                continue;
            }
            if mobile_re.is_match(line) {
                info.mobile = Some(line.to_string());
                break;
            }
            if let Some(c) = mobile_labelled_re.captures(line) {
                info.mobile = Some(c[1].to_string());
                break;
            }
            if line.contains("Folio No") || line.contains("Market Value") {
                break;
            }
            address.push(line.to_string());
        }
        if !address.is_empty() {
            info.address = Some(address.join(", "));
        }
    }

    // Fallback: some layouts label the number instead of printing it bare
    if info.mobile.is_none() {
        info.mobile = mobile_labelled_re
            .captures(text)
            .map(|c| c[1].to_string());
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_block() {
        let text = "\
Consolidated Account Statement

investor@example.com
ANITA SHARMA
12 MG Road
Bengaluru 560001
9876543210

Folio No: 123456
";
        let info = extract_investor_info(text).unwrap();
        assert_eq!(info.email.as_deref(), Some("investor@example.com"));
        assert_eq!(info.name.as_deref(), Some("ANITA SHARMA"));
        assert_eq!(info.address.as_deref(), Some("12 MG Road, Bengaluru 560001"));
        assert_eq!(info.mobile.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_labelled_mobile_fallback() {
        let text = "Email Id: a@b.co\nRAVI\nMobile: +91 9876543210\n";
        let info = extract_investor_info(text).unwrap();
        assert_eq!(info.email.as_deref(), Some("a@b.co"));
        assert_eq!(info.mobile.as_deref(), Some("+91 9876543210"));
    }

    #[test]
    fn test_all_fields_optional() {
        let info = extract_investor_info("no contact details here\n").unwrap();
        assert_eq!(info, InvestorInfo::default());
    }
}
