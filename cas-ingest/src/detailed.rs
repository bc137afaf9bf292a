//! Detailed-statement parser
//!
//! A detailed CAS lists every folio as a block:
//!
//!   HDFC Mutual Fund
//!   PAN: ABCDE1234F KYC: OK PAN: OK
//!   H123 - HDFC Flexi Cap Fund - ISIN : INF179K01CR2 Registrar : CAMS
//!   Folio No: 123456 / 78
//!   ANITA SHARMA
//!   Nominee 1: RAHUL SHARMA
//!   Opening Unit Balance: 0.000
//!   27-Oct-2024 1,000.00 101.2500 9.876 Purchase - SIP 9.876
//!   NAV on 31-Mar-2025: 104.5000 Market Value on 31-Mar-2025: INR 1,031.00
//!   Closing Unit Balance: 9.876 Total Cost Value: 1,000.00
//!
//! The parser walks trimmed lines once, carrying explicit state. Lines that
//! fit no event in the current state are inert; a malformed block degrades
//! to dropped records, never to a failed parse.

use anyhow::Result;
use cas_core::{
    CasType, Folio, Scheme, Statement, StatementPeriod, UNKNOWN_AMC, Valuation, is_date_token,
    match_amc_prefix, parse_signed_number, parse_statement_date,
};
use regex::Regex;

use crate::investor::extract_investor_info;
use crate::scheme_info::{SchemeInfo, SchemeInfoOutcome, extract_scheme_info};
use crate::txn_line::parse_transaction_line;

const FOLIO_PREFIX: &str = "Folio No:";

/// Where the scan is inside a folio block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Between blocks; only AMC lines and scheme headers matter
    Idle,
    /// Scheme header parsed, the folio number line should follow
    FolioExpected,
    /// Folio consumed, the holder-name line should follow
    NameExpected,
    /// Holder name consumed, an optional nominee line may follow
    NomineeExpected,
    /// Past the nominee line, waiting for the opening balance
    BalancesExpected,
    /// Opening balance seen, ledger rows accumulate until the closing line
    CollectingTransactions,
}

/// Single forward pass over trimmed lines with one line of lookahead
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        LineCursor {
            lines: text.lines().map(str::trim).collect(),
            pos: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied();
        self.pos += 1;
        line
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

struct Patterns {
    pan: Regex,
    kyc: Regex,
    pan_kyc: Regex,
    nominee_split: Regex,
    open_balance: Regex,
    close_balance: Regex,
    cost_value: Regex,
    nav_on: Regex,
    market_value: Regex,
    period: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        Ok(Patterns {
            pan: Regex::new(r"PAN\s*:\s*([A-Z]{5}\d{4}[A-Z])")?,
            kyc: Regex::new(r"KYC\s*:\s*(OK|NOT\s?OK)")?,
            pan_kyc: Regex::new(r"PAN\s*:\s*(OK|NOT\s?OK)")?,
            nominee_split: Regex::new(r"Nominee\s*\d*\s*:\s*")?,
            open_balance: Regex::new(r"Opening\s+Unit\s+Balance\s*:?\s*([\d,.()\-]+)")?,
            close_balance: Regex::new(r"Closing\s+Unit\s+Balance\s*:?\s*([\d,.()\-]+)")?,
            cost_value: Regex::new(r"Total\s+Cost\s+Value\s*:?\s*(?:INR\s*)?([\d,.()\-]+)")?,
            nav_on: Regex::new(
                r"NAV\s+on\s+(\d{2}-[A-Za-z]{3}-\d{4})\s*:?\s*(?:INR\s*)?([\d,.]+)",
            )?,
            market_value: Regex::new(
                r"Market\s+Value\s+on\s+\d{2}-[A-Za-z]{3}-\d{4}\s*:?\s*(?:INR\s*)?([\d,.]+)",
            )?,
            period: Regex::new(
                r"^(\d{2}-[A-Za-z]{3}-\d{4})\s+To\s+(\d{2}-[A-Za-z]{3}-\d{4})$",
            )?,
        })
    }

    /// A scheme-header trigger line carries a real PAN or a PAN/KYC status
    fn is_pan_line(&self, line: &str) -> bool {
        line.contains("PAN") && (self.pan.is_match(line) || self.pan_kyc.is_match(line))
    }
}

struct DetailedParser {
    pats: Patterns,
    state: ParseState,
    current_amc: Option<&'static str>,
    scheme: Option<Scheme>,
    folio_idx: Option<usize>,
    pending_pan: Option<String>,
    pending_kyc: Option<String>,
    pending_pan_kyc: Option<String>,
    folios: Vec<Folio>,
    period: Option<StatementPeriod>,
}

/// Parse a detailed (full-ledger) statement.
pub fn parse_detailed(text: &str) -> Result<Statement> {
    let mut statement = Statement::new(CasType::Detailed);
    statement.investor_info = extract_investor_info(text)?;

    let mut parser = DetailedParser {
        pats: Patterns::compile()?,
        state: ParseState::Idle,
        current_amc: None,
        scheme: None,
        folio_idx: None,
        pending_pan: None,
        pending_kyc: None,
        pending_pan_kyc: None,
        folios: Vec::new(),
        period: None,
    };
    parser.run(&mut LineCursor::new(text));

    statement.statement_period = parser.period;
    statement.folios = parser.folios;
    Ok(statement)
}

impl DetailedParser {
    fn run(&mut self, cursor: &mut LineCursor) {
        while let Some(line) = cursor.next_line() {
            if line.is_empty() {
                continue;
            }
            self.step(line, cursor);
        }
    }

    fn step(&mut self, line: &str, cursor: &mut LineCursor) {
        if self.period.is_none()
            && let Some(caps) = self.pats.period.captures(line)
            && let (Some(from), Some(to)) = (
                parse_statement_date(&caps[1]),
                parse_statement_date(&caps[2]),
            )
        {
            self.period = Some(StatementPeriod { from, to });
            return;
        }

        if let Some(amc) = match_amc_prefix(line) {
            self.current_amc = Some(amc);
            return;
        }

        if self.pats.is_pan_line(line) {
            self.open_scheme(line, cursor);
            return;
        }

        if self.state == ParseState::FolioExpected
            && let Some(rest) = line.strip_prefix(FOLIO_PREFIX)
        {
            self.enter_folio(rest.trim());
            return;
        }

        if self.state == ParseState::NameExpected && looks_like_holder_name(line) {
            // Holder name is consumed but not retained in the output model
            self.state = ParseState::NomineeExpected;
            return;
        }

        if self.state == ParseState::NomineeExpected && line.contains("Nominee") {
            self.capture_nominees(line);
            self.state = ParseState::BalancesExpected;
            return;
        }

        if line.contains("Opening Unit Balance") {
            self.open_balance(line);
            return;
        }

        if line.contains("Closing Unit Balance") {
            self.close_scheme(line);
            return;
        }

        if line.contains("NAV on") {
            self.capture_valuation(line);
            return;
        }

        if self.state == ParseState::CollectingTransactions && self.scheme.is_some() {
            self.try_transaction(line);
        }
        // Anything else is inert
    }

    /// Scheme header: PAN/KYC statuses on the trigger line, scheme info on
    /// the following line(s) with wrap recovery.
    fn open_scheme(&mut self, line: &str, cursor: &mut LineCursor) {
        let pan = self.pats.pan.captures(line).map(|c| c[1].to_string());
        let kyc = self.pats.kyc.captures(line).map(|c| c[1].to_string());
        let pan_kyc = self.pats.pan_kyc.captures(line).map(|c| c[1].to_string());

        match self.read_scheme_info(cursor) {
            Some(info) => {
                self.scheme = Some(new_scheme(info));
                self.pending_pan = pan;
                self.pending_kyc = kyc;
                self.pending_pan_kyc = pan_kyc;
                self.state = ParseState::FolioExpected;
            }
            None => {
                // Unrecoverable wrap: no scheme opened, following folio and
                // ledger lines stay inert until the next valid header
                self.scheme = None;
                self.state = ParseState::Idle;
            }
        }
    }

    /// Accumulate raw lines until the header parses, stopping at a blank
    /// line, a folio line, or another PAN line.
    fn read_scheme_info(&mut self, cursor: &mut LineCursor) -> Option<SchemeInfo> {
        let mut acc = String::new();
        loop {
            if !acc.is_empty()
                && let Ok(SchemeInfoOutcome::Parsed(info)) = extract_scheme_info(&acc)
            {
                return Some(info);
            }
            match cursor.peek() {
                Some(next)
                    if !next.is_empty()
                        && !next.starts_with(FOLIO_PREFIX)
                        && !self.pats.is_pan_line(next) =>
                {
                    if !acc.is_empty() {
                        acc.push(' ');
                    }
                    acc.push_str(next);
                    cursor.advance();
                }
                _ => return None,
            }
        }
    }

    /// Folio line: reuse the (folio, AMC) record if one exists, otherwise
    /// create it carrying the pending PAN/KYC statuses.
    fn enter_folio(&mut self, number: &str) {
        let amc = self.current_amc.unwrap_or(UNKNOWN_AMC);
        let existing = self
            .folios
            .iter()
            .position(|f| f.folio == number && f.amc == amc);
        self.folio_idx = Some(match existing {
            Some(idx) => idx,
            None => {
                self.folios.push(Folio {
                    folio: number.to_string(),
                    amc: amc.to_string(),
                    pan: self.pending_pan.take(),
                    kyc: self.pending_kyc.take(),
                    pan_kyc: self.pending_pan_kyc.take(),
                    schemes: Vec::new(),
                });
                self.folios.len() - 1
            }
        });
        self.pending_pan = None;
        self.pending_kyc = None;
        self.pending_pan_kyc = None;
        self.state = ParseState::NameExpected;
    }

    fn capture_nominees(&mut self, line: &str) {
        if let Some(scheme) = self.scheme.as_mut() {
            scheme.nominees = self
                .pats
                .nominee_split
                .split(line)
                .skip(1)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    fn open_balance(&mut self, line: &str) {
        if let Some(scheme) = self.scheme.as_mut()
            && let Some(caps) = self.pats.open_balance.captures(line)
            && let Some(value) = parse_signed_number(&caps[1])
        {
            scheme.open = value;
            scheme.close_calculated = value;
            self.state = ParseState::CollectingTransactions;
        }
    }

    /// Closing line finalizes the scheme: it is appended to its folio here
    /// and nowhere else, so a block that never reaches a closing line is
    /// silently dropped.
    fn close_scheme(&mut self, line: &str) {
        if let Some(mut scheme) = self.scheme.take() {
            if let Some(caps) = self.pats.close_balance.captures(line)
                && let Some(value) = parse_signed_number(&caps[1])
            {
                scheme.close = value;
            }
            if let Some(caps) = self.pats.cost_value.captures(line)
                && let Some(cost) = parse_signed_number(&caps[1])
            {
                scheme.valuation.cost = cost;
            }
            if let Some(idx) = self.folio_idx {
                self.folios[idx].schemes.push(scheme);
            }
        }
        self.folio_idx = None;
        self.state = ParseState::Idle;
    }

    fn capture_valuation(&mut self, line: &str) {
        if let Some(scheme) = self.scheme.as_mut() {
            if let Some(caps) = self.pats.nav_on.captures(line) {
                scheme.valuation.date = parse_statement_date(&caps[1]);
                scheme.valuation.nav = parse_signed_number(&caps[2]).unwrap_or(0.0);
            }
            if let Some(caps) = self.pats.market_value.captures(line) {
                scheme.valuation.value = parse_signed_number(&caps[1]).unwrap_or(0.0);
            }
        }
    }

    fn try_transaction(&mut self, line: &str) {
        if !looks_like_transaction(line) {
            return;
        }
        if let Some(txn) = parse_transaction_line(line)
            && let Some(scheme) = self.scheme.as_mut()
        {
            scheme.close_calculated += txn.units;
            scheme.transactions.push(txn);
        }
    }
}

fn new_scheme(info: SchemeInfo) -> Scheme {
    Scheme {
        scheme: info.scheme,
        isin: info.isin,
        amfi: None,
        advisor: info.advisor,
        rta_code: info.rta_code,
        rta: info.rta,
        nominees: Vec::new(),
        open: 0.0,
        close: 0.0,
        close_calculated: 0.0,
        valuation: Valuation::default(),
        transactions: Vec::new(),
    }
}

/// Holder-name lines start with an uppercase letter and have a plausible
/// length; the name itself is not part of the output model.
fn looks_like_holder_name(line: &str) -> bool {
    line.len() > 2
        && line.len() < 100
        && line.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Cheap gate before running the full row parser: leading 11 characters
/// must have the DD-Mon-YYYY shape.
fn looks_like_transaction(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() >= 11
        && b[2] == b'-'
        && b[6] == b'-'
        && line.is_char_boundary(11)
        && is_date_token(&line[..11])
}
