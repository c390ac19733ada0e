//! Indian numeral-grouping display format.
//!
//! # Contract
//!
//! - [`format_inr`] renders a [`Paise`] amount with exactly two decimal
//!   places and the Indian grouping convention: the last three integer
//!   digits form one group, every preceding group has two digits
//!   (`12,34,567.50`).
//! - [`parse_inr`] strips grouping commas and parses; for every amount the
//!   micros scale can hold (magnitudes up to about 9.2 trillion rupees),
//!   `parse_inr(&format_inr(x)) == Ok(x)`. Beyond that ceiling the text
//!   still formats but no longer re-parses. Stored rows are re-read through
//!   this inverse when totals are computed, so the pair must stay exact
//!   across that whole range.
//! - [`format_inr_lossy`] formats raw sheet text and yields `"0.00"` on any
//!   parse failure; a bad catalog cell must never abort an order flow.

use crate::decimal::{micros_to_paise, to_micros, MoneyError};
use crate::paise::Paise;

/// Render an amount with two decimals and Indian digit grouping.
pub fn format_inr(amount: Paise) -> String {
    let raw = amount.raw();
    let rupees = raw / 100;
    let frac = (raw % 100).abs();
    let sign = if raw < 0 { "-" } else { "" };
    let grouped = group_indian(&rupees.abs().to_string());
    format!("{sign}{grouped}.{frac:02}")
}

/// Parse a grouped amount back to [`Paise`]. Commas are stripped wherever
/// they appear; the remainder must be a plain decimal.
pub fn parse_inr(text: &str) -> Result<Paise, MoneyError> {
    let stripped = text.replace(',', "");
    Ok(micros_to_paise(to_micros(&stripped)?))
}

/// Format raw decimal text (typically a catalog rate cell) for display.
///
/// Unparseable input renders as `"0.00"` instead of failing.
pub fn format_inr_lossy(raw: &str) -> String {
    match to_micros(raw) {
        Ok(micros) => format_inr(micros_to_paise(micros)),
        Err(_) => "0.00".to_string(),
    }
}

/// Group an unsigned digit string the Indian way: last three digits, then
/// pairs of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut chunks: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        chunks.push(&head[end - 2..end]);
        end -= 2;
    }
    chunks.push(&head[..end]);
    chunks.reverse();
    format!("{},{}", chunks.join(","), tail)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
