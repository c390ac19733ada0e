//! Deterministic decimal-text conversion.
//!
//! Quantities and catalog rates arrive as user- or sheet-entered text
//! (`"3.5"`, `"450"`, `"0.125"`). This module converts that text to integer
//! micros (1 unit = 1_000_000 micros), derives line amounts, and renders
//! quantities back in their canonical minimal form. All arithmetic is
//! integer; rounding is half away from zero and happens at most once per
//! value.

use std::fmt;

use crate::paise::Paise;

/// Micros per whole unit.
const MICROS: i64 = 1_000_000;

/// Micros per paise (1e-6 rupees per 1e-2 rupees).
const MICROS_PER_PAISE: i64 = 10_000;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while interpreting decimal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input was empty or whitespace-only.
    Empty,
    /// The input contained anything other than an optionally signed decimal.
    Unparseable { raw: String },
    /// The value does not fit the `i64` micros range.
    OutOfRange { raw: String },
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::Empty => write!(f, "decimal text is empty"),
            MoneyError::Unparseable { raw } => {
                write!(f, "decimal text could not be parsed: '{raw}'")
            }
            MoneyError::OutOfRange { raw } => {
                write!(f, "decimal value out of range: '{raw}'")
            }
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Text -> micros
// ---------------------------------------------------------------------------

/// Convert a decimal string to integer micros.
///
/// Rules:
/// - Accepts an optional leading `+` or `-` and an optional fractional part
///   separated by `.`.
/// - Fractional digits beyond the sixth round half away from zero.
/// - Rejects empty strings, non-digit characters, and multiple `.`
///   separators.
/// - No floating point at any stage.
pub fn to_micros(text: &str) -> Result<i64, MoneyError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MoneyError::Empty);
    }

    let (negative, digits) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(MoneyError::Unparseable {
            raw: text.to_string(),
        });
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(MoneyError::Unparseable {
            raw: text.to_string(),
        });
    }

    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<i64>().map_err(|_| MoneyError::OutOfRange {
            raw: text.to_string(),
        })?
    };

    // Keep six fractional digits; a seventh of 5 or more rounds the sixth up.
    let (kept, round_up) = if frac_part.len() > 6 {
        let seventh = frac_part.as_bytes()[6] - b'0';
        (&frac_part[..6], seventh >= 5)
    } else {
        (frac_part, false)
    };

    let mut frac_padded = kept.to_string();
    while frac_padded.len() < 6 {
        frac_padded.push('0');
    }
    let frac_val: i64 = frac_padded
        .parse::<i64>()
        .map_err(|_| MoneyError::Unparseable {
            raw: text.to_string(),
        })?;

    let magnitude = int_val
        .checked_mul(MICROS)
        .and_then(|v| v.checked_add(frac_val))
        .and_then(|v| v.checked_add(i64::from(round_up)))
        .ok_or_else(|| MoneyError::OutOfRange {
            raw: text.to_string(),
        })?;

    Ok(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Micros -> paise
// ---------------------------------------------------------------------------

/// Round a micros amount to whole paise, half away from zero.
pub fn micros_to_paise(micros: i64) -> Paise {
    let quotient = micros / MICROS_PER_PAISE;
    let remainder = micros % MICROS_PER_PAISE;
    if remainder.abs() >= MICROS_PER_PAISE / 2 {
        Paise::new(quotient + remainder.signum())
    } else {
        Paise::new(quotient)
    }
}

/// Derive a line amount from a quantity and a per-unit rate, both in micros.
///
/// The product is taken in `i128` (1e-12 scale) and rounded half away from
/// zero to paise. Returns `None` when the result does not fit `i64` paise;
/// callers must handle that explicitly.
pub fn line_amount(qty_micros: i64, rate_micros: i64) -> Option<Paise> {
    const PAISE_DIV: i128 = 10_000_000_000;
    let product = i128::from(qty_micros) * i128::from(rate_micros);
    let quotient = product / PAISE_DIV;
    let remainder = product % PAISE_DIV;
    let rounded = if remainder.abs() >= PAISE_DIV / 2 {
        quotient + remainder.signum()
    } else {
        quotient
    };
    i64::try_from(rounded).ok().map(Paise::new)
}

// ---------------------------------------------------------------------------
// Micros -> canonical quantity text
// ---------------------------------------------------------------------------

/// Render a quantity in its minimal decimal form: no trailing fractional
/// zeros and no fractional point for whole values (`3_500_000` -> `"3.5"`,
/// `3_000_000` -> `"3"`).
pub fn canonical_quantity(micros: i64) -> String {
    let int = micros / MICROS;
    let frac = (micros % MICROS).abs();
    let sign = if micros < 0 && int == 0 { "-" } else { "" };
    if frac == 0 {
        return format!("{sign}{int}");
    }
    let mut frac_s = format!("{frac:06}");
    let keep = frac_s.trim_end_matches('0').len();
    frac_s.truncate(keep);
    format!("{sign}{int}.{frac_s}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- to_micros ---

    #[test]
    fn micros_whole_number() {
        assert_eq!(to_micros("450").unwrap(), 450_000_000);
    }

    #[test]
    fn micros_two_decimal_places() {
        assert_eq!(to_micros("182.34").unwrap(), 182_340_000);
    }

    #[test]
    fn micros_trailing_zeros_padded() {
        assert_eq!(to_micros("3.5").unwrap(), 3_500_000);
        assert_eq!(to_micros("3.500000").unwrap(), 3_500_000);
    }

    #[test]
    fn micros_leading_dot() {
        assert_eq!(to_micros(".5").unwrap(), 500_000);
    }

    #[test]
    fn micros_negative_and_explicit_plus() {
        assert_eq!(to_micros("-2.5").unwrap(), -2_500_000);
        assert_eq!(to_micros("+2.5").unwrap(), 2_500_000);
    }

    #[test]
    fn micros_seventh_digit_rounds_half_away() {
        assert_eq!(to_micros("1.0000004").unwrap(), 1_000_000);
        assert_eq!(to_micros("1.0000005").unwrap(), 1_000_001);
        assert_eq!(to_micros("-1.0000005").unwrap(), -1_000_001);
        // Digits past the seventh do not influence the rounding.
        assert_eq!(to_micros("1.00000049999").unwrap(), 1_000_000);
    }

    #[test]
    fn micros_rounding_carries_into_integer_part() {
        assert_eq!(to_micros("1.9999999").unwrap(), 2_000_000);
    }

    #[test]
    fn micros_rejects_empty_and_whitespace() {
        assert_eq!(to_micros("").unwrap_err(), MoneyError::Empty);
        assert_eq!(to_micros("   ").unwrap_err(), MoneyError::Empty);
    }

    #[test]
    fn micros_rejects_alpha() {
        assert!(matches!(
            to_micros("abc").unwrap_err(),
            MoneyError::Unparseable { .. }
        ));
    }

    #[test]
    fn micros_rejects_lone_sign_and_lone_dot() {
        assert!(matches!(
            to_micros("-").unwrap_err(),
            MoneyError::Unparseable { .. }
        ));
        assert!(matches!(
            to_micros(".").unwrap_err(),
            MoneyError::Unparseable { .. }
        ));
    }

    #[test]
    fn micros_rejects_multiple_dots() {
        assert!(matches!(
            to_micros("1.2.3").unwrap_err(),
            MoneyError::Unparseable { .. }
        ));
    }

    #[test]
    fn micros_rejects_grouped_text() {
        // Comma stripping is the INR parser's job, not this layer's.
        assert!(matches!(
            to_micros("1,000").unwrap_err(),
            MoneyError::Unparseable { .. }
        ));
    }

    #[test]
    fn micros_out_of_range() {
        assert!(matches!(
            to_micros("99999999999999999999").unwrap_err(),
            MoneyError::OutOfRange { .. }
        ));
    }

    // --- micros_to_paise ---

    #[test]
    fn paise_rounds_half_away_from_zero() {
        assert_eq!(micros_to_paise(4_999).raw(), 0);
        assert_eq!(micros_to_paise(5_000).raw(), 1);
        assert_eq!(micros_to_paise(-5_000).raw(), -1);
        assert_eq!(micros_to_paise(-4_999).raw(), 0);
    }

    #[test]
    fn paise_exact_conversion() {
        // 999.995 rupees = 999_995_000 micros -> 100_000 paise (1000.00).
        assert_eq!(micros_to_paise(999_995_000).raw(), 100_000);
        assert_eq!(micros_to_paise(450_000_000).raw(), 45_000);
    }

    // --- line_amount ---

    #[test]
    fn line_amount_simple() {
        // 3.5 units at 450 rupees -> 1575.00 rupees.
        let amount = line_amount(3_500_000, 450_000_000).unwrap();
        assert_eq!(amount, Paise::new(157_500));
    }

    #[test]
    fn line_amount_rounds_half_away() {
        // 0.5 x 0.01 rupees = 0.005 rupees -> 1 paise (not 0).
        let amount = line_amount(500_000, 10_000).unwrap();
        assert_eq!(amount, Paise::new(1));
    }

    #[test]
    fn line_amount_sub_half_paise_rounds_down() {
        // 0.4 x 0.01 rupees = 0.004 rupees -> 0 paise.
        let amount = line_amount(400_000, 10_000).unwrap();
        assert_eq!(amount, Paise::ZERO);
    }

    #[test]
    fn line_amount_overflow_returns_none() {
        assert_eq!(line_amount(i64::MAX, i64::MAX), None);
    }

    // --- canonical_quantity ---

    #[test]
    fn canonical_drops_trailing_zeros() {
        assert_eq!(canonical_quantity(3_500_000), "3.5");
        assert_eq!(canonical_quantity(3_000_000), "3");
        assert_eq!(canonical_quantity(125_000), "0.125");
    }

    #[test]
    fn canonical_preserves_significant_fraction() {
        assert_eq!(canonical_quantity(1_000_001), "1.000001");
    }

    #[test]
    fn canonical_negative_below_one() {
        assert_eq!(canonical_quantity(-500_000), "-0.5");
        assert_eq!(canonical_quantity(-3_500_000), "-3.5");
    }
}
