//! Fixed-point rupee amounts and the Indian numeral-grouping display format.
//!
//! Everything here is integer arithmetic. Quantities and rates arrive as
//! decimal text, are parsed to 1e-6 micros, multiplied in `i128`, and
//! rounded to whole paise exactly once. No `f64` appears at any stage, so
//! a formatted amount always parses back to the same [`Paise`] value.

pub mod decimal;
pub mod inr;
pub mod paise;

pub use decimal::{canonical_quantity, line_amount, micros_to_paise, to_micros, MoneyError};
pub use inr::{format_inr, format_inr_lossy, parse_inr};
pub use paise::Paise;
