//! Order timestamp rendering.

use chrono::NaiveDateTime;

/// Format a local timestamp as `DD/MM/YYYY hh:mm AM/PM`.
///
/// Twelve-hour clock, all fields zero-padded; midnight and noon both render
/// their hour as `12`. This exact shape is what the order sheet's existing
/// rows carry, so it must not drift.
pub fn format_order_timestamp(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %I:%M %p").to_string()
}
