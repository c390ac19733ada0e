//! Financial-year derivation.
//!
//! Deterministic, pure logic. No IO, no wall-clock.
//!
//! Financial years run April through March: a date in April 2024 or later
//! belongs to FY 2024-2025, a date in March 2024 still belongs to FY
//! 2023-2024. The rendered label doubles as the order-id prefix, so its
//! exact form (`"{start}-{start+1}"`) is load-bearing.

use chrono::{Datelike, NaiveDate};

/// A financial year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinancialYear {
    start: i32,
}

impl FinancialYear {
    /// The financial year containing `date`. April starts a new year.
    pub fn from_date(date: NaiveDate) -> Self {
        let start = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        FinancialYear { start }
    }

    /// The financial year starting in calendar year `start`.
    pub fn starting(start: i32) -> Self {
        FinancialYear { start }
    }

    /// Calendar year this financial year starts in.
    pub fn start_year(self) -> i32 {
        self.start
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.start + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
