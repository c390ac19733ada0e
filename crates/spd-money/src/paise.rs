//! Fixed-point money type.
//!
//! # Scale
//!
//! All monetary values use a 1e-2 (paise) fixed-point representation stored
//! as `i64`: 1 rupee = `Paise(100)`. Order quantities are NOT money and stay
//! at the 1e-6 micros scale as plain `i64` (see [`crate::decimal`]); the two
//! scales never mix without an explicit conversion.
//!
//! # Why a newtype
//!
//! A raw `i64` rupee amount is indistinguishable from a quantity, a sequence
//! number, or a micros value at a different scale. `Paise` wraps the integer
//! so cross-scale arithmetic fails to compile. There is intentionally no
//! `From<i64>` impl; construction goes through [`Paise::new`] or
//! [`Paise::from_rupees`].

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A fixed-point monetary amount at 1e-2 scale (paise).
///
/// 1 rupee = `Paise(100)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Paise(i64);

impl Paise {
    /// Zero monetary amount.
    pub const ZERO: Paise = Paise(0);

    /// Maximum representable value.
    pub const MAX: Paise = Paise(i64::MAX);

    /// Minimum representable value.
    pub const MIN: Paise = Paise(i64::MIN);

    /// Construct from a raw paise count.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Paise(raw)
    }

    /// Construct from a whole-rupee count. Saturates at the `i64` bounds.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Paise(rupees.saturating_mul(100))
    }

    /// Extract the underlying raw paise count.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Saturating addition, clamping at [`Paise::MAX`] on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Paise) -> Paise {
        Paise(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction, clamping at [`Paise::MIN`] on underflow.
    #[inline]
    pub fn saturating_sub(self, rhs: Paise) -> Paise {
        Paise(self.0.saturating_sub(rhs.0))
    }

    /// `true` if this amount is strictly negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

// ---------------------------------------------------------------------------
// Arithmetic operators (closed over Paise)
// ---------------------------------------------------------------------------

impl Add for Paise {
    type Output = Paise;
    #[inline]
    fn add(self, rhs: Paise) -> Paise {
        Paise(self.0 + rhs.0)
    }
}

impl Sub for Paise {
    type Output = Paise;
    #[inline]
    fn sub(self, rhs: Paise) -> Paise {
        Paise(self.0 - rhs.0)
    }
}

impl Neg for Paise {
    type Output = Paise;
    #[inline]
    fn neg(self) -> Paise {
        Paise(-self.0)
    }
}

impl AddAssign for Paise {
    #[inline]
    fn add_assign(&mut self, rhs: Paise) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Paise {
    #[inline]
    fn sub_assign(&mut self, rhs: Paise) {
        self.0 -= rhs.0;
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Plain two-decimal rendering without grouping, for logs and debugging.
/// The customer-facing form is [`crate::inr::format_inr`].
impl std::fmt::Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rupees = self.0 / 100;
        let frac = (self.0 % 100).abs();
        // When |value| < 1 rupee and negative, rupees truncates to 0 and the
        // sign would be lost. Emit it explicitly.
        if self.0 < 0 && rupees == 0 {
            write!(f, "-{rupees}.{frac:02}")
        } else {
            write!(f, "{rupees}.{frac:02}")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_additive_identity() {
        let a = Paise::from_rupees(42);
        assert_eq!(a + Paise::ZERO, a);
        assert_eq!(Paise::ZERO + a, a);
    }

    #[test]
    fn from_rupees_scales_by_hundred() {
        assert_eq!(Paise::from_rupees(450).raw(), 45_000);
        assert_eq!(Paise::from_rupees(-1).raw(), -100);
    }

    #[test]
    fn add_and_sub_roundtrip() {
        let a = Paise::new(100_000);
        let b = Paise::new(25_050);
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn saturating_add_clamps_at_max() {
        assert_eq!(Paise::MAX.saturating_add(Paise::new(1)), Paise::MAX);
    }

    #[test]
    fn saturating_sub_clamps_at_min() {
        assert_eq!(Paise::MIN.saturating_sub(Paise::new(1)), Paise::MIN);
    }

    #[test]
    fn neg_produces_opposite_sign() {
        let pos = Paise::new(5_000);
        assert_eq!((-pos).raw(), -5_000);
        assert_eq!(-(-pos), pos);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut acc = Paise::new(10_000);
        acc += Paise::new(5_000);
        assert_eq!(acc, Paise::new(15_000));
    }

    #[test]
    fn display_two_decimal_places() {
        assert_eq!(Paise::new(123_450).to_string(), "1234.50");
        assert_eq!(Paise::new(5).to_string(), "0.05");
        assert_eq!(Paise::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_negative_below_one_rupee_keeps_sign() {
        assert_eq!(Paise::new(-50).to_string(), "-0.50");
        assert_eq!(Paise::new(-275).to_string(), "-2.75");
    }
}
