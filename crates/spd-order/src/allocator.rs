//! Order-id allocation by scanning previously issued ids.
//!
//! # Contract
//!
//! Ids look like `2024-2025_00042`: the financial-year label, an
//! underscore, and a zero-padded sequence. The allocator never talks to the
//! store itself; callers read the order sheet and pass the ids in.
//!
//! The store offers no read-modify-write primitive, so allocation is a
//! plain scan/max/increment: two sessions scanning the same snapshot mint
//! the same id. [`AllocatedOrderId`] records which path produced an id so
//! downstream review can tell an authoritative scan from the random
//! fallback used when the scan itself fails.

use rand::Rng;

use crate::fy::FinancialYear;

/// How an order id came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderIdProvenance {
    /// Derived from a scan of previously issued ids.
    Scanned,
    /// Random stand-in issued because the scan failed. May collide.
    RandomFallback,
}

/// An order identifier plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedOrderId {
    pub id: String,
    pub provenance: OrderIdProvenance,
}

impl AllocatedOrderId {
    /// `true` when the id came from the random fallback rather than a scan.
    pub fn is_advisory(&self) -> bool {
        self.provenance == OrderIdProvenance::RandomFallback
    }
}

/// Next sequential id for `fy`, given every previously issued id.
///
/// Ids from other financial years are skipped. The segment after the first
/// underscore must parse as an unsigned integer in full; anything else
/// (hand-typed ids, stray rows) is skipped silently rather than failing the
/// scan. With no qualifying ids the sequence starts at 1. The rows are
/// hand-editable, so the increment saturates at the `u64` ceiling instead
/// of wrapping back to a low, already-issued sequence.
pub fn next_order_id<'a, I>(fy: FinancialYear, existing_ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let label = fy.to_string();
    let mut max_seen: u64 = 0;
    for id in existing_ids {
        let mut parts = id.split('_');
        if parts.next() != Some(label.as_str()) {
            continue;
        }
        let seq = match parts.next() {
            Some(s) => s,
            None => continue,
        };
        let seq: u64 = match seq.parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        max_seen = max_seen.max(seq);
    }
    format!("{label}_{:05}", max_seen.saturating_add(1))
}

/// Advisory stand-in for when the order sheet cannot be read: the same
/// prefix with a uniformly random five-digit sequence. Collisions with
/// issued ids are possible; callers must carry the
/// [`OrderIdProvenance::RandomFallback`] tag alongside.
pub fn fallback_order_id<R: Rng>(fy: FinancialYear, rng: &mut R) -> String {
    let seq: u32 = rng.gen_range(0..=99_999);
    format!("{fy}_{seq:05}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
