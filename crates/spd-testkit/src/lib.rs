//! Test doubles and fixtures for the order-entry crates.
//!
//! Everything here is deterministic and in-process; the scenario tests
//! under `tests/` drive the real session/draft/allocator code against the
//! [`FakeSheetStore`] instead of a live sheet backend.

pub mod fake_store;
pub mod fixtures;

pub use fake_store::FakeSheetStore;
