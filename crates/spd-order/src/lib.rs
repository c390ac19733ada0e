//! Order recording core: financial-year ids, draft assembly, submission.
//!
//! The remote store can only "read every row" and "append a batch", so all
//! order semantics live on this side: sequential id allocation is a scan
//! over previously issued ids, validation happens before a line enters the
//! draft, and a submission is one batch append that either lands whole or
//! leaves the draft intact for retry.

pub mod allocator;
pub mod draft;
pub mod error;
pub mod fy;
pub mod session;
pub mod timestamp;

pub use allocator::{fallback_order_id, next_order_id, AllocatedOrderId, OrderIdProvenance};
pub use draft::{OrderDraftBuilder, OrderLineItem};
pub use error::ValidationError;
pub use fy::FinancialYear;
pub use session::{customers_starting_with, OrderSession, SubmitError, SubmitReport};
pub use timestamp::format_order_timestamp;
