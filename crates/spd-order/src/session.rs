//! One order-entry session against the sheet store.
//!
//! Mirrors the entry flow end to end: opening a session fetches the product
//! catalog and allocates an order id concurrently (the two reads are
//! independent), line items accumulate through the draft, and submission is
//! a single batch append. The draft survives a failed submission so the
//! operator can retry; it is cleared only when the store confirms the
//! batch. There are no automatic retries anywhere in this flow.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::{info, warn};

use spd_money::Paise;
use spd_schemas::{CustomerRow, ProductRow};
use spd_sheets::{SheetError, SheetStore};

use crate::allocator::{fallback_order_id, next_order_id, AllocatedOrderId, OrderIdProvenance};
use crate::draft::{OrderDraftBuilder, OrderLineItem};
use crate::error::ValidationError;
use crate::fy::FinancialYear;

// ---------------------------------------------------------------------------
// Submission outcome
// ---------------------------------------------------------------------------

/// Outcome of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub order_id: String,
    /// Row count the store confirmed as created.
    pub rows_created: usize,
}

/// Why a submission did not go through.
#[derive(Debug)]
pub enum SubmitError {
    /// The draft failed validation; nothing was sent.
    Validation(ValidationError),
    /// The store rejected or failed the append; the draft is retained.
    Remote(SheetError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Validation(e) => write!(f, "submission rejected: {e}"),
            SubmitError::Remote(e) => write!(f, "submission failed: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

// ---------------------------------------------------------------------------
// Customer lookup
// ---------------------------------------------------------------------------

/// Customers whose display name starts with `letter` (uppercased).
///
/// The store has no server-side filter; every row is read and the filtering
/// happens here. A failed read degrades to an empty listing, warn-logged,
/// the same way a failed catalog read degrades at session open. Standalone
/// so a listing does not require opening a session.
pub async fn customers_starting_with(store: &dyn SheetStore, letter: char) -> Vec<CustomerRow> {
    let letter = letter.to_ascii_uppercase();
    let rows = match store.read_customers().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                store = store.source_name(),
                error = %e,
                "customer read failed, listing no customers"
            );
            return Vec::new();
        }
    };
    rows.into_iter()
        .filter(|r| r.name.starts_with(letter))
        .collect()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single order-entry session.
///
/// Holds the catalog snapshot and the order id taken at open; the id is
/// computed once and never rescanned, so everything this session submits
/// shares it.
pub struct OrderSession {
    store: Arc<dyn SheetStore>,
    fy: FinancialYear,
    catalog: Vec<ProductRow>,
    order_id: AllocatedOrderId,
    draft: OrderDraftBuilder,
}

impl OrderSession {
    /// Open a session for `today` with an entropy-seeded fallback RNG.
    pub async fn open(store: Arc<dyn SheetStore>, today: NaiveDate) -> Self {
        use rand::SeedableRng;
        Self::open_with_rng(store, today, rand::rngs::StdRng::from_entropy()).await
    }

    /// As [`OrderSession::open`], with the fallback RNG injected.
    ///
    /// The catalog read and the order scan are independent and run
    /// concurrently. A failed catalog read degrades to an empty catalog; a
    /// failed order scan degrades to an advisory random id. Neither aborts
    /// the session.
    pub async fn open_with_rng<R: Rng>(
        store: Arc<dyn SheetStore>,
        today: NaiveDate,
        mut rng: R,
    ) -> Self {
        let fy = FinancialYear::from_date(today);
        let (products, orders) = tokio::join!(store.read_products(), store.read_orders());

        let catalog = match products {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    store = store.source_name(),
                    error = %e,
                    "product catalog read failed, starting with an empty catalog"
                );
                Vec::new()
            }
        };

        let order_id = match orders {
            Ok(rows) => AllocatedOrderId {
                id: next_order_id(fy, rows.iter().map(|r| r.order_id.as_str())),
                provenance: OrderIdProvenance::Scanned,
            },
            Err(e) => {
                let id = fallback_order_id(fy, &mut rng);
                warn!(
                    store = store.source_name(),
                    error = %e,
                    order_id = %id,
                    "order scan failed, issued advisory fallback id"
                );
                AllocatedOrderId {
                    id,
                    provenance: OrderIdProvenance::RandomFallback,
                }
            }
        };

        info!(
            order_id = %order_id.id,
            products = catalog.len(),
            "order session opened"
        );

        Self {
            store,
            fy,
            catalog,
            order_id,
            draft: OrderDraftBuilder::new(),
        }
    }

    /// Product catalog snapshot taken when the session opened.
    pub fn catalog(&self) -> &[ProductRow] {
        &self.catalog
    }

    /// The id everything in this session will submit under.
    pub fn order_id(&self) -> &AllocatedOrderId {
        &self.order_id
    }

    pub fn financial_year(&self) -> FinancialYear {
        self.fy
    }

    /// As [`customers_starting_with`], against this session's store.
    pub async fn customers_starting_with(&self, letter: char) -> Vec<CustomerRow> {
        customers_starting_with(self.store.as_ref(), letter).await
    }

    /// Select the product for the next line from the session catalog.
    pub fn select_product(&mut self, code: &str) -> Option<&ProductRow> {
        self.draft.select_product(code, &self.catalog)
    }

    /// Record the quantity text for the next line.
    pub fn set_quantity(&mut self, raw: &str) {
        self.draft.set_quantity(raw);
    }

    /// Validate the pending selection into a line item.
    pub fn add_line_item(&mut self) -> Result<OrderLineItem, ValidationError> {
        self.draft.add_line_item()
    }

    /// Line items entered so far.
    pub fn line_items(&self) -> &[OrderLineItem] {
        self.draft.lines()
    }

    /// Running order total.
    pub fn compute_total(&self) -> Paise {
        self.draft.compute_total()
    }

    /// Submit the draft as one batch append.
    ///
    /// On success the draft is cleared and the confirmed row count is
    /// returned. On any failure the draft is kept so the submission can be
    /// retried as-is.
    pub async fn submit(
        &mut self,
        customer: &str,
        user: &str,
        placed_at: NaiveDateTime,
    ) -> Result<SubmitReport, SubmitError> {
        let rows = self
            .draft
            .to_submission_rows(customer, &self.order_id.id, user, placed_at)
            .map_err(SubmitError::Validation)?;

        let rows_created = self
            .store
            .append_orders(&rows)
            .await
            .map_err(SubmitError::Remote)?;

        self.draft.clear();
        info!(
            order_id = %self.order_id.id,
            rows = rows_created,
            "order submitted"
        );
        Ok(SubmitReport {
            order_id: self.order_id.id.clone(),
            rows_created,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
