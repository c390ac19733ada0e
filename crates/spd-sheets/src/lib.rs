//! Sheet-backed row store boundary.
//!
//! The remote store exposes exactly two operations per spreadsheet: read
//! every row of a named sheet, and append a batch of rows. There is no
//! server-side filter, no row update, and no atomic counter; everything
//! smarter than "read all" or "append these" happens on this side of the
//! boundary.
//!
//! This crate owns the [`SheetStore`] trait and the concrete HTTP client.
//! It does **not** allocate order ids or validate drafts; callers fetch rows
//! and hand them to `spd-order`.

use std::fmt;

use serde::{Deserialize, Serialize};
use spd_schemas::{CustomerRow, OrderRow, ProductRow, CUSTOMER_SHEET, ORDER_SHEET, PRODUCT_SHEET};
use tracing::debug;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that a [`SheetStore`] implementation may return.
#[derive(Debug)]
pub enum SheetError {
    /// A required configuration value (e.g. the store URL) is missing or invalid.
    Config(String),
    /// Network or transport failure.
    Transport(String),
    /// The store returned a non-success HTTP status.
    Api { status: u16, message: String },
    /// A response payload could not be decoded.
    Decode(String),
    /// An append response arrived without a positive `created` count.
    AppendNotConfirmed,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Config(msg) => write!(f, "config error: {msg}"),
            SheetError::Transport(msg) => write!(f, "transport error: {msg}"),
            SheetError::Api { status, message } => {
                write!(f, "sheet api error status={status}: {message}")
            }
            SheetError::Decode(msg) => write!(f, "decode error: {msg}"),
            SheetError::AppendNotConfirmed => {
                write!(f, "append was not confirmed by the store")
            }
        }
    }
}

impl std::error::Error for SheetError {}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Remote row-store contract.
///
/// Implementations must be `Send + Sync` so a store handle can be shared
/// across async task boundaries, and object-safe so callers can hold an
/// `Arc<dyn SheetStore>` without knowing the concrete type.
#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    /// Human-readable name identifying this store (e.g. `"sheetdb"`).
    fn source_name(&self) -> &'static str;

    /// Read every row of the product catalog sheet.
    async fn read_products(&self) -> Result<Vec<ProductRow>, SheetError>;

    /// Read every row of the customer master sheet.
    async fn read_customers(&self) -> Result<Vec<CustomerRow>, SheetError>;

    /// Read every row of the order sheet.
    async fn read_orders(&self) -> Result<Vec<OrderRow>, SheetError>;

    /// Append a batch of order rows in one call.
    ///
    /// The whole batch lands or none of it does. Returns the number of rows
    /// the store reported as created.
    async fn append_orders(&self, rows: &[OrderRow]) -> Result<usize, SheetError>;
}

// ---------------------------------------------------------------------------
// SheetDB client
// ---------------------------------------------------------------------------

/// SheetDB-backed store.
///
/// The base URL carries the API identity and is read by the caller (CLI)
/// and passed in; do not log it.
#[derive(Debug, Clone)]
pub struct SheetDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetDbClient {
    pub fn new(base_url: String) -> Result<Self, SheetError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SheetError::Config("sheet store base url is empty".into()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    async fn read_sheet<T>(&self, sheet: &'static str) -> Result<Vec<T>, SheetError>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("sheet", sheet)])
            .send()
            .await
            .map_err(|e| SheetError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<T> = resp
            .json()
            .await
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        debug!(sheet, rows = rows.len(), "sheet read");
        Ok(rows)
    }
}

/// Append request envelope: `{"data": [rows...]}`.
#[derive(Serialize)]
struct AppendRequest<'a> {
    data: &'a [OrderRow],
}

#[derive(Deserialize)]
struct AppendResponse {
    #[serde(default)]
    created: Option<u64>,
}

#[async_trait::async_trait]
impl SheetStore for SheetDbClient {
    fn source_name(&self) -> &'static str {
        "sheetdb"
    }

    async fn read_products(&self) -> Result<Vec<ProductRow>, SheetError> {
        self.read_sheet(PRODUCT_SHEET).await
    }

    async fn read_customers(&self) -> Result<Vec<CustomerRow>, SheetError> {
        self.read_sheet(CUSTOMER_SHEET).await
    }

    async fn read_orders(&self) -> Result<Vec<OrderRow>, SheetError> {
        self.read_sheet(ORDER_SHEET).await
    }

    async fn append_orders(&self, rows: &[OrderRow]) -> Result<usize, SheetError> {
        let resp = self
            .http
            .post(&self.base_url)
            .json(&AppendRequest { data: rows })
            .send()
            .await
            .map_err(|e| SheetError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: AppendResponse = resp
            .json()
            .await
            .map_err(|e| SheetError::Decode(e.to_string()))?;

        match body.created {
            Some(created) if created > 0 => {
                debug!(rows = created, "order rows appended");
                Ok(created as usize)
            }
            _ => Err(SheetError::AppendNotConfirmed),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests (mock server, no live store)
// ---------------------------------------------------------------------------
