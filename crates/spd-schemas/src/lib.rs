//! Row types shared across the sheet-backed order store.
//!
//! Field names mirror the remote spreadsheet column headers verbatim (via
//! serde renames); the store matches columns by header text, so these
//! strings are part of the wire contract and must never be "cleaned up".

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sheet names and fixed cell values
// ---------------------------------------------------------------------------

/// Sheet holding the product catalog.
pub const PRODUCT_SHEET: &str = "Product_Master";

/// Sheet holding the customer master list.
pub const CUSTOMER_SHEET: &str = "Customer_Master";

/// Sheet that order rows are appended to.
pub const ORDER_SHEET: &str = "New_Order_Table";

/// `SOURCE` value stamped on every row this system appends.
pub const SOURCE_TAG: &str = "App";

/// The only unit of measure the order flow issues.
pub const UNIT_LABEL: &str = "Unit";

/// Initial `APPROVED BY MANAGER: Y/N` value for a freshly appended row.
pub const APPROVAL_PENDING: &str = "N";

/// Initial `ORDER DISPATCHED: Y/N/P` value for a freshly appended row.
pub const DISPATCH_PENDING: &str = "N";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One row of the product catalog sheet.
///
/// Absent cells decode as `""`, except `rate` which decodes as `"0"` so a
/// half-filled catalog row still prices to zero instead of failing decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "Product GROUP CODE", default)]
    pub group_code: String,
    #[serde(rename = "Product Group Name", default)]
    pub group_name: String,
    #[serde(rename = "Product CODE", default)]
    pub product_code: String,
    #[serde(rename = "Product NAME", default)]
    pub product_name: String,
    #[serde(rename = "Rate", default = "zero_rate")]
    pub rate: String,
}

fn zero_rate() -> String {
    "0".to_string()
}

/// One row of the customer master sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    #[serde(rename = "Customer CODE", default)]
    pub code: String,
    #[serde(rename = "Customer NAME", default)]
    pub name: String,
}

/// One row of the order sheet.
///
/// Quantity, rate and amount are carried as display text: quantity in its
/// canonical decimal rendering, rate and amount in Indian numeral grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    #[serde(rename = "DATE-TIME", default)]
    pub date_time: String,
    #[serde(rename = "USER", default)]
    pub user: String,
    #[serde(rename = "CUSTOMER NAME", default)]
    pub customer_name: String,
    #[serde(rename = "ORDER ID", default)]
    pub order_id: String,
    #[serde(rename = "PRODUCT NAME", default)]
    pub product_name: String,
    #[serde(rename = "QUANTITY", default)]
    pub quantity: String,
    #[serde(rename = "UNIT", default)]
    pub unit: String,
    #[serde(rename = "PRODUCT RATE", default)]
    pub rate: String,
    #[serde(rename = "ORDER AMOUNT", default)]
    pub amount: String,
    #[serde(rename = "SOURCE", default)]
    pub source: String,
    #[serde(rename = "APPROVED BY MANAGER: Y/N", default)]
    pub approved_by_manager: String,
    #[serde(rename = "ORDER DISPATCHED: Y/N/P", default)]
    pub dispatched: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
