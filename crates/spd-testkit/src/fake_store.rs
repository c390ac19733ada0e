//! Minimal fake sheet store used ONLY for tests.

use std::mem;
use std::sync::Mutex;

use spd_schemas::{CustomerRow, OrderRow, ProductRow};
use spd_sheets::{SheetError, SheetStore};

/// In-memory [`SheetStore`] with scripted one-shot failures and append
/// capture.
///
/// Appended batches are also applied to the in-memory order sheet, so a
/// later scan observes what an earlier session wrote. Each `fail_next_*`
/// flag fails exactly one call and then clears.
#[derive(Default)]
pub struct FakeSheetStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    products: Vec<ProductRow>,
    customers: Vec<CustomerRow>,
    orders: Vec<OrderRow>,
    fail_next_products: bool,
    fail_next_customers: bool,
    fail_next_orders: bool,
    fail_next_append: bool,
    append_batches: Vec<Vec<OrderRow>>,
}

impl FakeSheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, rows: Vec<ProductRow>) -> Self {
        self.inner.lock().unwrap().products = rows;
        self
    }

    pub fn with_customers(self, rows: Vec<CustomerRow>) -> Self {
        self.inner.lock().unwrap().customers = rows;
        self
    }

    pub fn with_orders(self, rows: Vec<OrderRow>) -> Self {
        self.inner.lock().unwrap().orders = rows;
        self
    }

    /// Script the next product read to fail.
    pub fn fail_next_products_read(&self) {
        self.inner.lock().unwrap().fail_next_products = true;
    }

    /// Script the next customer read to fail.
    pub fn fail_next_customers_read(&self) {
        self.inner.lock().unwrap().fail_next_customers = true;
    }

    /// Script the next order scan to fail.
    pub fn fail_next_orders_read(&self) {
        self.inner.lock().unwrap().fail_next_orders = true;
    }

    /// Script the next append to fail. Nothing is recorded for that call.
    pub fn fail_next_append(&self) {
        self.inner.lock().unwrap().fail_next_append = true;
    }

    /// Every successfully appended batch, in call order.
    pub fn appended_batches(&self) -> Vec<Vec<OrderRow>> {
        self.inner.lock().unwrap().append_batches.clone()
    }

    /// Number of successful append calls.
    pub fn append_call_count(&self) -> usize {
        self.inner.lock().unwrap().append_batches.len()
    }

    /// Current order sheet contents, seeded rows plus applied appends.
    pub fn order_sheet(&self) -> Vec<OrderRow> {
        self.inner.lock().unwrap().orders.clone()
    }
}

fn scripted_failure(call: &str) -> SheetError {
    SheetError::Api {
        status: 503,
        message: format!("scripted {call} failure"),
    }
}

#[async_trait::async_trait]
impl SheetStore for FakeSheetStore {
    fn source_name(&self) -> &'static str {
        "fake"
    }

    async fn read_products(&self) -> Result<Vec<ProductRow>, SheetError> {
        let mut inner = self.inner.lock().unwrap();
        if mem::take(&mut inner.fail_next_products) {
            return Err(scripted_failure("product read"));
        }
        Ok(inner.products.clone())
    }

    async fn read_customers(&self) -> Result<Vec<CustomerRow>, SheetError> {
        let mut inner = self.inner.lock().unwrap();
        if mem::take(&mut inner.fail_next_customers) {
            return Err(scripted_failure("customer read"));
        }
        Ok(inner.customers.clone())
    }

    async fn read_orders(&self) -> Result<Vec<OrderRow>, SheetError> {
        let mut inner = self.inner.lock().unwrap();
        if mem::take(&mut inner.fail_next_orders) {
            return Err(scripted_failure("order scan"));
        }
        Ok(inner.orders.clone())
    }

    async fn append_orders(&self, rows: &[OrderRow]) -> Result<usize, SheetError> {
        let mut inner = self.inner.lock().unwrap();
        if mem::take(&mut inner.fail_next_append) {
            return Err(scripted_failure("append"));
        }
        inner.append_batches.push(rows.to_vec());
        inner.orders.extend_from_slice(rows);
        Ok(rows.len())
    }
}
