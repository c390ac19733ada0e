//! Canned rows for scenario tests.

use spd_schemas::{CustomerRow, OrderRow, ProductRow};

/// Catalog row with the given code, name and rate text.
pub fn product_row(code: &str, name: &str, rate: &str) -> ProductRow {
    ProductRow {
        group_code: "G1".to_string(),
        group_name: "Lubricants".to_string(),
        product_code: code.to_string(),
        product_name: name.to_string(),
        rate: rate.to_string(),
    }
}

/// Customer master row.
pub fn customer_row(code: &str, name: &str) -> CustomerRow {
    CustomerRow {
        code: code.to_string(),
        name: name.to_string(),
    }
}

/// Order row carrying only an id, the shape a sequence scan cares about.
pub fn order_row_with_id(id: &str) -> OrderRow {
    OrderRow {
        date_time: String::new(),
        user: String::new(),
        customer_name: String::new(),
        order_id: id.to_string(),
        product_name: String::new(),
        quantity: String::new(),
        unit: String::new(),
        rate: String::new(),
        amount: String::new(),
        source: String::new(),
        approved_by_manager: String::new(),
        dispatched: String::new(),
    }
}
