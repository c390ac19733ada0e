//! Order draft assembly.
//!
//! # Contract
//!
//! - Line items are validated on entry and append-only; there is no edit or
//!   remove short of clearing the whole draft.
//! - Each line's amount is derived once with integer arithmetic and stored
//!   as formatted text. Totals re-parse that text through the formatter's
//!   exact inverse, so the total always equals the sum of the printed lines.
//! - Serialization to rows is a pure transformation: the session context
//!   (customer, order id, user, timestamp) is passed in explicitly, and
//!   nothing is sent anywhere.

use chrono::NaiveDateTime;
use tracing::warn;

use spd_money::{
    canonical_quantity, format_inr, line_amount, micros_to_paise, parse_inr, to_micros, Paise,
};
use spd_schemas::{
    OrderRow, ProductRow, APPROVAL_PENDING, DISPATCH_PENDING, SOURCE_TAG, UNIT_LABEL,
};

use crate::error::ValidationError;
use crate::timestamp::format_order_timestamp;

/// One validated line of an order draft. All fields are final display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    pub product_name: String,
    /// Canonical decimal rendering of the quantity (`"3.5"`, not `"3.50"`).
    pub quantity: String,
    pub unit: String,
    /// Per-unit rate in Indian grouping.
    pub rate: String,
    /// Line amount in Indian grouping.
    pub amount: String,
}

/// Accumulates validated line items for one order.
#[derive(Debug, Default)]
pub struct OrderDraftBuilder {
    pending_product: Option<ProductRow>,
    pending_quantity: Option<String>,
    lines: Vec<OrderLineItem>,
}

impl OrderDraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the product for the next line by catalog code.
    ///
    /// Returns the matched catalog entry, or `None` (leaving the current
    /// selection untouched) when the code is unknown. Accumulated lines are
    /// never affected.
    pub fn select_product<'c>(
        &mut self,
        code: &str,
        catalog: &'c [ProductRow],
    ) -> Option<&'c ProductRow> {
        let found = catalog.iter().find(|p| p.product_code == code)?;
        self.pending_product = Some(found.clone());
        Some(found)
    }

    /// Record the quantity text for the next line, verbatim.
    ///
    /// Interpretation is deferred to [`OrderDraftBuilder::add_line_item`] so
    /// a half-typed value never causes an error mid-entry.
    pub fn set_quantity(&mut self, raw: &str) {
        self.pending_quantity = Some(raw.to_string());
    }

    /// Currently selected product, if any.
    pub fn pending_product(&self) -> Option<&ProductRow> {
        self.pending_product.as_ref()
    }

    /// Validate the pending selection and append it as a line item.
    ///
    /// On success the pending product and quantity are cleared for the next
    /// line and the finished line is returned. On any error the draft is
    /// left exactly as it was.
    pub fn add_line_item(&mut self) -> Result<OrderLineItem, ValidationError> {
        let product = match self.pending_product.as_ref() {
            Some(p) => p,
            None => return Err(ValidationError::NoProductSelected),
        };

        let qty_raw = self.pending_quantity.clone().unwrap_or_default();
        let qty_micros = match to_micros(&qty_raw) {
            Ok(m) if m > 0 => m,
            _ => return Err(ValidationError::InvalidQuantity { raw: qty_raw }),
        };

        let rate_micros = match to_micros(&product.rate) {
            Ok(m) => m,
            Err(_) => {
                return Err(ValidationError::InvalidRate {
                    raw: product.rate.clone(),
                })
            }
        };

        // A quantity/rate product outside the paise range records as zero
        // rather than aborting the order flow.
        let amount = match line_amount(qty_micros, rate_micros) {
            Some(a) => a,
            None => {
                warn!(
                    product = %product.product_code,
                    "line amount out of range, recording zero"
                );
                Paise::ZERO
            }
        };

        let line = OrderLineItem {
            product_name: product.product_name.clone(),
            quantity: canonical_quantity(qty_micros),
            unit: UNIT_LABEL.to_string(),
            rate: format_inr(micros_to_paise(rate_micros)),
            amount: format_inr(amount),
        };
        self.lines.push(line.clone());
        self.pending_product = None;
        self.pending_quantity = None;
        Ok(line)
    }

    /// Accumulated line items, in entry order.
    pub fn lines(&self) -> &[OrderLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the formatted line amounts, recovered through the formatter's
    /// exact inverse.
    pub fn compute_total(&self) -> Paise {
        self.lines
            .iter()
            .map(|l| parse_inr(&l.amount).unwrap_or(Paise::ZERO))
            .fold(Paise::ZERO, Paise::saturating_add)
    }

    /// Serialize the draft to order rows carrying the supplied session
    /// context. Every row shares the same order id, customer, user and
    /// timestamp; the row set equals the line items one-to-one.
    pub fn to_submission_rows(
        &self,
        customer: &str,
        order_id: &str,
        user: &str,
        placed_at: NaiveDateTime,
    ) -> Result<Vec<OrderRow>, ValidationError> {
        if customer.trim().is_empty() {
            return Err(ValidationError::NoCustomer);
        }
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        if order_id.trim().is_empty() {
            return Err(ValidationError::InvalidOrderId);
        }

        let date_time = format_order_timestamp(placed_at);
        Ok(self
            .lines
            .iter()
            .map(|line| OrderRow {
                date_time: date_time.clone(),
                user: user.to_string(),
                customer_name: customer.to_string(),
                order_id: order_id.to_string(),
                product_name: line.product_name.clone(),
                quantity: line.quantity.clone(),
                unit: line.unit.clone(),
                rate: line.rate.clone(),
                amount: line.amount.clone(),
                source: SOURCE_TAG.to_string(),
                approved_by_manager: APPROVAL_PENDING.to_string(),
                dispatched: DISPATCH_PENDING.to_string(),
            })
            .collect())
    }

    /// Drop every line and any pending selection.
    pub fn clear(&mut self) {
        self.pending_product = None;
        self.pending_quantity = None;
        self.lines.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn catalog() -> Vec<ProductRow> {
        vec![
            ProductRow {
                group_code: "G1".to_string(),
                group_name: "Lubricants".to_string(),
                product_code: "P100".to_string(),
                product_name: "Engine Oil 1L".to_string(),
                rate: "450".to_string(),
            },
            ProductRow {
                group_code: "G1".to_string(),
                group_name: "Lubricants".to_string(),
                product_code: "P200".to_string(),
                product_name: "Gear Oil 1L".to_string(),
                rate: "250.50".to_string(),
            },
            ProductRow {
                group_code: "G1".to_string(),
                group_name: "Lubricants".to_string(),
                product_code: "P300".to_string(),
                product_name: "Coolant 5L".to_string(),
                rate: "500".to_string(),
            },
            ProductRow {
                group_code: "G2".to_string(),
                group_name: "Misc".to_string(),
                product_code: "P900".to_string(),
                product_name: "Unpriced Sample".to_string(),
                rate: "N/A".to_string(),
            },
        ]
    }

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn select_product_stores_the_catalog_entry() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        let found = draft.select_product("P100", &catalog).unwrap();
        assert_eq!(found.product_name, "Engine Oil 1L");
        assert_eq!(draft.pending_product().unwrap().product_code, "P100");
    }

    #[test]
    fn select_product_unknown_code_changes_nothing() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);

        assert!(draft.select_product("NOPE", &catalog).is_none());
        // The earlier selection survives an unknown code.
        assert_eq!(draft.pending_product().unwrap().product_code, "P100");
    }

    #[test]
    fn add_line_requires_a_selected_product() {
        let mut draft = OrderDraftBuilder::new();
        draft.set_quantity("2");
        assert_eq!(
            draft.add_line_item().unwrap_err(),
            ValidationError::NoProductSelected
        );
    }

    #[test]
    fn add_line_rejects_bad_quantities() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);

        for bad in ["0", "-5", "abc", ""] {
            draft.set_quantity(bad);
            let err = draft.add_line_item().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidQuantity { .. }),
                "'{bad}' must be rejected as a quantity, got {err:?}"
            );
            // A rejected line leaves the draft untouched.
            assert!(draft.lines().is_empty());
            assert!(draft.pending_product().is_some());
        }
    }

    #[test]
    fn add_line_accepts_fractional_quantity() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);
        draft.set_quantity("3.5");

        let line = draft.add_line_item().unwrap();
        assert_eq!(line.product_name, "Engine Oil 1L");
        assert_eq!(line.quantity, "3.5");
        assert_eq!(line.unit, "Unit");
        assert_eq!(line.rate, "450.00");
        assert_eq!(line.amount, "1,575.00");
    }

    #[test]
    fn quantity_is_stored_canonically() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();

        draft.select_product("P100", &catalog);
        draft.set_quantity("3.50");
        assert_eq!(draft.add_line_item().unwrap().quantity, "3.5");

        draft.select_product("P100", &catalog);
        draft.set_quantity("03");
        assert_eq!(draft.add_line_item().unwrap().quantity, "3");
    }

    #[test]
    fn add_line_rejects_unparseable_rate() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P900", &catalog);
        draft.set_quantity("1");

        let err = draft.add_line_item().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRate {
                raw: "N/A".to_string()
            }
        );
    }

    #[test]
    fn add_line_clears_pending_state_on_success() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);
        draft.set_quantity("2");
        draft.add_line_item().unwrap();

        assert!(draft.pending_product().is_none());
        assert_eq!(
            draft.add_line_item().unwrap_err(),
            ValidationError::NoProductSelected
        );
    }

    #[test]
    fn amounts_use_indian_grouping() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);
        draft.set_quantity("2743.5");

        // 2743.5 x 450 = 1_234_575 rupees.
        let line = draft.add_line_item().unwrap();
        assert_eq!(line.amount, "12,34,575.00");
    }

    #[test]
    fn compute_total_recovers_formatted_amounts() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();

        // 4 x 250.50 = 1002.00; 2 x 450 = 900.00.
        draft.select_product("P200", &catalog);
        draft.set_quantity("4");
        draft.add_line_item().unwrap();
        draft.select_product("P100", &catalog);
        draft.set_quantity("2");
        draft.add_line_item().unwrap();

        assert_eq!(draft.compute_total(), Paise::new(190_200));
    }

    #[test]
    fn compute_total_strips_grouping_commas() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();

        // 1,000.00 + 250.50 = 1250.50; the comma in the first amount must
        // not break the sum.
        draft.select_product("P300", &catalog);
        draft.set_quantity("2");
        assert_eq!(draft.add_line_item().unwrap().amount, "1,000.00");

        draft.select_product("P200", &catalog);
        draft.set_quantity("1");
        assert_eq!(draft.add_line_item().unwrap().amount, "250.50");

        assert_eq!(draft.compute_total(), Paise::new(125_050));
    }

    #[test]
    fn submission_rows_share_the_session_context() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);
        draft.set_quantity("2");
        draft.add_line_item().unwrap();
        draft.select_product("P200", &catalog);
        draft.set_quantity("1");
        draft.add_line_item().unwrap();

        let rows = draft
            .to_submission_rows("ACME TRADERS", "2024-2025_00008", "Manager", placed_at())
            .unwrap();

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.order_id, "2024-2025_00008");
            assert_eq!(row.customer_name, "ACME TRADERS");
            assert_eq!(row.user, "Manager");
            assert_eq!(row.date_time, "01/05/2024 09:30 AM");
            assert_eq!(row.source, "App");
            assert_eq!(row.approved_by_manager, "N");
            assert_eq!(row.dispatched, "N");
        }
        assert_eq!(rows[0].product_name, "Engine Oil 1L");
        assert_eq!(rows[1].product_name, "Gear Oil 1L");
    }

    #[test]
    fn submission_rows_require_customer_lines_and_id() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();

        assert_eq!(
            draft
                .to_submission_rows("", "2024-2025_00001", "User", placed_at())
                .unwrap_err(),
            ValidationError::NoCustomer
        );
        assert_eq!(
            draft
                .to_submission_rows("ACME", "2024-2025_00001", "User", placed_at())
                .unwrap_err(),
            ValidationError::EmptyOrder
        );

        draft.select_product("P100", &catalog);
        draft.set_quantity("1");
        draft.add_line_item().unwrap();
        assert_eq!(
            draft
                .to_submission_rows("ACME", "   ", "User", placed_at())
                .unwrap_err(),
            ValidationError::InvalidOrderId
        );
    }

    #[test]
    fn clear_drops_lines_and_pending_state() {
        let catalog = catalog();
        let mut draft = OrderDraftBuilder::new();
        draft.select_product("P100", &catalog);
        draft.set_quantity("2");
        draft.add_line_item().unwrap();
        draft.select_product("P200", &catalog);

        draft.clear();
        assert!(draft.is_empty());
        assert!(draft.pending_product().is_none());
        assert_eq!(draft.compute_total(), Paise::ZERO);
    }
}
