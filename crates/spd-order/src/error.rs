//! Draft validation errors.

use std::fmt;

/// Reasons a draft operation is refused. Every variant is recoverable and
/// leaves the draft exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A line item was requested with no product selected.
    NoProductSelected,
    /// The pending quantity is absent, non-numeric, or not greater than zero.
    InvalidQuantity { raw: String },
    /// The selected product's rate text could not be parsed.
    InvalidRate { raw: String },
    /// Submission rows were requested without a customer name.
    NoCustomer,
    /// Submission rows were requested for a draft with no line items.
    EmptyOrder,
    /// Submission rows were requested with an empty order id.
    InvalidOrderId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoProductSelected => write!(f, "no product selected"),
            ValidationError::InvalidQuantity { raw } => {
                write!(f, "quantity must be a positive number, got '{raw}'")
            }
            ValidationError::InvalidRate { raw } => {
                write!(f, "product rate could not be parsed: '{raw}'")
            }
            ValidationError::NoCustomer => write!(f, "customer name is empty"),
            ValidationError::EmptyOrder => write!(f, "order has no line items"),
            ValidationError::InvalidOrderId => write!(f, "order id is empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
