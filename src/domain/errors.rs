use thiserror::Error;
use uuid::Uuid;

use super::status::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Product with ID {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for {title}. Available: {available}")]
    InsufficientStock { title: String, available: i32 },

    #[error(
        "Cannot change status from '{from}' to '{to}'. Allowed: {allowed}",
        allowed = format_allowed(.from)
    )]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order not found")]
    OrderNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_allowed(from: &OrderStatus) -> String {
    let allowed = from.allowed_transitions();
    if allowed.is_empty() {
        "none".to_string()
    } else {
        allowed
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_names_product_and_count() {
        let err = DomainError::InsufficientStock {
            title: "Walnut desk".to_string(),
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Walnut desk. Available: 3"
        );
    }

    #[test]
    fn invalid_transition_lists_allowed_states() {
        let err = DomainError::InvalidTransition {
            from: OrderStatus::Placed,
            to: OrderStatus::Delivered,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change status from 'Placed' to 'Delivered'. Allowed: Processing, Cancelled"
        );
    }

    #[test]
    fn invalid_transition_from_terminal_says_none() {
        let err = DomainError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change status from 'Delivered' to 'Processing'. Allowed: none"
        );
    }
}
