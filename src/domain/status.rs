use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

/// Order lifecycle state.
///
/// Orders move one way: Placed → Processing → Delivered, with Cancelled
/// reachable from either open state. Delivered and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Placed,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// The transition table: which states may follow this one.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Placed => &[OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Check a requested transition against the table.
    ///
    /// Stateless: validity is derived entirely from the pair of states, so
    /// the caller re-reads the persisted status on every invocation.
    pub fn ensure_transition(self, to: OrderStatus) -> Result<(), DomainError> {
        if self.allowed_transitions().contains(&to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Placed" => Ok(OrderStatus::Placed),
            "Processing" => Ok(OrderStatus::Processing),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Status must be one of: Placed, Processing, Delivered, Cancelled (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_allows_processing_and_cancelled() {
        assert!(OrderStatus::Placed
            .ensure_transition(OrderStatus::Processing)
            .is_ok());
        assert!(OrderStatus::Placed
            .ensure_transition(OrderStatus::Cancelled)
            .is_ok());
    }

    #[test]
    fn placed_to_delivered_is_rejected() {
        let err = OrderStatus::Placed
            .ensure_transition(OrderStatus::Delivered)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: OrderStatus::Placed,
                to: OrderStatus::Delivered
            }
        ));
        let msg = err.to_string();
        assert!(msg.contains("Processing, Cancelled"), "message was: {msg}");
    }

    #[test]
    fn processing_allows_delivered_and_cancelled() {
        assert!(OrderStatus::Processing
            .ensure_transition(OrderStatus::Delivered)
            .is_ok());
        assert!(OrderStatus::Processing
            .ensure_transition(OrderStatus::Cancelled)
            .is_ok());
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for next in [
                OrderStatus::Placed,
                OrderStatus::Processing,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(
                    terminal.ensure_transition(next).is_err(),
                    "{terminal} -> {next} should be rejected"
                );
            }
            assert!(terminal.allowed_transitions().is_empty());
        }
    }

    #[test]
    fn self_transition_is_rejected_even_from_open_states() {
        assert!(OrderStatus::Placed
            .ensure_transition(OrderStatus::Placed)
            .is_err());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Processing,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_string_is_a_validation_error() {
        let err = "Shipped".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
