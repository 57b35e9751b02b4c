use uuid::Uuid;

use super::errors::DomainError;
use super::order::{NewOrderDraft, OrderPage, OrderView, Product};
use super::status::OrderStatus;

/// Persistence boundary for the checkout service.
///
/// `create_order` and `update_status` are transactional: a confirmed order
/// commits all of its stock decrements and rows or none of them, and a
/// cancellation flips the status and restores stock atomically.
pub trait OrderStore: Send + Sync + 'static {
    /// Resolve live products for the given ids. Ids with no matching
    /// product are simply absent from the result.
    fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;

    /// Persist a priced cart as a `Placed` order, decrementing stock for
    /// every line. Stock decrements are conditional on sufficiency; any
    /// line that cannot be satisfied aborts the whole order.
    fn create_order(&self, draft: NewOrderDraft) -> Result<OrderView, DomainError>;

    fn find_order(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    /// All orders stored under the given (already lowercased) email,
    /// newest first.
    fn orders_by_email(&self, email: &str) -> Result<Vec<OrderView>, DomainError>;

    /// Paginated listing, newest first, optionally filtered by status.
    fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError>;

    /// Apply a guarded status transition. Moving to `Cancelled` restores
    /// stock for every line item in the same transaction.
    fn update_status(&self, id: Uuid, next: OrderStatus) -> Result<OrderView, DomainError>;
}
