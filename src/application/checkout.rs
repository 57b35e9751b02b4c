use uuid::Uuid;

use crate::domain::coupons::CouponBook;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CartLine, CouponOutcome, DraftLine, NewOrderDraft, OrderPage, OrderView, Quote,
};
use crate::domain::ports::OrderStore;
use crate::domain::pricing::price_cart;
use crate::domain::status::OrderStatus;

/// Orchestrates pricing and order lifecycle over an [`OrderStore`].
///
/// Owns the coupon table; handlers only ever talk to this service.
pub struct CheckoutService<S> {
    store: S,
    coupons: CouponBook,
}

impl<S: OrderStore> CheckoutService<S> {
    pub fn new(store: S, coupons: CouponBook) -> Self {
        Self { store, coupons }
    }

    /// Quote a cart without touching any state.
    pub fn preview(
        &self,
        items: &[CartLine],
        coupon_code: Option<&str>,
    ) -> Result<Quote, DomainError> {
        let products = self.resolve(items)?;
        price_cart(&products, items, &self.coupons, coupon_code)
    }

    /// Price the cart, then commit it as a `Placed` order.
    ///
    /// The caller's identity comes from the surrounding auth layer; the
    /// email is lowercased here so the guest lookup contract holds. The
    /// coupon code is persisted only when it actually applied.
    pub fn confirm(
        &self,
        customer_id: Uuid,
        email: &str,
        items: &[CartLine],
        coupon_code: Option<&str>,
    ) -> Result<OrderView, DomainError> {
        let email = normalized_email(email)?;
        let products = self.resolve(items)?;
        let quote = price_cart(&products, items, &self.coupons, coupon_code)?;

        self.store.create_order(draft_from_quote(customer_id, email, &quote))
    }

    pub fn order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.store.find_order(id)?.ok_or(DomainError::OrderNotFound)
    }

    /// Guest order history: all orders under an email, newest first.
    pub fn orders_by_email(&self, email: &str) -> Result<Vec<OrderView>, DomainError> {
        let email = normalized_email(email)?;
        self.store.orders_by_email(&email)
    }

    pub fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError> {
        self.store.list_orders(status, page, limit)
    }

    pub fn update_status(&self, id: Uuid, next: OrderStatus) -> Result<OrderView, DomainError> {
        self.store.update_status(id, next)
    }

    fn resolve(&self, items: &[CartLine]) -> Result<Vec<crate::domain::order::Product>, DomainError> {
        let ids: Vec<Uuid> = items.iter().map(|l| l.product_id).collect();
        self.store.products_by_ids(&ids)
    }
}

fn normalized_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::Validation(
            "Please provide an email address".to_string(),
        ));
    }
    Ok(email.to_lowercase())
}

fn draft_from_quote(customer_id: Uuid, email: String, quote: &Quote) -> NewOrderDraft {
    NewOrderDraft {
        customer_id,
        email,
        lines: quote
            .lines
            .iter()
            .map(|l| DraftLine {
                product_id: l.product.id,
                quantity: l.quantity,
                unit_price: l.unit_price.clone(),
            })
            .collect(),
        subtotal: quote.subtotal.clone(),
        coupon_code: match &quote.coupon {
            Some(CouponOutcome::Applied { code, .. }) => Some(code.clone()),
            _ => None,
        },
        discount_amount: quote.discount_amount.clone(),
        total_price: quote.total_price.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::order::{OrderLineView, Product};

    /// In-memory store: serves a fixed catalog and records the drafts it
    /// is asked to persist.
    struct RecordingStore {
        catalog: Vec<Product>,
        drafts: Mutex<Vec<NewOrderDraft>>,
    }

    impl RecordingStore {
        fn with_catalog(catalog: Vec<Product>) -> Self {
            Self {
                catalog,
                drafts: Mutex::new(Vec::new()),
            }
        }
    }

    impl OrderStore for RecordingStore {
        fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
            Ok(self
                .catalog
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        fn create_order(&self, draft: NewOrderDraft) -> Result<OrderView, DomainError> {
            let view = OrderView {
                id: Uuid::new_v4(),
                customer_id: draft.customer_id,
                email: draft.email.clone(),
                lines: draft
                    .lines
                    .iter()
                    .map(|l| OrderLineView {
                        product_id: l.product_id,
                        product: None,
                        quantity: l.quantity,
                        unit_price: l.unit_price.clone(),
                    })
                    .collect(),
                subtotal: draft.subtotal.clone(),
                coupon_code: draft.coupon_code.clone(),
                discount_amount: draft.discount_amount.clone(),
                total_price: draft.total_price.clone(),
                status: OrderStatus::Placed,
                created_at: Utc::now(),
            };
            self.drafts.lock().unwrap().push(draft);
            Ok(view)
        }

        fn find_order(&self, _id: Uuid) -> Result<Option<OrderView>, DomainError> {
            Ok(None)
        }

        fn orders_by_email(&self, _email: &str) -> Result<Vec<OrderView>, DomainError> {
            Ok(vec![])
        }

        fn list_orders(
            &self,
            _status: Option<OrderStatus>,
            _page: i64,
            _limit: i64,
        ) -> Result<OrderPage, DomainError> {
            Ok(OrderPage {
                items: vec![],
                total: 0,
            })
        }

        fn update_status(&self, _id: Uuid, _next: OrderStatus) -> Result<OrderView, DomainError> {
            Err(DomainError::OrderNotFound)
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn desk() -> Product {
        Product {
            id: Uuid::new_v4(),
            title: "Desk".to_string(),
            price: dec("10.00"),
            stock: 5,
            images: vec![],
        }
    }

    #[test]
    fn confirm_snapshots_prices_and_lowercases_email() {
        let product = desk();
        let store = RecordingStore::with_catalog(vec![product.clone()]);
        let service = CheckoutService::new(store, CouponBook::builtin());

        let items = [CartLine {
            product_id: product.id,
            quantity: 2,
        }];
        let view = service
            .confirm(Uuid::new_v4(), "  Jane.Doe@Example.COM ", &items, None)
            .expect("confirm");

        assert_eq!(view.email, "jane.doe@example.com");
        assert_eq!(view.total_price, dec("20.00"));

        let drafts = service.store.drafts.lock().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].lines[0].unit_price, dec("10.00"));
        assert_eq!(drafts[0].subtotal, dec("20.00"));
    }

    #[test]
    fn confirm_persists_coupon_code_only_when_applied() {
        let product = desk();
        let store = RecordingStore::with_catalog(vec![product.clone()]);
        let service = CheckoutService::new(store, CouponBook::builtin());
        let items = [CartLine {
            product_id: product.id,
            quantity: 1,
        }];

        service
            .confirm(Uuid::new_v4(), "a@b.com", &items, Some("save10"))
            .expect("confirm with valid coupon");
        service
            .confirm(Uuid::new_v4(), "a@b.com", &items, Some("BOGUS"))
            .expect("confirm with bogus coupon still succeeds");

        let drafts = service.store.drafts.lock().unwrap();
        assert_eq!(drafts[0].coupon_code.as_deref(), Some("SAVE10"));
        assert_eq!(drafts[0].discount_amount, dec("1.00"));
        assert_eq!(drafts[1].coupon_code, None);
        assert_eq!(drafts[1].discount_amount, dec("0"));
    }

    #[test]
    fn confirm_rejects_blank_email() {
        let store = RecordingStore::with_catalog(vec![]);
        let service = CheckoutService::new(store, CouponBook::builtin());
        let err = service
            .confirm(Uuid::new_v4(), "   ", &[], None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn preview_does_not_touch_the_store() {
        let product = desk();
        let store = RecordingStore::with_catalog(vec![product.clone()]);
        let service = CheckoutService::new(store, CouponBook::builtin());

        let items = [CartLine {
            product_id: product.id,
            quantity: 3,
        }];
        let quote = service.preview(&items, Some("SAVE20")).expect("quote");
        assert_eq!(quote.total_price, dec("24.00"));
        assert!(service.store.drafts.lock().unwrap().is_empty());
    }
}
