use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::status::OrderStatus;

/// A live catalog product as the pricing engine sees it.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub images: Vec<String>,
}

/// Display-friendly product summary attached to quote and order lines.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: Uuid,
    pub title: String,
    pub price: BigDecimal,
    pub images: Vec<String>,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            price: p.price.clone(),
            images: p.images.clone(),
        }
    }
}

/// One requested (product, quantity) pair from the caller's cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Outcome of applying a coupon code to a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponOutcome {
    Applied {
        code: String,
        percentage: u32,
        savings: BigDecimal,
    },
    /// Unknown code. Not an error: the quote proceeds without a discount.
    Rejected { code: String },
}

#[derive(Debug, Clone)]
pub struct QuoteLine {
    pub product: ProductSummary,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

/// A priced cart. Produced by Preview; Confirm commits exactly this.
#[derive(Debug, Clone)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub subtotal: BigDecimal,
    pub coupon: Option<CouponOutcome>,
    pub discount_amount: BigDecimal,
    pub total_price: BigDecimal,
}

/// Everything the store needs to persist a confirmed order.
///
/// `unit_price` on each line is the snapshot taken at pricing time; the
/// persisted order never refers back to the live product price.
#[derive(Debug, Clone)]
pub struct NewOrderDraft {
    pub customer_id: Uuid,
    pub email: String,
    pub lines: Vec<DraftLine>,
    pub subtotal: BigDecimal,
    pub coupon_code: Option<String>,
    pub discount_amount: BigDecimal,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct DraftLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// A persisted order line. `product` is resolved from the live catalog at
/// read time and is `None` when the product has since been removed;
/// `unit_price` is always the order-time snapshot.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub product_id: Uuid,
    pub product: Option<ProductSummary>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub email: String,
    pub lines: Vec<OrderLineView>,
    pub subtotal: BigDecimal,
    pub coupon_code: Option<String>,
    pub discount_amount: BigDecimal,
    pub total_price: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub items: Vec<OrderView>,
    pub total: i64,
}
