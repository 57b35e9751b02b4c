use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{
    CartLine, CouponOutcome, OrderLineView, OrderView, ProductSummary, Quote, QuoteLine,
};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;
use crate::Checkout;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PreviewOrderRequest {
    pub items: Vec<CartItemRequest>,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmOrderRequest {
    /// Caller identity, supplied by the authentication layer in front of
    /// this service.
    pub customer_id: Uuid,
    pub email: String,
    pub items: Vec<CartItemRequest>,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderHistoryRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of: Placed, Processing, Delivered, Cancelled.
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Filter by order status.
    pub status: Option<String>,
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummaryResponse {
    pub id: Uuid,
    pub title: String,
    /// Current catalog price as a decimal string, e.g. "9.99".
    pub price: String,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteLineResponse {
    pub product: ProductSummaryResponse,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CouponResponse {
    Applied {
        code: String,
        percentage: u32,
        savings: String,
    },
    Invalid {
        code: String,
        valid: bool,
        message: String,
    },
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub items: Vec<QuoteLineResponse>,
    pub subtotal: String,
    pub coupon: Option<CouponResponse>,
    pub discount_amount: String,
    pub total_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub product_id: Uuid,
    /// Live product summary, or null if the product has since been
    /// removed from the catalog.
    pub product: Option<ProductSummaryResponse>,
    pub quantity: i32,
    /// Unit price at the time the order was placed.
    pub unit_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub email: String,
    pub items: Vec<OrderLineResponse>,
    pub subtotal: String,
    pub coupon_code: Option<String>,
    pub discount_amount: String,
    pub total_price: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryResponse {
    pub count: usize,
    pub items: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl From<&ProductSummary> for ProductSummaryResponse {
    fn from(p: &ProductSummary) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            price: p.price.to_string(),
            images: p.images.clone(),
        }
    }
}

impl From<&QuoteLine> for QuoteLineResponse {
    fn from(l: &QuoteLine) -> Self {
        Self {
            product: ProductSummaryResponse::from(&l.product),
            quantity: l.quantity,
            unit_price: l.unit_price.to_string(),
            line_total: l.line_total.to_string(),
        }
    }
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            items: q.lines.iter().map(QuoteLineResponse::from).collect(),
            subtotal: q.subtotal.to_string(),
            coupon: q.coupon.map(|c| match c {
                CouponOutcome::Applied {
                    code,
                    percentage,
                    savings,
                } => CouponResponse::Applied {
                    code,
                    percentage,
                    savings: savings.to_string(),
                },
                CouponOutcome::Rejected { code } => CouponResponse::Invalid {
                    code,
                    valid: false,
                    message: "Invalid coupon code".to_string(),
                },
            }),
            discount_amount: q.discount_amount.to_string(),
            total_price: q.total_price.to_string(),
        }
    }
}

impl From<&OrderLineView> for OrderLineResponse {
    fn from(l: &OrderLineView) -> Self {
        Self {
            product_id: l.product_id,
            product: l.product.as_ref().map(ProductSummaryResponse::from),
            quantity: l.quantity,
            unit_price: l.unit_price.to_string(),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            email: o.email,
            items: o.lines.iter().map(OrderLineResponse::from).collect(),
            subtotal: o.subtotal.to_string(),
            coupon_code: o.coupon_code,
            discount_amount: o.discount_amount.to_string(),
            total_price: o.total_price.to_string(),
            status: o.status.to_string(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

fn to_cart_lines(items: &[CartItemRequest]) -> Vec<CartLine> {
    items
        .iter()
        .map(|i| CartLine {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/preview
///
/// Quotes a cart: resolves products, validates stock, applies an optional
/// coupon. Pure read; nothing is reserved or decremented.
#[utoipa::path(
    post,
    path = "/orders/preview",
    request_body = PreviewOrderRequest,
    responses(
        (status = 200, description = "Priced quote for the cart", body = QuoteResponse),
        (status = 400, description = "Empty cart, bad quantity, or insufficient stock"),
        (status = 404, description = "Referenced product does not exist"),
    ),
    tag = "orders"
)]
pub async fn preview_order(
    service: web::Data<Checkout>,
    body: web::Json<PreviewOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let quote = web::block(move || {
        let items = to_cart_lines(&body.items);
        service.preview(&items, body.coupon_code.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(QuoteResponse::from(quote)))
}

/// POST /orders/confirm
///
/// Prices the cart exactly like preview, then commits it: decrements
/// stock for every line and persists the order with status `Placed` and
/// per-line price snapshots. All-or-nothing; a line that cannot be
/// satisfied leaves no trace.
#[utoipa::path(
    post,
    path = "/orders/confirm",
    request_body = ConfirmOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Empty cart, bad quantity, or insufficient stock"),
        (status = 404, description = "Referenced product does not exist"),
    ),
    tag = "orders"
)]
pub async fn confirm_order(
    service: web::Data<Checkout>,
    body: web::Json<ConfirmOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let order = web::block(move || {
        let items = to_cart_lines(&body.items);
        service.confirm(
            body.customer_id,
            &body.email,
            &items,
            body.coupon_code.as_deref(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// POST /orders/my-orders
///
/// Guest order history: every order stored under the given email, newest
/// first. Deliberately unauthenticated.
#[utoipa::path(
    post,
    path = "/orders/my-orders",
    request_body = OrderHistoryRequest,
    responses(
        (status = 200, description = "Orders for the email", body = OrderHistoryResponse),
        (status = 400, description = "Missing email"),
    ),
    tag = "orders"
)]
pub async fn orders_by_email(
    service: web::Data<Checkout>,
    body: web::Json<OrderHistoryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let orders = web::block(move || service.orders_by_email(&body.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(OrderHistoryResponse {
        count: items.len(),
        items,
    }))
}

/// GET /orders
///
/// Paginated order listing, newest first. Use `status` to filter and
/// `page`/`limit` to page through.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("status" = Option<String>, Query, description = "Filter by order status"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 400, description = "Unknown status filter"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<Checkout>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let status = params
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let result = web::block(move || service.list_orders(status, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<Checkout>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /orders/{id}
///
/// Moves an order along its lifecycle. Transitions are guarded by the
/// state machine; cancelling an open order restores the stock of every
/// line item.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status or disallowed transition"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<Checkout>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let next: OrderStatus = body.into_inner().status.parse()?;

    let order = web::block(move || service.update_status(order_id, next))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
