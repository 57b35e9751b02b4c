use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode};
use uuid::Uuid;

use super::coupons::CouponBook;
use super::errors::DomainError;
use super::order::{CartLine, CouponOutcome, Product, ProductSummary, Quote, QuoteLine};

/// Discount for a subtotal at a given percentage, rounded half-up to cents.
pub fn discount_amount(subtotal: &BigDecimal, percentage: u32) -> BigDecimal {
    let raw = subtotal * BigDecimal::from(percentage) / BigDecimal::from(100u32);
    raw.with_scale_round(2, RoundingMode::HalfUp)
}

/// Price a cart against already-resolved live products.
///
/// Validation is fail-fast in cart order: the first missing product or
/// out-of-stock line aborts the whole calculation. Pure: performs no I/O
/// and mutates nothing, so Preview can call it as often as it likes and
/// Confirm reuses it verbatim before committing.
pub fn price_cart(
    products: &[Product],
    items: &[CartLine],
    coupons: &CouponBook,
    coupon_code: Option<&str>,
) -> Result<Quote, DomainError> {
    if items.is_empty() {
        return Err(DomainError::Validation(
            "Please provide at least one product".to_string(),
        ));
    }

    let by_id: HashMap<Uuid, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = BigDecimal::from(0);

    for item in items {
        if item.quantity < 1 {
            return Err(DomainError::Validation(
                "Each product must have a quantity of at least 1".to_string(),
            ));
        }

        let product = *by_id
            .get(&item.product_id)
            .ok_or(DomainError::ProductNotFound(item.product_id))?;

        if product.stock < item.quantity {
            return Err(DomainError::InsufficientStock {
                title: product.title.clone(),
                available: product.stock,
            });
        }

        let line_total = &product.price * BigDecimal::from(item.quantity);
        subtotal += &line_total;

        lines.push(QuoteLine {
            product: ProductSummary::from(product),
            quantity: item.quantity,
            unit_price: product.price.clone(),
            line_total,
        });
    }

    let coupon = coupon_code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|code| match coupons.percentage(code) {
            Some(percentage) => CouponOutcome::Applied {
                code: code.to_uppercase(),
                percentage,
                savings: discount_amount(&subtotal, percentage),
            },
            None => CouponOutcome::Rejected {
                code: code.to_string(),
            },
        });

    let discount = match &coupon {
        Some(CouponOutcome::Applied { savings, .. }) => savings.clone(),
        _ => BigDecimal::from(0),
    };
    let total_price = &subtotal - &discount;

    Ok(Quote {
        lines,
        subtotal,
        coupon,
        discount_amount: discount,
        total_price,
    })
}
