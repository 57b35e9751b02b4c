use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(_)
            | DomainError::InsufficientStock { .. }
            | DomainError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
            DomainError::ProductNotFound(_) | DomainError::OrderNotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(serde_json::json!({
                "error": msg
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use uuid::Uuid;

    use super::*;
    use crate::domain::status::OrderStatus;

    #[test]
    fn validation_maps_to_400() {
        let app_err: AppError = DomainError::Validation("bad cart".to_string()).into();
        assert_eq!(app_err.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(app_err.to_string(), "bad cart");
    }

    #[test]
    fn insufficient_stock_maps_to_400_with_message() {
        let app_err: AppError = DomainError::InsufficientStock {
            title: "Desk".to_string(),
            available: 2,
        }
        .into();
        assert_eq!(app_err.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            app_err.to_string(),
            "Insufficient stock for Desk. Available: 2"
        );
    }

    #[test]
    fn invalid_transition_maps_to_400() {
        let app_err: AppError = DomainError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Placed,
        }
        .into();
        assert_eq!(app_err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn product_not_found_maps_to_404() {
        let id = Uuid::new_v4();
        let app_err: AppError = DomainError::ProductNotFound(id).into();
        assert_eq!(app_err.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(app_err.to_string(), format!("Product with ID {id} not found"));
    }

    #[test]
    fn order_not_found_maps_to_404() {
        let app_err: AppError = DomainError::OrderNotFound.into();
        assert_eq!(app_err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_maps_to_500_and_hides_detail() {
        let app_err: AppError = DomainError::Internal("db exploded".to_string()).into();
        let resp = app_err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
