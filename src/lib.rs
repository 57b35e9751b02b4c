pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::checkout::CheckoutService;
pub use db::{create_pool, DbPool};
pub use domain::coupons::CouponBook;
use infrastructure::store::DieselStore;

/// The checkout service as wired in production: Diesel-backed store.
pub type Checkout = CheckoutService<DieselStore>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::preview_order,
        handlers::orders::confirm_order,
        handlers::orders::orders_by_email,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order_status,
    ),
    components(schemas(
        handlers::orders::CartItemRequest,
        handlers::orders::PreviewOrderRequest,
        handlers::orders::ConfirmOrderRequest,
        handlers::orders::OrderHistoryRequest,
        handlers::orders::UpdateStatusRequest,
        handlers::orders::ProductSummaryResponse,
        handlers::orders::QuoteLineResponse,
        handlers::orders::CouponResponse,
        handlers::orders::QuoteResponse,
        handlers::orders::OrderLineResponse,
        handlers::orders::OrderResponse,
        handlers::orders::OrderHistoryResponse,
        handlers::orders::ListOrdersResponse,
    )),
    tags((name = "orders", description = "Cart pricing and order lifecycle"))
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    coupons: CouponBook,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let checkout = web::Data::new(CheckoutService::new(DieselStore::new(pool), coupons));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(checkout.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("/preview", web::post().to(handlers::orders::preview_order))
                    .route("/confirm", web::post().to(handlers::orders::confirm_order))
                    .route(
                        "/my-orders",
                        web::post().to(handlers::orders::orders_by_email),
                    )
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{id}",
                        web::put().to(handlers::orders::update_order_status),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
