//! # kaziflow_api
//!
//! HTTP API library for KaziFlow.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, invoices, notifications, risk, root};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// HTTP client for the external risk scorer.
    pub http: reqwest::Client,
}

/// Run embedded database migrations.
///
/// Delegates to `kaziflow_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    kaziflow_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/", get(root::welcome))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    // Protected routes (require a valid bearer token)
    let protected = Router::new()
        .route(
            "/auth/me",
            get(auth::me_handler).patch(auth::update_me_handler),
        )
        .route("/auth/change-password", post(auth::change_password_handler))
        .route(
            "/invoices",
            get(invoices::list_invoices_handler).post(invoices::create_invoice_handler),
        )
        .route("/risk/analyze/{vendor_id}", post(risk::analyze_risk_handler))
        .route(
            "/notifications",
            get(notifications::list_notifications_handler),
        )
        .route(
            "/notifications/{id}/read",
            post(notifications::mark_read_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
