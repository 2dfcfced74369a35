//! Root handler.

use axum::Json;

/// `GET /` — welcome message.
pub async fn welcome() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Welcome to KaziFlow API"}))
}
