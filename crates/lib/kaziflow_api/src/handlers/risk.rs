//! Risk assessment request handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentAccount;
use crate::models::RiskAssessmentResponse;
use crate::services::risk;

/// `POST /risk/analyze/{vendor_id}` — run a risk analysis for a vendor.
/// Restricted to bank and admin callers.
pub async fn analyze_risk_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
    Path(vendor_id): Path<Uuid>,
) -> AppResult<Json<RiskAssessmentResponse>> {
    let resp = risk::analyze_vendor(&state, &account.0, vendor_id).await?;
    Ok(Json(resp))
}
