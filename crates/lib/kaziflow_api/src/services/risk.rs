//! Risk assessment service.
//!
//! Restricted to reviewing roles. Builds the vendor snapshot from real
//! invoice history, scores it, persists the assessment, and notifies the
//! vendor.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use kaziflow_core::auth::guard::require_role;
use kaziflow_core::auth::queries::find_account_by_id;
use kaziflow_core::invoices;
use kaziflow_core::models::auth::{Account, Role};
use kaziflow_core::notifications;
use kaziflow_core::risk::{self, VendorSnapshot};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::RiskAssessmentResponse;

/// Roles allowed to trigger a risk analysis.
const REVIEWER_ROLES: &[Role] = &[Role::Bank, Role::Admin];

/// Analyze a vendor's risk on behalf of `caller`.
pub async fn analyze_vendor(
    state: &AppState,
    caller: &Account,
    vendor_id: Uuid,
) -> AppResult<RiskAssessmentResponse> {
    require_role(caller, REVIEWER_ROLES)?;

    let vendor = find_account_by_id(&state.pool, vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".into()))?;

    let snapshot = build_snapshot(&state.pool, vendor.id).await?;
    let analysis = risk::analyze_vendor_risk(
        &state.http,
        state.config.google_api_key.as_deref(),
        &snapshot,
    )
    .await;

    let assessment = risk::queries::insert_assessment(&state.pool, vendor.id, &analysis).await?;

    notifications::notify(
        &state.pool,
        vendor.id,
        "Risk assessment completed",
        &format!(
            "A new risk assessment scored your account {} ({}).",
            assessment.score, assessment.level
        ),
    )
    .await?;

    info!(vendor_id = %vendor.id, score = assessment.score, "risk assessment recorded");
    Ok(assessment.into())
}

/// Aggregate the vendor's invoice history into the scorer's input.
async fn build_snapshot(pool: &PgPool, vendor_id: Uuid) -> AppResult<VendorSnapshot> {
    let (transaction_volume, invoice_count, late_deliveries) =
        invoices::vendor_history(pool, vendor_id).await?;
    Ok(VendorSnapshot {
        id: vendor_id,
        transaction_volume,
        invoice_count,
        late_deliveries,
    })
}
