//! Risk assessment queries.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use super::{RiskAnalysis, RiskError};
use crate::models::risk::RiskAssessment;
use crate::uuid::uuidv7;

/// Persist a scored analysis for a vendor, returning the stored row.
pub async fn insert_assessment(
    pool: &PgPool,
    vendor_id: Uuid,
    analysis: &RiskAnalysis,
) -> Result<RiskAssessment, RiskError> {
    let row = sqlx::query_as::<_, RiskAssessment>(
        "INSERT INTO risk_assessments (id, score, level, reasoning, factors, vendor_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, score, level, reasoning, factors, created_at, vendor_id",
    )
    .bind(uuidv7())
    .bind(analysis.score)
    .bind(&analysis.level)
    .bind(&analysis.reasoning)
    .bind(Json(&analysis.factors))
    .bind(vendor_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
