//! Risk assessment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// One scored factor contributing to a risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub label: String,
    pub impact: f64,
}

/// A persisted risk assessment for a vendor. `factors` is stored as jsonb.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RiskAssessment {
    pub id: Uuid,
    /// 0–100, higher means lower risk (safer).
    pub score: i32,
    pub level: String,
    pub reasoning: String,
    pub factors: Json<Vec<RiskFactor>>,
    pub created_at: DateTime<Utc>,
    pub vendor_id: Uuid,
}
