//! Vendor risk scoring.
//!
//! A snapshot of a vendor's invoice history is sent to an external
//! large-language-model scorer; the numeric result (0–100, higher =
//! safer) is persisted as a `RiskAssessment`. Scoring never fails the
//! request: a missing API key yields a deterministic mock result and a
//! provider failure yields a neutral fallback.

pub mod gemini;
pub mod queries;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::risk::RiskFactor;

/// Risk scoring errors.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// The vendor data handed to the scorer.
#[derive(Debug, Clone, Serialize)]
pub struct VendorSnapshot {
    pub id: Uuid,
    pub transaction_volume: f64,
    pub invoice_count: i64,
    pub late_deliveries: i64,
}

/// The scorer's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// 0–100, higher means lower risk (safer).
    pub score: i32,
    /// Low, Medium, or High.
    pub level: String,
    pub reasoning: String,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
}

/// Deterministic result used when no API key is configured.
fn mock_analysis() -> RiskAnalysis {
    RiskAnalysis {
        score: 85,
        level: "Low".into(),
        reasoning: "Mock analysis: API key not set.".into(),
        factors: vec![RiskFactor {
            label: "Mock Factor".into(),
            impact: 0.8,
        }],
    }
}

/// Neutral result used when the provider call fails.
fn fallback_analysis() -> RiskAnalysis {
    RiskAnalysis {
        score: 50,
        level: "Medium".into(),
        reasoning: "AI analysis failed, using fallback.".into(),
        factors: Vec::new(),
    }
}

/// Score a vendor snapshot. Falls back to a mock result without an API
/// key and to a neutral result on provider failure — never errors.
pub async fn analyze_vendor_risk(
    client: &Client,
    api_key: Option<&str>,
    snapshot: &VendorSnapshot,
) -> RiskAnalysis {
    let Some(api_key) = api_key else {
        return mock_analysis();
    };
    match gemini::score_vendor(client, api_key, snapshot).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(vendor_id = %snapshot.id, "risk scoring failed: {e}");
            fallback_analysis()
        }
    }
}
