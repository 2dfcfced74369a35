//! API request/response models.
//!
//! Wire DTOs are camelCase; the login response keeps the conventional
//! snake_case bearer-token fields. Account projections never carry the
//! credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kaziflow_core::models::auth::{Account, Role};
use kaziflow_core::models::invoice::{Invoice, InvoiceStatus};
use kaziflow_core::models::notification::Notification;
use kaziflow_core::models::risk::{RiskAssessment, RiskFactor};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Public-safe account projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub company_name: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            full_name: a.full_name,
            role: a.role,
            company_name: a.company_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub amount: f64,
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub retailer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub amount: f64,
    pub description: String,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub vendor_id: Uuid,
    pub retailer_id: Option<Uuid>,
    pub qr_code: Option<String>,
    pub is_verified: bool,
    pub ai_risk_score: Option<i32>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            amount: i.amount,
            description: i.description,
            status: i.status,
            due_date: i.due_date,
            created_at: i.created_at,
            vendor_id: i.vendor_id,
            retailer_id: i.retailer_id,
            qr_code: i.qr_code,
            is_verified: i.is_verified,
            ai_risk_score: i.ai_risk_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResponse {
    pub id: Uuid,
    pub score: i32,
    pub level: String,
    pub reasoning: String,
    pub factors: Vec<RiskFactor>,
    pub created_at: DateTime<Utc>,
    pub vendor_id: Uuid,
}

impl From<RiskAssessment> for RiskAssessmentResponse {
    fn from(r: RiskAssessment) -> Self {
        Self {
            id: r.id,
            score: r.score,
            level: r.level,
            reasoning: r.reasoning,
            factors: r.factors.0,
            created_at: r.created_at,
            vendor_id: r.vendor_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}
