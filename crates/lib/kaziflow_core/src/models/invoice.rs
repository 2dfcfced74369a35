//! Invoice domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
    Financed,
}

/// An invoice submitted by a vendor, optionally addressed to a retailer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub amount: f64,
    pub description: String,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub vendor_id: Uuid,
    pub retailer_id: Option<Uuid>,
    /// QR code for the invoice as a data URL, rendered at creation.
    pub qr_code: Option<String>,
    pub is_verified: bool,
    pub ai_risk_score: Option<i32>,
}

/// Fields for inserting an invoice. The id and QR code are generated
/// by `invoices::create`.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub amount: f64,
    pub description: String,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub vendor_id: Uuid,
    pub retailer_id: Option<Uuid>,
    pub is_verified: bool,
    pub ai_risk_score: Option<i32>,
}
