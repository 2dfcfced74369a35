//! Invoice queries.
//!
//! Invoices are listed by ownership (vendors see their own, reviewing
//! roles see everything) and created with an app-side UUIDv7 id so the QR
//! code can be rendered before the single insert.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::invoice::{Invoice, NewInvoice};
use crate::qr;
use crate::uuid::uuidv7;

/// List every invoice, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "SELECT id, amount, description, status, due_date, created_at, \
                vendor_id, retailer_id, qr_code, is_verified, ai_risk_score \
         FROM invoices ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// List the invoices owned by one vendor, newest first.
pub async fn list_for_vendor(pool: &PgPool, vendor_id: Uuid) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "SELECT id, amount, description, status, due_date, created_at, \
                vendor_id, retailer_id, qr_code, is_verified, ai_risk_score \
         FROM invoices WHERE vendor_id = $1 ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await
}

/// Insert an invoice with a fresh UUIDv7 id and its rendered QR code.
pub async fn create(pool: &PgPool, new: &NewInvoice) -> Result<Invoice, sqlx::Error> {
    let id = uuidv7();
    let qr_code = match qr::invoice_qr_data_url(id) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(invoice_id = %id, "QR rendering failed: {e}");
            None
        }
    };

    sqlx::query_as::<_, Invoice>(
        "INSERT INTO invoices \
            (id, amount, description, status, due_date, vendor_id, retailer_id, \
             qr_code, is_verified, ai_risk_score) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id, amount, description, status, due_date, created_at, \
                   vendor_id, retailer_id, qr_code, is_verified, ai_risk_score",
    )
    .bind(id)
    .bind(new.amount)
    .bind(&new.description)
    .bind(new.status)
    .bind(new.due_date)
    .bind(new.vendor_id)
    .bind(new.retailer_id)
    .bind(qr_code)
    .bind(new.is_verified)
    .bind(new.ai_risk_score)
    .fetch_one(pool)
    .await
}

/// Aggregate a vendor's invoice history for risk scoring:
/// (total amount, invoice count, overdue-and-unpaid count).
pub async fn vendor_history(pool: &PgPool, vendor_id: Uuid) -> Result<(f64, i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (f64, i64, i64)>(
        "SELECT COALESCE(SUM(amount), 0)::double precision, \
                COUNT(*), \
                COUNT(*) FILTER (WHERE due_date < now() AND status NOT IN ('paid', 'financed')) \
         FROM invoices WHERE vendor_id = $1",
    )
    .bind(vendor_id)
    .fetch_one(pool)
    .await
}
