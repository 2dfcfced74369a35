//! Invoice request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use kaziflow_core::invoices;
use kaziflow_core::models::auth::Role;
use kaziflow_core::models::invoice::{InvoiceStatus, NewInvoice};
use kaziflow_core::notifications;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentAccount;
use crate::models::{CreateInvoiceRequest, InvoiceResponse};

/// `GET /invoices` — vendors see only their own invoices; reviewing roles
/// (retailer, bank, admin) see all of them.
pub async fn list_invoices_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
) -> AppResult<Json<Vec<InvoiceResponse>>> {
    let rows = match account.0.role {
        Role::Vendor => invoices::list_for_vendor(&state.pool, account.0.id).await?,
        _ => invoices::list_all(&state.pool).await?,
    };
    Ok(Json(rows.into_iter().map(InvoiceResponse::from).collect()))
}

/// `POST /invoices` — submit an invoice. The caller becomes the vendor;
/// the QR code is rendered and stored with the row, and a named retailer
/// is notified.
pub async fn create_invoice_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
    Json(body): Json<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = invoices::create(
        &state.pool,
        &NewInvoice {
            amount: body.amount,
            description: body.description,
            status: InvoiceStatus::Pending,
            due_date: body.due_date,
            vendor_id: account.0.id,
            retailer_id: body.retailer_id,
            is_verified: false,
            ai_risk_score: None,
        },
    )
    .await?;

    if let Some(retailer_id) = invoice.retailer_id {
        notifications::notify(
            &state.pool,
            retailer_id,
            "New invoice received",
            &format!(
                "{} submitted an invoice for {:.0}.",
                account.0.full_name, invoice.amount
            ),
        )
        .await?;
    }

    Ok((StatusCode::CREATED, Json(invoice.into())))
}
