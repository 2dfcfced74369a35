//! Demo data seeding.
//!
//! Populates an empty database with a demo fixture: one account per role
//! (plus a second vendor) and a few invoices in different lifecycle
//! states. Skips when accounts already exist.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::auth::queries::{account_count, create_account};
use crate::auth::AuthError;
use crate::invoices;
use crate::models::auth::{NewAccount, Role};
use crate::models::invoice::{InvoiceStatus, NewInvoice};

/// Shared demo password for all seeded accounts.
const DEMO_PASSWORD: &str = "password123";

/// Seed the demo fixture. No-op when the database already has accounts.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), AuthError> {
    if account_count(pool).await? > 0 {
        info!("database already contains accounts, skipping seeding");
        return Ok(());
    }

    info!("seeding accounts...");
    let hashed = hash_password(DEMO_PASSWORD)?;

    let fixtures = [
        ("admin@kaziflow.com", "System Administrator", Role::Admin, Some("KaziFlow HQ")),
        ("bank@bk.rw", "BK Financing Officer", Role::Bank, Some("Bank of Kigali")),
        ("simba@retail.rw", "Simba Supermarket Manager", Role::Retailer, Some("Simba Supermarket")),
        ("vendor@agri.rw", "Jean Bosco", Role::Vendor, Some("Bosco Agri-Supplies")),
        ("farmer@coop.rw", "Alice Mutoni", Role::Vendor, Some("Musanze Farmer Group")),
    ];

    let mut accounts = Vec::with_capacity(fixtures.len());
    for (email, full_name, role, company) in fixtures {
        let account = create_account(
            pool,
            &NewAccount {
                email: email.to_string(),
                full_name: full_name.to_string(),
                role,
                company_name: company.map(str::to_string),
                hashed_password: hashed.clone(),
            },
        )
        .await?;
        accounts.push(account);
    }

    let vendor = &accounts[3];
    let farmer = &accounts[4];
    let retailer = &accounts[2];

    info!("seeding invoices...");
    let demo_invoices = [
        NewInvoice {
            amount: 750_000.0,
            description: "Supply of 500kg Premium Coffee Beans".to_string(),
            status: InvoiceStatus::Approved,
            due_date: Utc::now() + Duration::days(30),
            vendor_id: vendor.id,
            retailer_id: Some(retailer.id),
            is_verified: true,
            ai_risk_score: Some(92),
        },
        NewInvoice {
            amount: 1_200_000.0,
            description: "Delivery of Organic Fertilizer - Batch 44".to_string(),
            status: InvoiceStatus::Pending,
            due_date: Utc::now() + Duration::days(45),
            vendor_id: vendor.id,
            retailer_id: Some(retailer.id),
            is_verified: false,
            ai_risk_score: None,
        },
        NewInvoice {
            amount: 300_000.0,
            description: "Fresh Vegetables - Weekly Supply".to_string(),
            status: InvoiceStatus::Paid,
            due_date: Utc::now() - Duration::days(5),
            vendor_id: farmer.id,
            retailer_id: Some(retailer.id),
            is_verified: true,
            ai_risk_score: Some(85),
        },
    ];

    for new in &demo_invoices {
        invoices::create(pool, new).await?;
    }

    info!("data seeding completed");
    Ok(())
}
