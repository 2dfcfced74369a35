//! Notification domain model.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A notification addressed to one account.
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
