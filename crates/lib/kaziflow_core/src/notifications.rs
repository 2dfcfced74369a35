//! Notification queries.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::uuid::uuidv7;

/// List an account's notifications, newest first.
pub async fn list_for_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT id, account_id, title, message, is_read, created_at \
         FROM notifications WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

/// Create a notification for one account.
pub async fn notify(
    pool: &PgPool,
    account_id: Uuid,
    title: &str,
    message: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO notifications (id, account_id, title, message) VALUES ($1, $2, $3, $4)")
        .bind(uuidv7())
        .bind(account_id)
        .bind(title)
        .bind(message)
        .execute(pool)
        .await?;
    Ok(())
}

/// Mark one of the account's notifications as read.
///
/// A notification id that does not belong to the account is a silent
/// no-op, matching the listing scope.
pub async fn mark_read(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notifications SET is_read = true WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(())
}
