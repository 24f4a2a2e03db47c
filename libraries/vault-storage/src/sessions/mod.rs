//! Per-user session documents
//!
//! Each row holds the whole document as JSON and is replaced in one
//! statement, so a reader never observes a half-written session.

use crate::error::Result;
use sqlx::{Row, SqlitePool};
use vault_core::SessionDocument;

/// Get the document stored for a user
pub async fn get(pool: &SqlitePool, user_id: &str) -> Result<Option<SessionDocument>> {
    let row = sqlx::query("SELECT document FROM session_documents WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let json: String = row.try_get("document")?;
            Ok(Some(serde_json::from_str(&json)?))
        }
        None => Ok(None),
    }
}

/// Create or replace a user's document
pub async fn upsert(pool: &SqlitePool, user_id: &str, document: &SessionDocument) -> Result<()> {
    let json = serde_json::to_string(document)?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO session_documents (user_id, document, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET
            document = excluded.document,
            updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(json)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a user's document, returning whether one existed
pub async fn delete(pool: &SqlitePool, user_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM session_documents WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Last update time (unix seconds) of a user's document
pub async fn updated_at(pool: &SqlitePool, user_id: &str) -> Result<Option<i64>> {
    let row = sqlx::query("SELECT updated_at FROM session_documents WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| r.try_get::<i64, _>("updated_at"))
        .transpose()
        .map_err(Into::into)
}
