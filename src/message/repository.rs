//! Storage layer for user-to-user messages.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::{Result, TutorHubError};

/// A received message joined with its sender's name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InboxMessage {
    pub id: i64,
    pub from_user: i64,
    pub sender_first_name: String,
    pub sender_last_name: String,
    pub body: String,
    pub is_read: bool,
    pub sent_at: NaiveDateTime,
}

impl InboxMessage {
    /// Sender's full display name.
    pub fn sender_name(&self) -> String {
        format!("{} {}", self.sender_first_name, self.sender_last_name)
    }
}

/// Repository for message reads and writes.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message. Messages start unread.
    pub async fn send(&self, from_user: i64, to_user: i64, body: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO messages (from_user, to_user, body) VALUES (?, ?, ?)",
        )
        .bind(from_user)
        .bind(to_user)
        .bind(body)
        .execute(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    /// All messages received by a user, newest first.
    pub async fn inbox(&self, user_id: i64) -> Result<Vec<InboxMessage>> {
        let messages = sqlx::query_as::<_, InboxMessage>(
            "SELECT msg.id,
                    msg.from_user,
                    u.first_name AS sender_first_name,
                    u.last_name AS sender_last_name,
                    msg.body,
                    msg.is_read,
                    msg.sent_at
             FROM messages msg
             JOIN users u ON u.id = msg.from_user
             WHERE msg.to_user = ?
             ORDER BY msg.sent_at DESC, msg.id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(messages)
    }

    /// Bulk-set the read flag on the given messages, scoped to the
    /// recipient so a user cannot toggle someone else's mail.
    pub async fn set_read(&self, user_id: i64, message_ids: &[i64], read: bool) -> Result<u64> {
        if message_ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; message_ids.len()].join(", ");
        let sql = format!(
            "UPDATE messages SET is_read = ? WHERE to_user = ? AND id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql).bind(read).bind(user_id);
        for id in message_ids {
            query = query.bind(id);
        }

        let result = query
            .execute(self.pool)
            .await
            .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Number of unread messages for a user.
    pub async fn count_unread(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE to_user = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

/// Parse the comma-separated id list posted by the dashboard toggles.
///
/// Blank entries are dropped; a non-numeric entry invalidates the whole
/// list.
pub fn parse_id_list(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().ok())
        .collect()
}
