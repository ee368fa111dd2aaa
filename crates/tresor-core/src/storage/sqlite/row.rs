//! Secret row type for database queries.

use chrono::{DateTime, Utc};

use crate::error::{Result, TresorError};
use crate::secret::Secret;

/// Raw row data from the secret table, before parsing into domain types.
#[derive(Debug)]
pub struct SecretRow {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub salt: String,
    pub created_at: String,
}

impl SecretRow {
    pub const COLUMNS: &'static str = "id, user_id, content, salt, created_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            content: row.get(2)?,
            salt: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl TryFrom<SecretRow> for Secret {
    type Error = TresorError;

    fn try_from(row: SecretRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| TresorError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Secret::from_parts(row.id, row.user_id, row.content, row.salt, created_at)
    }
}
