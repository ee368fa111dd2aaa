//! SQLite secret store.
//!
//! Secrets are stored one row each in the `secret` table. The table holds
//! ciphertext and salt only; content is already encrypted before it gets
//! here, so the database file itself is not encrypted.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Result, TresorError};
use crate::secret::{NewSecret, Secret};
use crate::storage::traits::SecretStore;

use row::SecretRow;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS secret (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        content TEXT NOT NULL CHECK (length(content) > 0),
        salt TEXT NOT NULL CHECK (length(salt) > 0),
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS secret_user_id ON secret (user_id);
"#;

/// SQLite-backed secret store.
pub struct SqliteSecretStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteSecretStore {
    /// Create a new store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Storage` if the file already exists or cannot
    /// be created.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(TresorError::Storage(format!(
                "Store already exists at {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "created secret store");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open an existing store file.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::NotFound` if no file exists at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TresorError::NotFound(format!(
                "No secret store at {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "opened secret store");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a transient store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Location of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TresorError::Storage("SQLite connection poisoned".to_string()))
    }
}

impl SecretStore for SqliteSecretStore {
    fn insert(&self, secret: &NewSecret) -> Result<Secret> {
        let conn = self.lock_conn()?;
        let created_at = chrono::Utc::now();

        conn.execute(
            "INSERT INTO secret (user_id, content, salt, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                secret.user_id(),
                secret.ciphertext(),
                secret.salt(),
                created_at.to_rfc3339()
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, user_id = secret.user_id(), "inserted secret");

        Secret::from_parts(
            id,
            secret.user_id(),
            secret.ciphertext().to_string(),
            secret.salt().to_string(),
            created_at,
        )
    }

    fn get(&self, id: i64) -> Result<Option<Secret>> {
        let conn = self.lock_conn()?;

        let row = conn
            .query_row(
                &format!("SELECT {} FROM secret WHERE id = ?1", SecretRow::COLUMNS),
                [id],
                SecretRow::from_row,
            )
            .optional()?;

        row.map(Secret::try_from).transpose()
    }

    fn list_for_user(&self, user_id: i64) -> Result<Vec<Secret>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM secret WHERE user_id = ?1 ORDER BY id ASC",
            SecretRow::COLUMNS
        ))?;
        let rows = stmt.query_map([user_id], SecretRow::from_row)?;

        let mut secrets: Vec<Secret> = Vec::new();
        for row in rows {
            secrets.push(Secret::try_from(row?)?);
        }
        Ok(secrets)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.lock_conn()?;
        let affected = conn.execute("DELETE FROM secret WHERE id = ?1", [id])?;
        debug!(id, deleted = affected > 0, "delete secret");
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::SecretVault;
    use secrecy::SecretString;

    fn sealed(user_id: i64, content: &str) -> NewSecret {
        SecretVault::default()
            .seal(user_id, &SecretString::from("correct horse".to_string()), content)
            .unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = SqliteSecretStore::open_in_memory().unwrap();
        let first = store.insert(&sealed(1, "a")).unwrap();
        let second = store.insert(&sealed(1, "b")).unwrap();

        assert!(second.id() > first.id());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_get_returns_stored_pair() {
        let store = SqliteSecretStore::open_in_memory().unwrap();
        let new_secret = sealed(5, "content");
        let inserted = store.insert(&new_secret).unwrap();

        let fetched = store.get(inserted.id()).unwrap().unwrap();
        assert_eq!(fetched.ciphertext(), new_secret.ciphertext());
        assert_eq!(fetched.salt(), new_secret.salt());
        assert_eq!(fetched.user_id(), 5);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = SqliteSecretStore::open_in_memory().unwrap();
        assert!(store.get(99).unwrap().is_none());
    }

    #[test]
    fn test_list_is_scoped_to_user() {
        let store = SqliteSecretStore::open_in_memory().unwrap();
        store.insert(&sealed(1, "mine")).unwrap();
        store.insert(&sealed(2, "theirs")).unwrap();
        store.insert(&sealed(1, "also mine")).unwrap();

        let mine = store.list_for_user(1).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|s| s.user_id() == 1));
        assert!(mine[0].id() < mine[1].id());
        assert!(store.list_for_user(3).unwrap().is_empty());
    }

    #[test]
    fn test_delete_reports_whether_row_existed() {
        let store = SqliteSecretStore::open_in_memory().unwrap();
        let inserted = store.insert(&sealed(1, "gone soon")).unwrap();

        assert!(store.delete(inserted.id()).unwrap());
        assert!(!store.delete(inserted.id()).unwrap());
        assert!(store.get(inserted.id()).unwrap().is_none());
    }
}
