//! Persisted credential store
//!
//! A small key-value contract durable across restarts. The session layer
//! uses exactly two keys, [`ACCESS_TOKEN_KEY`] and [`REFRESH_TOKEN_KEY`].

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::OptionalExtension;
use std::collections::HashMap;
use std::sync::Arc;

use crate::database::Database;
use crate::Result;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Every key owned by the session.
pub const SESSION_KEYS: [&str; 2] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    /// Write all entries or none of them.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove the given keys. Missing keys are not an error.
    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// Durable store backed by the `credentials` table.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    db: Database,
}

impl SqliteCredentialStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM credentials WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.db.transaction(|conn| {
            for (key, value) in entries {
                conn.execute(
                    "INSERT OR REPLACE INTO credentials (key, value, updated_at)
                     VALUES (?1, ?2, ?3)",
                    rusqlite::params![key, value, updated_at],
                )?;
            }
            Ok(())
        })?;

        tracing::debug!(keys = entries.len(), "Persisted credentials");

        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.db.transaction(|conn| {
            for key in keys {
                conn.execute("DELETE FROM credentials WHERE key = ?1", [key])?;
            }
            Ok(())
        })?;

        tracing::debug!(keys = keys.len(), "Removed credentials");

        Ok(())
    }
}

/// Process-local store, for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.entries.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
