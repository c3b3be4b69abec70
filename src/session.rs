use crate::types::{SavedView, SessionStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;

const SCHEMA_VERSION: i32 = 1;

/// `SQLite` store for between-run session state: the view the user left
/// on and the one-shot came-from-search flag that suppresses restoring
/// a stale search display.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the session database.
    pub fn open() -> Result<Self> {
        let path = Self::store_path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }

        let conn = Connection::open(&path).context("Failed to open session database")?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Get the path to the session database.
    pub fn store_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir().context("Could not determine cache directory")?;
        Ok(cache_dir.join("parcelview").join("session.db"))
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let version = self
            .get_metadata("schema_version")
            .unwrap_or(None)
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            self.conn
                .execute_batch(
                    r"
                    CREATE TABLE IF NOT EXISTS metadata (
                        key TEXT PRIMARY KEY,
                        value TEXT
                    );
                    ",
                )
                .context("Failed to create schema")?;

            self.set_metadata("schema_version", &SCHEMA_VERSION.to_string())?;
        }

        Ok(())
    }

    /// Get a metadata value.
    fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a metadata value.
    fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a metadata value.
    fn clear_metadata(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM metadata WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SessionStore for SqliteStore {
    fn load_last_view(&self) -> Result<Option<SavedView>> {
        let Some(raw) = self.get_metadata("last_view")? else {
            return Ok(None);
        };

        // Entries older than 24 hours are ignored.
        let is_stale = self
            .get_metadata("last_view_saved_at")?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .is_none_or(|saved_at| Utc::now() - saved_at >= Duration::hours(24));
        if is_stale {
            return Ok(None);
        }

        Ok(SavedView::parse(&raw))
    }

    fn save_last_view(&self, view: &SavedView) -> Result<()> {
        self.set_metadata("last_view", &view.encode())?;
        self.set_metadata("last_view_saved_at", &Utc::now().to_rfc3339())
    }

    fn set_from_search(&self) -> Result<()> {
        self.set_metadata("from_search", "1")
    }

    fn take_from_search(&self) -> Result<bool> {
        let was_set = self.get_metadata("from_search")?.is_some();
        if was_set {
            self.clear_metadata("from_search")?;
        }
        Ok(was_set)
    }
}
