// 💾 Preferences Store - Persisted kiosk settings
// Key-value storage behind a trait so tests can swap in a memory store

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// KEYS
// ============================================================================

/// IANA timezone identifier, or the "local" sentinel
pub const KEY_PREFERRED_TIMEZONE: &str = "preferredTimezone";

/// "light" | "dark"
pub const KEY_THEME: &str = "theme";

/// Named color palette identifier
pub const KEY_COLOR_THEME: &str = "colorTheme";

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Last-value preference storage. Keys are disjoint per feature module;
/// all access is synchronous and single-threaded.
pub trait PreferenceStore {
    /// Returns the stored value, or None when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrites any previous value for the key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes every stored preference.
    fn clear(&mut self) -> Result<()>;
}

// ============================================================================
// SQLITE STORE
// ============================================================================

pub struct SqlitePrefs {
    conn: Connection,
}

pub fn setup_preferences(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

impl SqlitePrefs {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open preferences database at {}", path.display()))?;
        setup_preferences(&conn)?;
        Ok(SqlitePrefs { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_preferences(&conn)?;
        Ok(SqlitePrefs { conn })
    }
}

impl PreferenceStore for SqlitePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM preferences", [])?;
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// All persisted preferences with their effective defaults filled in.
/// Serialized for the CLI `show` mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSnapshot {
    pub preferred_timezone: String,
    pub theme: String,
    pub color_theme: String,
}

impl PreferencesSnapshot {
    pub fn from_store(store: &dyn PreferenceStore) -> Self {
        PreferencesSnapshot {
            preferred_timezone: store
                .get(KEY_PREFERRED_TIMEZONE)
                .unwrap_or_else(|| crate::clock::LOCAL_TIMEZONE.to_string()),
            theme: store
                .get(KEY_THEME)
                .unwrap_or_else(|| crate::theme::ThemeMode::Light.as_str().to_string()),
            color_theme: store
                .get(KEY_COLOR_THEME)
                .unwrap_or_else(|| crate::palette::DEFAULT_PALETTE.to_string()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
