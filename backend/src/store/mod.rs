//! SQLite persistence for templates and submissions.
//!
//! A [`Store`] only remembers where the database file lives; every operation
//! opens its own connection, the same way a request handler would. Foreign
//! keys are switched on for each connection so that deleting a template also
//! deletes its submissions.

mod submissions;
mod templates;

pub use templates::Upsert;

use log::debug;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS form_templates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    fields TEXT NOT NULL,
    created_at TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS idx_form_templates_name ON form_templates (name);
CREATE TABLE IF NOT EXISTS form_submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    template_id INTEGER NOT NULL REFERENCES form_templates (id) ON DELETE CASCADE,
    data TEXT NOT NULL,
    submitted_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_form_submissions_template ON form_submissions (template_id);
";

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and makes sure the
    /// tables exist.
    pub fn open(path: impl Into<PathBuf>) -> rusqlite::Result<Self> {
        let store = Store { path: path.into() };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)?;
        debug!("Schema ready in {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}
