//! Bulk interchange of templates as a JSON array of
//! `{"name": ..., "fields": [...]}` objects.
//!
//! `import` upserts by name and skips malformed entries with a warning;
//! `export` writes every template, active or not.

mod export;
mod import;

pub use export::export_templates;
pub use import::import_templates;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BulkError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to read JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON must be a list of templates")]
    NotAList,
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}
