use super::BulkError;
use crate::store::Store;
use common::model::template::TemplateEntry;
use log::info;
use std::fs;
use std::path::Path;

/// Writes every template, in creation order, to `path`. Returns how many
/// templates were written.
pub fn export_templates(store: &Store, path: &Path) -> Result<usize, BulkError> {
    let entries: Vec<TemplateEntry> = store
        .templates_by_id()?
        .iter()
        .map(TemplateEntry::from)
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json).map_err(|source| BulkError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} templates to {}", entries.len(), path.display());
    Ok(entries.len())
}
