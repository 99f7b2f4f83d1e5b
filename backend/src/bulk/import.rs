use super::BulkError;
use crate::store::{Store, Upsert};
use common::model::template::TemplateEntry;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Reads the interchange file at `path` and upserts each template by name.
///
/// An unreadable file, invalid JSON or a top level that is not an array
/// aborts the import. Individual entries that are malformed are skipped.
pub fn import_templates(store: &Store, path: &Path) -> Result<ImportReport, BulkError> {
    let raw = fs::read_to_string(path).map_err(|source| BulkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&raw)?;
    let entries = data.as_array().ok_or(BulkError::NotAList)?;

    let mut report = ImportReport::default();
    for entry in entries {
        let entry = match parse_entry(entry) {
            Ok(entry) => entry,
            Err(reason) => {
                warn!("Skipping template entry: {}", reason);
                report.skipped += 1;
                continue;
            }
        };
        match store.upsert_template_by_name(&entry.name, &entry.fields)? {
            Upsert::Created(_) => report.created += 1,
            Upsert::Updated(_) => report.updated += 1,
        }
        info!("Imported/updated template: {}", entry.name);
    }

    info!(
        "Done. Created: {}, Updated: {}, Skipped: {}",
        report.created, report.updated, report.skipped
    );
    Ok(report)
}

fn parse_entry(entry: &Value) -> Result<TemplateEntry, String> {
    let (Some(name), Some(fields)) = (entry.get("name"), entry.get("fields")) else {
        return Err(format!("missing \"name\" or \"fields\" in {}", entry));
    };
    let Some(name) = name.as_str() else {
        return Err(format!("template name must be a string, got {}", name));
    };
    if !fields.is_array() {
        return Err(format!("invalid fields for template \"{}\", expected list", name));
    }
    Ok(TemplateEntry {
        name: name.to_string(),
        fields: fields.clone(),
    })
}
