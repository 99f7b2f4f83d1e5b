use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored form template.
///
/// `fields` is kept exactly as it was saved or imported; it is only
/// interpreted when a form is compiled from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormTemplate {
    pub id: i64,
    pub name: String,
    pub fields: Value,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// One element of the bulk interchange array read by `import` and written by
/// `export`. The template `name` is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateEntry {
    pub name: String,
    pub fields: Value,
}

impl From<&FormTemplate> for TemplateEntry {
    fn from(template: &FormTemplate) -> Self {
        TemplateEntry {
            name: template.name.clone(),
            fields: template.fields.clone(),
        }
    }
}

/// Short listing row used by the form index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

impl From<&FormTemplate> for TemplateSummary {
    fn from(template: &FormTemplate) -> Self {
        TemplateSummary {
            id: template.id,
            name: template.name.clone(),
            created_at: template.created_at,
            url: format!("/forms/{}/", template.id),
        }
    }
}
