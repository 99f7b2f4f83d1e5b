use crate::forms::{FieldErrors, Widget};
use crate::model::field::{Choice, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /forms/{id}/`: what a client needs to draw the empty form.
#[derive(Debug, Clone, Serialize)]
pub struct FormShell {
    pub id: i64,
    pub name: String,
    pub submit_url: String,
    pub fields: Vec<FieldShell>,
}

/// One input of a [`FormShell`].
#[derive(Debug, Clone, Serialize)]
pub struct FieldShell {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldKind,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
}

/// Body of `POST /forms/{id}/submit/` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl SubmitResponse {
    pub fn accepted() -> Self {
        SubmitResponse {
            ok: true,
            errors: None,
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        SubmitResponse {
            ok: false,
            errors: Some(errors),
        }
    }
}

/// Body of every non-validation error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// Request payload of `POST /api/templates/save`.
///
/// Without an `id` a new template is created; with one, the existing
/// template's name, fields and flag are replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSave {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub fields: Value,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Query string of `GET /api/templates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateQuery {
    pub search: Option<String>,
}
