use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An accepted submission. `data` holds the cleaned values produced by the
/// validator, one entry per field of the template at submit time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSubmission {
    pub id: i64,
    pub template_id: i64,
    pub data: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
}
