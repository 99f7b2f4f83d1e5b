use super::contract::{CompiledForm, FieldContract};
use crate::model::field::{json_text, truthy, FieldKind};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const INVALID_NUMBER: &str = "Enter a whole number.";

/// `"30.0"` and `"30.00 "` are accepted as whole numbers.
static TRAILING_ZEROS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.0*\s*$").expect("trailing zeros pattern is valid"));

/// Error messages keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of checking a payload against a compiled form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every field passed; holds one cleaned value per field.
    Valid(Map<String, Value>),
    /// At least one field failed; holds every message of every failing field.
    Invalid(FieldErrors),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }
}

/// Checks `payload` against every field of `form`.
///
/// Fields are independent: one failing field does not stop the others from
/// being evaluated. Within a field, a value that cannot be coerced, a missing
/// required value or an unknown choice is reported alone; otherwise every
/// rule runs and all failures are collected.
pub fn validate(form: &CompiledForm, payload: &Map<String, Value>) -> Outcome {
    let mut cleaned = Map::new();
    let mut errors = FieldErrors::new();

    for contract in form.fields() {
        match clean_field(contract, payload.get(&contract.name)) {
            Ok(value) => {
                cleaned.insert(contract.name.clone(), value);
            }
            Err(messages) => {
                errors.insert(contract.name.clone(), messages);
            }
        }
    }

    if errors.is_empty() {
        Outcome::Valid(cleaned)
    } else {
        Outcome::Invalid(errors)
    }
}

fn clean_field(contract: &FieldContract, raw: Option<&Value>) -> Result<Value, Vec<String>> {
    let value = coerce(contract.kind, raw).map_err(|message| vec![message])?;

    if is_empty(&value) {
        if contract.required {
            return Err(vec![REQUIRED.to_string()]);
        }
        return Ok(value);
    }

    if let Some(choices) = &contract.choices {
        let text = json_text(&value);
        if !choices.iter().any(|c| c.value == text) {
            return Err(vec![format!(
                "Select a valid choice. {} is not one of the available choices.",
                text
            )]);
        }
    }

    let messages: Vec<String> = contract
        .rules
        .iter()
        .filter_map(|rule| rule.check(&value))
        .collect();
    if messages.is_empty() {
        Ok(value)
    } else {
        Err(messages)
    }
}

/// Converts the raw payload value to the field's cleaned type. Empty input
/// becomes the kind's neutral value: `""`, `null` or `false`.
fn coerce(kind: FieldKind, raw: Option<&Value>) -> Result<Value, String> {
    match kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Email => {
            let text = raw.map(json_text).unwrap_or_default();
            Ok(Value::String(text.trim().to_string()))
        }
        FieldKind::Number => {
            let text = raw.map(json_text).unwrap_or_default();
            let text = text.trim();
            if text.is_empty() {
                return Ok(Value::Null);
            }
            TRAILING_ZEROS
                .replace(text, "")
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| INVALID_NUMBER.to_string())
        }
        FieldKind::Checkbox => Ok(Value::Bool(match raw {
            None => false,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") || s == "0" => false,
            Some(value) => truthy(value),
        })),
        FieldKind::Select => Ok(Value::String(raw.map(json_text).unwrap_or_default())),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
