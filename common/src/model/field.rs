use crate::forms::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// The closed set of input kinds a descriptor can ask for.
///
/// Descriptors carry the kind as a free-form `type` tag. Tags outside this
/// set are not rejected: they resolve to [`FieldKind::Text`], which keeps old
/// templates with hand-written tags usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Textarea,
    Select,
    Checkbox,
}

impl FieldKind {
    /// Resolves a `type` tag, falling back to `Text` for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "textarea" => FieldKind::Textarea,
            "select" => FieldKind::Select,
            "checkbox" => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    /// Whether pattern and bound rules may be attached to this kind.
    pub fn accepts_rules(&self) -> bool {
        !matches!(self, FieldKind::Checkbox)
    }

    /// Kinds whose cleaned value is free text.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Textarea | FieldKind::Email
        )
    }
}

/// One option of a `select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Typed view of one entry of a template's `fields` list.
///
/// Templates store their fields as raw JSON so that whatever an administrator
/// saved is exported back verbatim. This struct is what the compiler reads
/// after checking the entry's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub validation: Option<String>,
    pub min: Option<Number>,
    pub max: Option<Number>,
    /// Resolved options; only populated for `select`.
    pub choices: Vec<Choice>,
}

impl FieldDescriptor {
    /// Parses the descriptor at position `index` of a `fields` list.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, SchemaError> {
        let map = value
            .as_object()
            .ok_or(SchemaError::FieldNotMapping { index })?;

        let name = match map.get("name") {
            None => return Err(SchemaError::MissingName { index }),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(SchemaError::InvalidName { index }),
        };

        let kind = present(map, "type")
            .and_then(Value::as_str)
            .map(FieldKind::from_tag)
            .unwrap_or(FieldKind::Text);

        let validation = match present(map, "validation") {
            None => None,
            Some(Value::String(pattern)) => Some(pattern.clone()),
            Some(_) => {
                return Err(SchemaError::InvalidPattern {
                    name,
                    reason: "pattern must be a string".to_string(),
                });
            }
        };

        let min = bound(map, &name, "min")?;
        let max = bound(map, &name, "max")?;

        let choices = if kind == FieldKind::Select {
            parse_choices(map, &name)?
        } else {
            Vec::new()
        };

        Ok(FieldDescriptor {
            kind,
            label: present(map, "label").and_then(display_text).unwrap_or_default(),
            required: present(map, "required").map(truthy).unwrap_or(false),
            placeholder: present(map, "placeholder").and_then(display_text),
            help_text: present(map, "help_text").and_then(display_text),
            validation,
            min,
            max,
            choices,
            name,
        })
    }
}

/// Looks up an optional key, treating an explicit `null` as absent.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn bound(map: &Map<String, Value>, name: &str, key: &'static str) -> Result<Option<Number>, SchemaError> {
    match present(map, key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(SchemaError::InvalidBound {
            name: name.to_string(),
            key,
        }),
    }
}

fn parse_choices(map: &Map<String, Value>, name: &str) -> Result<Vec<Choice>, SchemaError> {
    let entries = match present(map, "choices") {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(SchemaError::ChoicesNotSequence {
                name: name.to_string(),
            });
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Array(pair) if pair.len() == 2 && is_scalar(&pair[0]) => Ok(Choice {
                value: json_text(&pair[0]),
                label: json_text(&pair[1]),
            }),
            scalar if is_scalar(scalar) => Ok(Choice {
                value: json_text(scalar),
                label: json_text(scalar),
            }),
            _ => Err(SchemaError::InvalidChoice {
                name: name.to_string(),
                index,
            }),
        })
        .collect()
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Display strings are kept only when non-empty.
fn display_text(value: &Value) -> Option<String> {
    let text = json_text(value);
    (!text.is_empty()).then_some(text)
}

/// Text form of a JSON value as it would be typed into an input.
pub(crate) fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// JSON truthiness: `null`, `false`, zero and empty containers are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
