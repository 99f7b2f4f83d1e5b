use super::email::is_valid_email;
use super::error::SchemaError;
use crate::model::field::{json_text, Choice, FieldDescriptor, FieldKind};
use crate::requests::FieldShell;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

pub(crate) const INVALID_FORMAT: &str = "Invalid format.";
pub(crate) const INVALID_EMAIL: &str = "Enter a valid email address.";
pub(crate) const NULL_CHARACTERS: &str = "Null characters are not allowed.";

/// A numeric limit as written in the descriptor.
///
/// The JSON number is kept as given so messages and client hints show the
/// limit the way the administrator typed it.
#[derive(Debug, Clone)]
pub struct Bound {
    limit: Number,
}

impl Bound {
    pub fn new(limit: Number) -> Self {
        Bound { limit }
    }

    /// Orders `value` against the limit; `None` when it does not read as a
    /// number. Two integers compare exactly, anything else as `f64`.
    fn compare(&self, value: &Value) -> Option<Ordering> {
        let n = numeric(value)?;
        match (n.as_i64(), self.limit.as_i64()) {
            (Some(v), Some(limit)) => Some(v.cmp(&limit)),
            _ => n.as_f64()?.partial_cmp(&self.limit.as_f64()?),
        }
    }
}

/// A check run on a field's value once it has been coerced and is not empty.
#[derive(Debug, Clone)]
pub enum Rule {
    Email,
    Pattern(Regex),
    Min(Bound),
    Max(Bound),
    NoNullCharacters,
}

impl Rule {
    /// Returns the error message when `value` breaks the rule.
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Rule::Email => (!is_valid_email(&json_text(value))).then(|| INVALID_EMAIL.to_string()),
            Rule::Pattern(regex) => {
                (!regex.is_match(&json_text(value))).then(|| INVALID_FORMAT.to_string())
            }
            Rule::Min(bound) => match bound.compare(value) {
                Some(ord) if ord.is_ge() => None,
                _ => Some(format!(
                    "Ensure this value is greater than or equal to {}.",
                    bound.limit
                )),
            },
            Rule::Max(bound) => match bound.compare(value) {
                Some(ord) if ord.is_le() => None,
                _ => Some(format!(
                    "Ensure this value is less than or equal to {}.",
                    bound.limit
                )),
            },
            Rule::NoNullCharacters => json_text(value)
                .contains('\0')
                .then(|| NULL_CHARACTERS.to_string()),
        }
    }
}

/// Text values take part in bound checks only when they read as a number.
fn numeric(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

/// Client-side rendering hints: the HTML input to use and its attributes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Widget {
    pub input: &'static str,
    pub attrs: Map<String, Value>,
}

impl Widget {
    fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        let input = match descriptor.kind {
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Number => "number",
            FieldKind::Text | FieldKind::Email => "text",
        };

        let mut attrs = Map::new();
        if let Some(placeholder) = &descriptor.placeholder {
            attrs.insert("placeholder".into(), Value::String(placeholder.clone()));
        }
        if let Some(min) = &descriptor.min {
            attrs.insert("min".into(), Value::Number(min.clone()));
        }
        if let Some(max) = &descriptor.max {
            attrs.insert("max".into(), Value::Number(max.clone()));
        }
        if let Some(pattern) = &descriptor.validation {
            attrs.insert("pattern".into(), Value::String(pattern.clone()));
        }
        Widget { input, attrs }
    }
}

/// Everything needed to render and check one field.
#[derive(Debug, Clone)]
pub struct FieldContract {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub help_text: Option<String>,
    pub rules: Vec<Rule>,
    /// Allowed options; `Some` exactly for `select` fields.
    pub choices: Option<Vec<Choice>>,
    pub widget: Widget,
}

impl FieldContract {
    pub fn from_descriptor(descriptor: FieldDescriptor) -> Result<Self, SchemaError> {
        let mut rules = Vec::new();
        if descriptor.kind == FieldKind::Email {
            rules.push(Rule::Email);
        }
        if descriptor.kind.accepts_rules() {
            if let Some(pattern) = &descriptor.validation {
                let regex = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                    name: descriptor.name.clone(),
                    reason: e.to_string(),
                })?;
                rules.push(Rule::Pattern(regex));
            }
            if let Some(min) = &descriptor.min {
                rules.push(Rule::Min(Bound::new(min.clone())));
            }
            if let Some(max) = &descriptor.max {
                rules.push(Rule::Max(Bound::new(max.clone())));
            }
        }
        if descriptor.kind.is_text_like() {
            rules.push(Rule::NoNullCharacters);
        }

        let widget = Widget::for_descriptor(&descriptor);
        let choices = (descriptor.kind == FieldKind::Select).then_some(descriptor.choices);

        Ok(FieldContract {
            name: descriptor.name,
            kind: descriptor.kind,
            label: descriptor.label,
            required: descriptor.required,
            help_text: descriptor.help_text,
            rules,
            choices,
            widget,
        })
    }

    /// The serializable description the client renders an empty input from.
    pub fn shell(&self) -> FieldShell {
        FieldShell {
            name: self.name.clone(),
            field_type: self.kind,
            label: self.label.clone(),
            required: self.required,
            help_text: self.help_text.clone(),
            widget: self.widget.clone(),
            choices: self.choices.clone(),
        }
    }
}

/// The contracts of one template, in the order their descriptors appear.
#[derive(Debug, Clone, Default)]
pub struct CompiledForm {
    fields: Vec<FieldContract>,
}

impl CompiledForm {
    /// Adds a contract. A contract whose name is already present replaces the
    /// earlier one in place.
    pub(crate) fn insert(&mut self, contract: FieldContract) {
        match self.fields.iter().position(|f| f.name == contract.name) {
            Some(slot) => self.fields[slot] = contract,
            None => self.fields.push(contract),
        }
    }

    pub fn fields(&self) -> &[FieldContract] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldContract> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn shell(&self) -> Vec<FieldShell> {
        self.fields.iter().map(FieldContract::shell).collect()
    }
}
