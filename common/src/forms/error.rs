use thiserror::Error;

/// Structural problems in a template's `fields` list.
///
/// Any of these aborts compilation of the whole template; a form is never
/// built from part of its descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("template fields must be a list")]
    FieldsNotSequence,
    #[error("field #{index} must be a mapping")]
    FieldNotMapping { index: usize },
    #[error("field #{index} is missing \"name\"")]
    MissingName { index: usize },
    #[error("field #{index} has a \"name\" that is not a string")]
    InvalidName { index: usize },
    #[error("field \"{name}\" has an invalid pattern: {reason}")]
    InvalidPattern { name: String, reason: String },
    #[error("field \"{name}\": \"{key}\" must be a number")]
    InvalidBound { name: String, key: &'static str },
    #[error("field \"{name}\": choices must be a list")]
    ChoicesNotSequence { name: String },
    #[error("field \"{name}\": choice #{index} must be a value or a [value, label] pair")]
    InvalidChoice { name: String, index: usize },
}
