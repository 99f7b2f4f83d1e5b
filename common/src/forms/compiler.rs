use super::contract::{CompiledForm, FieldContract};
use super::error::SchemaError;
use crate::model::field::FieldDescriptor;
use serde_json::Value;

/// Compiles a template's raw `fields` value.
///
/// `fields` must be a JSON array of objects, each with a string `name`.
/// Unknown `type` tags compile as `text`. When two descriptors share a name
/// the later one wins but keeps the position of the first.
pub fn compile(fields: &Value) -> Result<CompiledForm, SchemaError> {
    let entries = fields.as_array().ok_or(SchemaError::FieldsNotSequence)?;

    let mut form = CompiledForm::default();
    for (index, entry) in entries.iter().enumerate() {
        let descriptor = FieldDescriptor::from_value(index, entry)?;
        form.insert(FieldContract::from_descriptor(descriptor)?);
    }
    Ok(form)
}
