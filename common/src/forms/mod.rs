//! Turns a template's field list into executable form contracts and checks
//! submitted payloads against them.
//!
//! [`compile`] reads the raw `fields` JSON of a template and yields a
//! [`CompiledForm`]: one [`FieldContract`] per descriptor, in template order.
//! [`validate`] applies a compiled form to a decoded JSON object and returns
//! either the cleaned values or every error of every offending field.
//!
//! Both are pure functions. The HTTP layer compiles on every request and never
//! caches the result.

mod compiler;
mod contract;
mod email;
mod error;
mod validator;

pub use compiler::compile;
pub use contract::{Bound, CompiledForm, FieldContract, Rule, Widget};
pub use error::SchemaError;
pub use validator::{validate, FieldErrors, Outcome};
