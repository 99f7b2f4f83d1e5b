//! # Template Administration Module
//!
//! JSON endpoints for managing form templates, mounted under `/api/templates`.
//! They see every template, active or not.
//!
//! ## Sub-modules:
//! - `list`: lists templates, optionally filtered by name.
//! - `get`: returns a single template with its raw fields.
//! - `save`: creates or updates a template after checking that its fields compile.
//! - `delete`: removes a template together with its submissions.
//! - `submissions`: lists the accepted submissions of a template.

mod delete;
mod get;
mod list;
mod save;
mod submissions;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all template administration endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for template administration.
///
/// # Registered Routes:
///
/// *   **`GET /?search=`**: `list::process`, newest first.
/// *   **`POST /save`**: `save::process`. Creates a template when the payload has
///     no `id`, otherwise replaces name, fields and `is_active` of that template.
/// *   **`GET /{id}`**: `get::process`.
/// *   **`DELETE /{id}`**: `delete::process`.
/// *   **`GET /{id}/submissions`**: `submissions::process`, newest first.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/save", post().to(save::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/submissions", get().to(submissions::process))
}
