//! Public form endpoints.
//!
//! The routes are:
//! - `GET /forms/`: active templates, newest first.
//! - `GET /forms/{id}/`: the form shell of an active template. Inactive and
//!   unknown ids answer `404`.
//! - `POST /forms/{id}/submit/`: validates a JSON object against the template
//!   and stores it when every field passes. Other methods answer `405`.
//!
//! Each request compiles the template again; nothing is cached between calls.

mod index;
mod render;
mod submit;

use actix_web::web::{get, post, resource, route, scope};
use actix_web::{HttpResponse, Scope};
use common::requests::ErrorBody;

const API_PATH: &str = "/forms";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/", get().to(index::process))
        .route("/{id}/", get().to(render::process))
        .service(
            resource("/{id}/submit/")
                .route(post().to(submit::process))
                .default_service(route().to(method_not_allowed)),
        )
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody {
        ok: false,
        error: "method not allowed".to_string(),
    })
}
