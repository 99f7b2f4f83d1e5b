//! # Template Retrieval Service
//!
//! Backs `GET /api/templates/{id}`. The template is returned exactly as
//! stored, including inactive ones and templates whose fields would not
//! compile, so that an administrator can inspect and fix them.

use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /api/templates/{id}`.
///
/// # Returns
/// - `200 OK` with the `FormTemplate` as JSON.
/// - `404 Not Found` when no template has this id.
pub async fn process(id: web::Path<i64>, store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let template = with_store(&store, move |s| s.template(id))
        .await?
        .ok_or(AppError::NotFound("form template"))?;
    Ok(HttpResponse::Ok().json(template))
}
