use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use log::info;

/// Handler for `DELETE /api/templates/{id}`. Submissions of the template are
/// removed by the store's cascade.
pub async fn process(id: web::Path<i64>, store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    if !with_store(&store, move |s| s.delete_template(id)).await? {
        return Err(AppError::NotFound("form template"));
    }
    info!("Deleted template {}", id);
    Ok(HttpResponse::NoContent().finish())
}
