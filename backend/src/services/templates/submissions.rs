use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};

/// Handler for `GET /api/templates/{id}/submissions`.
pub async fn process(id: web::Path<i64>, store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let submissions = with_store(&store, move |s| {
        if s.template(id)?.is_none() {
            return Ok(None);
        }
        s.submissions_for(id).map(Some)
    })
    .await?
    .ok_or(AppError::NotFound("form template"))?;
    Ok(HttpResponse::Ok().json(submissions))
}
