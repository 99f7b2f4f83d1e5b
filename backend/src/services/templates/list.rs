use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use common::requests::TemplateQuery;

/// Handler for `GET /api/templates`. Blank searches list everything.
pub async fn process(
    query: web::Query<TemplateQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    let search = query
        .into_inner()
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let templates = with_store(&store, move |s| s.templates(search.as_deref())).await?;
    Ok(HttpResponse::Ok().json(templates))
}
