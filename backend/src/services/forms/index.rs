use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use common::model::template::TemplateSummary;

/// Handler for `GET /forms/`.
pub(crate) async fn process(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let templates = with_store(&store, |s| s.active_templates()).await?;
    let summaries: Vec<TemplateSummary> = templates.iter().map(TemplateSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}
