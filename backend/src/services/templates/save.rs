use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use common::forms::compile;
use common::model::template::FormTemplate;
use common::requests::TemplateSave;
use log::{info, warn};

/// Longest template name accepted.
const MAX_NAME_LENGTH: usize = 200;

pub async fn process(
    payload: web::Json<TemplateSave>,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    let template = save_template(payload.into_inner(), &store).await?;
    Ok(HttpResponse::Ok().json(template))
}

/// Creates or updates a template. Fields that would not compile are refused
/// so a saved template can always be rendered.
async fn save_template(
    payload: TemplateSave,
    store: &Store,
) -> Result<FormTemplate, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "template name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "template name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    compile(&payload.fields).inspect_err(|e| {
        warn!("Refusing to save template \"{}\": {}", name, e);
    })?;

    let TemplateSave {
        id,
        fields,
        is_active,
        ..
    } = payload;
    let template = match id {
        Some(id) => with_store(store, move |s| s.update_template(id, &name, &fields, is_active))
            .await?
            .ok_or(AppError::NotFound("form template"))?,
        None => with_store(store, move |s| s.create_template(&name, &fields, is_active)).await?,
    };
    info!("Saved template {} ({})", template.id, template.name);
    Ok(template)
}

#[cfg(test)]
mod tests {
    use crate::services::templates::configure_routes;
    use crate::services::test_support::json_body;
    use crate::store::test_support::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::json;

    #[actix_web::test]
    async fn creates_then_updates() {
        let (_dir, store) = temp_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(json!({"name": " Signup ", "fields": [{"name": "email", "type": "email"}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created = json_body(resp).await;
        assert_eq!(created["name"], json!("Signup"));
        assert_eq!(created["is_active"], json!(true));
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(json!({"id": id, "name": "Signup v2", "fields": [], "is_active": false}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = store.template(id).unwrap().unwrap();
        assert_eq!(stored.name, "Signup v2");
        assert_eq!(stored.fields, json!([]));
        assert!(!stored.is_active);
        assert_eq!(json!(stored.created_at), created["created_at"]);
    }

    #[actix_web::test]
    async fn refuses_fields_that_do_not_compile() {
        let (_dir, store) = temp_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(json!({"name": "Broken", "fields": {"name": "a"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.templates(None).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn refuses_blank_names_and_unknown_ids() {
        let (_dir, store) = temp_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(json!({"name": "  ", "fields": []}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(json!({"id": 77, "name": "Ghost", "fields": []}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
