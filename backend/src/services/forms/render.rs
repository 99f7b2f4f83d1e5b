use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use common::forms::compile;
use common::requests::FormShell;
use log::warn;

/// Handler for `GET /forms/{id}/`.
///
/// Loads the active template, compiles it and answers with the empty form
/// shell. A template whose fields do not compile answers `422`.
pub(crate) async fn process(
    id: web::Path<i64>,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let template = with_store(&store, move |s| s.active_template(id))
        .await?
        .ok_or(AppError::NotFound("form template"))?;

    let form = compile(&template.fields).inspect_err(|e| {
        warn!("Template {} cannot be rendered: {}", id, e);
    })?;

    Ok(HttpResponse::Ok().json(FormShell {
        id,
        name: template.name,
        submit_url: format!("/forms/{}/submit/", id),
        fields: form.shell(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::services::forms::configure_routes;
    use crate::services::test_support::json_body;
    use crate::store::test_support::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::json;

    #[actix_web::test]
    async fn renders_fields_in_template_order() {
        let (_dir, store) = temp_store();
        let template = store
            .create_template(
                "Signup",
                &json!([
                    {"name": "email", "type": "email", "label": "E-mail", "required": true,
                     "placeholder": "you@example.com"},
                    {"name": "plan", "type": "select", "choices": ["basic", ["pro", "Pro"]]},
                    {"name": "age", "type": "number", "min": 0, "max": 120, "help_text": "Years"}
                ]),
                true,
            )
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let uri = format!("/forms/{}/", template.id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["name"], json!("Signup"));
        assert_eq!(body["submit_url"], json!(format!("/forms/{}/submit/", template.id)));
        assert_eq!(
            body["fields"][0],
            json!({
                "name": "email",
                "type": "email",
                "label": "E-mail",
                "required": true,
                "widget": {"input": "text", "attrs": {"placeholder": "you@example.com"}}
            })
        );
        assert_eq!(
            body["fields"][1]["choices"],
            json!([{"value": "basic", "label": "basic"}, {"value": "pro", "label": "Pro"}])
        );
        assert_eq!(body["fields"][2]["widget"]["attrs"], json!({"min": 0, "max": 120}));
        assert_eq!(body["fields"][2]["help_text"], json!("Years"));
    }

    #[actix_web::test]
    async fn missing_or_inactive_template_is_not_found() {
        let (_dir, store) = temp_store();
        let inactive = store.create_template("Old", &json!([]), false).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        for uri in [format!("/forms/{}/", inactive.id), "/forms/999/".to_string()] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[actix_web::test]
    async fn malformed_fields_are_reported() {
        let (_dir, store) = temp_store();
        let broken = store
            .create_template("Broken", &json!([{"label": "no name"}]), true)
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let uri = format!("/forms/{}/", broken.id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert_eq!(body["ok"], json!(false));
    }
}
