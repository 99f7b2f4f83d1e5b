use crate::error::AppError;
use crate::services::with_store;
use crate::store::Store;
use actix_web::{web, HttpResponse};
use common::forms::{compile, validate, Outcome};
use common::requests::SubmitResponse;
use log::{debug, info, warn};
use serde_json::{Map, Value};

/// Handler for `POST /forms/{id}/submit/`.
///
/// The body must be a JSON object. When every field passes, the cleaned
/// values are stored as a new submission and `{"ok": true}` is returned;
/// otherwise the response is `400` with the messages of every failing field.
pub(crate) async fn process(
    id: web::Path<i64>,
    body: web::Bytes,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let template = with_store(&store, move |s| s.active_template(id))
        .await?
        .ok_or(AppError::NotFound("form template"))?;

    let form = compile(&template.fields).inspect_err(|e| {
        warn!("Template {} cannot accept submissions: {}", id, e);
    })?;
    let payload = decode_payload(&body)?;

    match validate(&form, &payload) {
        Outcome::Valid(data) => {
            let submission = with_store(&store, move |s| s.create_submission(id, data)).await?;
            info!("Stored submission {} for template {}", submission.id, id);
            Ok(HttpResponse::Ok().json(SubmitResponse::accepted()))
        }
        Outcome::Invalid(errors) => {
            debug!("Rejected submission for template {}: {:?}", id, errors);
            Ok(HttpResponse::BadRequest().json(SubmitResponse::rejected(errors)))
        }
    }
}

fn decode_payload(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(_) => Err(AppError::BadRequest("JSON body must be an object".to_string())),
        Err(_) => Err(AppError::BadRequest("Invalid JSON".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::services::forms::configure_routes;
    use crate::services::test_support::json_body;
    use crate::store::test_support::temp_store;
    use crate::store::Store;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    fn submit(id: i64, body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(&format!("/forms/{}/submit/", id))
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_string())
    }

    fn age_template(store: &Store) -> i64 {
        store
            .create_template(
                "Age",
                &json!([{"name": "age", "type": "number", "required": true, "min": 0, "max": 120}]),
                true,
            )
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn accepted_payload_is_stored_cleaned() {
        let (_dir, store) = temp_store();
        let id = age_template(&store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submit(id, r#"{"age": "30", "extra": "ignored"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({"ok": true}));

        let stored = store.submissions_for(id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(Value::Object(stored[0].data.clone()), json!({"age": 30}));
    }

    #[actix_web::test]
    async fn rejected_payload_lists_errors_and_stores_nothing() {
        let (_dir, store) = temp_store();
        let id = age_template(&store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submit(id, r#"{"age": "200"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(resp).await,
            json!({"ok": false, "errors": {"age": ["Ensure this value is less than or equal to 120."]}})
        );

        let resp = test::call_service(&app, submit(id, "{}").to_request()).await;
        assert_eq!(
            json_body(resp).await,
            json!({"ok": false, "errors": {"age": ["This field is required."]}})
        );
        assert!(store.submissions_for(id).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_bodies_are_bad_requests() {
        let (_dir, store) = temp_store();
        let id = age_template(&store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submit(id, "{not json").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], json!("Invalid JSON"));

        let resp = test::call_service(&app, submit(id, r#"["age", 30]"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.submissions_for(id).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn inactive_or_missing_template_is_not_found() {
        let (_dir, store) = temp_store();
        let inactive = store
            .create_template("Old", &json!([{"name": "a"}]), false)
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submit(inactive.id, r#"{"a": "x"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = test::call_service(&app, submit(12345, r#"{"a": "x"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(store.submissions_for(inactive.id).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn select_scenario() {
        let (_dir, store) = temp_store();
        let id = store
            .create_template(
                "Plans",
                &json!([{"name": "plan", "type": "select", "choices": ["basic", "pro"]}]),
                true,
            )
            .unwrap()
            .id;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submit(id, r#"{"plan": "enterprise"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = test::call_service(&app, submit(id, r#"{"plan": "pro"}"#).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.submissions_for(id).unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn other_methods_are_not_allowed() {
        let (_dir, store) = temp_store();
        let id = age_template(&store);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/forms/{}/submit/", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
