mod common;

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use common::{MockNotifier, MockObjectStorage, MockSubmissionStore, NotifierMode};
use strelka_server::contact::{handlers::submit_contact, ContactService};
use strelka_server::db::AppState;
use strelka_server::pricelist::verify_pricelist;

fn test_state(pricelist_password: Option<&str>) -> AppState {
    let contact = ContactService::new(
        Arc::new(MockSubmissionStore::new()),
        Arc::new(MockObjectStorage::new()),
        Arc::new(MockNotifier::new(NotifierMode::Succeed)),
    )
    .with_render_seed(42);
    AppState::with_collaborators(contact, pricelist_password.map(str::to_string))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .service(
                    web::scope("/api")
                        .app_data(
                            web::JsonConfig::default()
                                .error_handler(strelka_server::json_error_handler),
                        )
                        .service(
                            web::resource("/contact").route(web::post().to(submit_contact)),
                        )
                        .service(
                            web::resource("/verify-pricelist")
                                .route(web::post().to(verify_pricelist)),
                        ),
                )
                .default_service(web::route().to(strelka_server::not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn contact_accepts_a_valid_submission() {
    let app = test_app!(test_state(None));

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Mario Rossi",
            "email": "mario@example.com",
            "projectType": "website",
            "budget": "1000-3000",
            "message": "Vorrei un sito nuovo per la mia attività."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    let quote_id = body["quoteId"].as_str().expect("quoteId in response");
    assert!(quote_id.starts_with("QUOTE-"));
    assert!(body.get("errors").is_none());
}

#[actix_web::test]
async fn contact_rejects_an_invalid_submission_with_field_errors() {
    let app = test_app!(test_state(None));

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "A",
            "email": "not-an-email",
            "projectType": "",
            "budget": "",
            "message": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    let errors = body["errors"].as_array().expect("field errors");
    assert_eq!(errors.len(), 5);
    assert!(body.get("quoteId").is_none());
}

#[actix_web::test]
async fn contact_answers_500_when_storage_fails() {
    let contact = ContactService::new(
        Arc::new(MockSubmissionStore::new().fail_insert()),
        Arc::new(MockObjectStorage::new()),
        Arc::new(MockNotifier::new(NotifierMode::Succeed)),
    );
    let app = test_app!(AppState::with_collaborators(contact, None));

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Mario Rossi",
            "email": "mario@example.com",
            "projectType": "website",
            "budget": "1000-3000",
            "message": "Vorrei un sito nuovo per la mia attività."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body.get("errors").is_none());
}

#[actix_web::test]
async fn malformed_json_answers_the_shared_error_shape() {
    let app = test_app!(test_state(None));

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not valid json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("BadRequest"));
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(body["timestamp"].as_str().is_some());
}

#[actix_web::test]
async fn unknown_route_answers_the_shared_error_shape() {
    let app = test_app!(test_state(None));

    let req = test::TestRequest::get().uri("/api/no-such-route").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("NotFound"));
}

#[actix_web::test]
async fn pricelist_accepts_the_configured_password() {
    let app = test_app!(test_state(Some("segreto")));

    let req = test::TestRequest::post()
        .uri("/api/verify-pricelist")
        .set_json(json!({ "password": "segreto" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
}

#[actix_web::test]
async fn pricelist_rejects_a_wrong_password() {
    let app = test_app!(test_state(Some("segreto")));

    let req = test::TestRequest::post()
        .uri("/api/verify-pricelist")
        .set_json(json!({ "password": "sbagliato" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Password non corretta"));
}

#[actix_web::test]
async fn pricelist_answers_500_when_unconfigured() {
    let app = test_app!(test_state(None));

    let req = test::TestRequest::post()
        .uri("/api/verify-pricelist")
        .set_json(json!({ "password": "segreto" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}
