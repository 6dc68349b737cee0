mod common;

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode, header};
use common::{memory_sender, test_db, test_state};
use http_body_util::BodyExt;
use school_manager::app::create_app;
use school_manager::bootstrap::initialize_admin_user;
use school_manager::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@school.test";
const ADMIN_PASSWORD: &str = "AdminPass1";
const BOUNDARY: &str = "school-manager-test-boundary";

fn test_config() -> Config {
    Config {
        port: 0,
        openapi_enabled: true,
        log_level: "debug".to_string(),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: common::TEST_JWT_SECRET.to_string(),
        jwt_expires_in: 3600,
        rabbitmq_uri: None,
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        login_url: "https://portal.test/login".to_string(),
        bcrypt_cost: 4,
        cors_allowed_origins: "*".to_string(),
        app_env: "test".to_string(),
    }
}

async fn test_app() -> Router {
    let (_, shared) = memory_sender();
    let state = test_state(test_db().await, shared);
    initialize_admin_user(&state, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();

    create_app(state, &test_config())
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["display_name"], "System Administrator (Admin)");
    body["access_token"].as_str().unwrap().to_string()
}

fn multipart_body(file_name: &str, file: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn health_reports_database() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["database"], "ok");
}

#[tokio::test]
async fn teacher_routes_require_a_token() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/api/v1/teachers").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::post("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": ADMIN_EMAIL, "password": "nope" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_signup_without_password_is_a_bad_request() {
    let app = test_app().await;
    let token = login(&app).await;

    let response = app
        .oneshot(
            Request::post("/api/v1/auth/signup")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "email": "second.admin@school.test",
                        "role": "admin",
                        "first_name": "Second",
                        "last_name": "Admin"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_credential");
    assert_eq!(body["message"], "Password is required for admin accounts");
}

#[tokio::test]
async fn template_download_then_bulk_upload() {
    let app = test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/v1/teachers/template?format=csv")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("teacher_template.csv"));
    let template = body_bytes(response).await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/v1/teachers/bulk")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(
                    "teacher_template.csv",
                    &template,
                    &[("create_user_accounts", "true"), ("send_credentials_email", "false")],
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success_count"], 2);
    assert_eq!(body["errors"].as_array().unwrap().len(), 0);
    assert_eq!(body["teachers"][0]["employee_id"], "TCH00001");
    assert_eq!(body["issued_credentials"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(
            Request::get("/api/v1/teachers?search=Jane")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["teachers"][0]["email"], "jane.smith@example.com");
}

#[tokio::test]
async fn unsupported_upload_is_rejected() {
    let app = test_app().await;
    let token = login(&app).await;

    let response = app
        .oneshot(
            Request::post("/api/v1/teachers/bulk")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body("teachers.txt", b"hello", &[])))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "unsupported_format");
}

fn create_tenant_request(token: &str, code: &str) -> Request<Body> {
    Request::post("/api/v1/tenants")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": "Accra Senior High School",
                "code": code,
                "tenant_type": "shs",
                "ownership": "public",
                "headmaster_name": "Ama Owusu",
                "email": "office@accrashs.edu.gh",
                "phone": "+233302123456"
            })
            .to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn tenant_codes_are_unique_and_bounded() {
    let app = test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(create_tenant_request(&token, "accra-shs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["code"], "ACCRA-SHS");

    let response = app
        .clone()
        .oneshot(create_tenant_request(&token, "ACCRA-SHS"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "duplicate_identity");
    assert_eq!(body["message"], "A tenant with code ACCRA-SHS already exists");

    let response = app
        .oneshot(create_tenant_request(&token, "ACCRA-SENIOR-HIGH-SCHOOL"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "field_validation");
}
