//! Controller tests against a mocked user service.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{FieldError, RosterError, User, UserId};
use roster_service::{DeleteOutcome, MockUserService};
use roster_web::{create_router, AppState, ViewRenderer};
use std::sync::Arc;
use tower::ServiceExt;

fn app(service: MockUserService) -> Router {
    let state = AppState::new(Arc::new(service), ViewRenderer::default());
    create_router(state, &ServerConfig::default())
}

fn john_cena() -> User {
    User::new("John", "Cena", "john@example.com", "5551234567", "1 Main St", "WWE")
        .with_id(UserId(1))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn flash_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("roster_flash="))
        .unwrap_or_default()
        .to_string()
}

fn assert_flash_redirect(response: &Response, cookie_value: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), "/users");
    assert!(
        flash_cookie(response).starts_with(&format!("roster_flash={cookie_value}")),
        "unexpected flash cookie: {}",
        flash_cookie(response)
    );
}

#[tokio::test]
async fn test_root_redirects_to_user_list() {
    let response = app(MockUserService::new()).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");
}

#[tokio::test]
async fn test_list_users_passes_search_term() {
    let mut service = MockUserService::new();
    service
        .expect_search_users_by_last_name()
        .withf(|last_name: &str| last_name == "Cen")
        .times(1)
        .returning(|_| Ok(vec![john_cena()]));

    let response = app(service)
        .oneshot(get("/users?lastName=Cen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"user-list\""));
    assert!(html.contains("data-user-count=\"1\""));
    assert!(html.contains("value=\"Cen\""));
}

#[tokio::test]
async fn test_list_users_without_search_lists_everyone() {
    let mut service = MockUserService::new();
    service
        .expect_search_users_by_last_name()
        .withf(|last_name: &str| last_name.is_empty())
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let response = app(service).oneshot(get("/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-user-count=\"0\""));
}

#[tokio::test]
async fn test_list_users_consumes_flash_notice() {
    let mut service = MockUserService::new();
    service
        .expect_search_users_by_last_name()
        .returning(|_| Ok(Vec::new()));

    let request = Request::builder()
        .uri("/users")
        .header(header::COOKIE, "roster_flash=message.user-registered")
        .body(Body::empty())
        .unwrap();

    let response = app(service).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let removal = flash_cookie(&response);
    assert!(removal.starts_with("roster_flash="));
    assert!(removal.contains("Max-Age=0") || removal.contains("Expires="));
    let html = body_text(response).await;
    assert!(html.contains("User registered successfully."));
}

#[tokio::test]
async fn test_list_users_service_failure_renders_error_page() {
    let mut service = MockUserService::new();
    service
        .expect_search_users_by_last_name()
        .returning(|_| Err(RosterError::Database("connection refused".to_string())));

    let response = app(service).oneshot(get("/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"error\""));
    assert!(!html.contains("connection refused"));
}

#[tokio::test]
async fn test_register_form_renders() {
    let response = app(MockUserService::new())
        .oneshot(get("/users/register"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"register\""));
}

#[tokio::test]
async fn test_register_user_redirects_with_notice() {
    let mut service = MockUserService::new();
    service
        .expect_register_user()
        .withf(|user: &User| user.first_name == "John" && user.last_name == "Cena")
        .times(1)
        .returning(|user| Ok(user.with_id(UserId(1))));

    let response = app(service)
        .oneshot(post_form(
            "/users/register",
            "firstName=John&lastName=Cena&email=john%40example.com&contactNumber=5551234567&address=1+Main+St&companyName=WWE",
        ))
        .await
        .unwrap();

    assert_flash_redirect(&response, "message.user-registered");
}

#[tokio::test]
async fn test_register_user_invalid_rerenders_form() {
    let mut service = MockUserService::new();
    service.expect_register_user().returning(|_| {
        Err(RosterError::InvalidFields(vec![FieldError {
            field: "first_name".to_string(),
            message: "First name is required".to_string(),
            code: "not_empty".to_string(),
        }]))
    });

    let response = app(service)
        .oneshot(post_form("/users/register", "firstName=&lastName=Cena"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"register\""));
    assert!(html.contains("First name is required"));
    assert!(html.contains("value=\"Cena\""));
}

#[tokio::test]
async fn test_edit_form_for_existing_user() {
    let mut service = MockUserService::new();
    service
        .expect_get_user_by_id()
        .withf(|id: &UserId| *id == UserId(1))
        .returning(|_| Ok(Some(john_cena())));

    let response = app(service).oneshot(get("/users/edit/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"edit\""));
    assert!(html.contains("name=\"id\" value=\"1\""));
}

#[tokio::test]
async fn test_edit_form_for_missing_user_redirects() {
    let mut service = MockUserService::new();
    service.expect_get_user_by_id().returning(|_| Ok(None));

    let response = app(service).oneshot(get("/users/edit/99")).await.unwrap();

    assert_flash_redirect(&response, "error.user-not-found");
}

#[tokio::test]
async fn test_update_without_id_redirects() {
    let mut service = MockUserService::new();
    service.expect_update_user().never();

    let response = app(service)
        .oneshot(post_form("/users/update", "id=&firstName=John&lastName=Cena"))
        .await
        .unwrap();

    assert_flash_redirect(&response, "error.no-user-selected");
}

#[tokio::test]
async fn test_update_user_redirects_with_notice() {
    let mut service = MockUserService::new();
    service
        .expect_update_user()
        .withf(|user: &User| user.id == Some(UserId(1)) && user.company_name == "AEW")
        .times(1)
        .returning(Ok);

    let response = app(service)
        .oneshot(post_form(
            "/users/update",
            "id=1&firstName=John&lastName=Cena&email=john%40example.com&contactNumber=5551234567&address=1+Main+St&companyName=AEW",
        ))
        .await
        .unwrap();

    assert_flash_redirect(&response, "message.user-updated");
}

#[tokio::test]
async fn test_update_unknown_user_redirects() {
    let mut service = MockUserService::new();
    service
        .expect_update_user()
        .returning(|_| Err(RosterError::not_found("User", 42)));

    let response = app(service)
        .oneshot(post_form("/users/update", "id=42&firstName=John"))
        .await
        .unwrap();

    assert_flash_redirect(&response, "error.user-not-found");
}

#[tokio::test]
async fn test_confirm_delete_renders_for_existing_user() {
    let mut service = MockUserService::new();
    service
        .expect_get_user_by_id()
        .returning(|_| Ok(Some(john_cena())));

    let response = app(service)
        .oneshot(get("/users/confirm-delete?userId=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"confirm-delete\""));
}

#[tokio::test]
async fn test_confirm_delete_for_missing_user_redirects() {
    let mut service = MockUserService::new();
    service.expect_get_user_by_id().returning(|_| Ok(None));

    let response = app(service)
        .oneshot(get("/users/confirm-delete?userId=7"))
        .await
        .unwrap();

    assert_flash_redirect(&response, "error.user-not-found");
}

#[tokio::test]
async fn test_delete_user_outcomes() {
    let mut service = MockUserService::new();
    service
        .expect_delete_user()
        .withf(|id: &UserId| *id == UserId(1))
        .returning(|_| Ok(DeleteOutcome::Deleted));
    service
        .expect_delete_user()
        .withf(|id: &UserId| *id == UserId(2))
        .returning(|_| Ok(DeleteOutcome::NotFound));
    let app = app(service);

    let response = app
        .clone()
        .oneshot(post_form("/users/delete?userId=1", ""))
        .await
        .unwrap();
    assert_flash_redirect(&response, "message.user-deleted");

    let response = app
        .oneshot(post_form("/users/delete?userId=2", ""))
        .await
        .unwrap();
    assert_flash_redirect(&response, "error.user-not-found");
}

#[tokio::test]
async fn test_show_keeps_request_order_and_missing_slots() {
    let mut service = MockUserService::new();
    service
        .expect_get_users_by_ids()
        .withf(|ids: &[UserId]| ids == [UserId(1), UserId(5)])
        .times(1)
        .returning(|_| Ok(vec![Some(john_cena()), None]));

    let response = app(service)
        .oneshot(get("/users/show?userIds=1&userIds=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"show\""));
    assert!(html.contains("data-user-count=\"2\""));
    assert!(html.contains("User 5 not found"));
}

#[tokio::test]
async fn test_show_accepts_comma_separated_ids() {
    let mut service = MockUserService::new();
    service
        .expect_get_users_by_ids()
        .withf(|ids: &[UserId]| ids == [UserId(2), UserId(3)])
        .returning(|ids| Ok(vec![None; ids.len()]));

    let response = app(service)
        .oneshot(get("/users/show?userIds=2,3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_show_without_ids_is_bad_request() {
    let mut service = MockUserService::new();
    service.expect_get_users_by_ids().never();

    let response = app(service).oneshot(get("/users/show")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_show_with_malformed_id_is_bad_request() {
    let mut service = MockUserService::new();
    service.expect_get_users_by_ids().never();

    let response = app(service)
        .oneshot(get("/users/show?userIds=1,abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Invalid user id"));
}

#[tokio::test]
async fn test_bulk_delete_selected_users() {
    let mut service = MockUserService::new();
    service
        .expect_delete_users_by_ids()
        .withf(|ids: &[UserId]| ids == [UserId(1), UserId(2)])
        .times(1)
        .returning(|ids| Ok(ids.len() as u64));

    let response = app(service)
        .oneshot(post_form("/users/bulk-delete", "userIds=1&userIds=2"))
        .await
        .unwrap();

    assert_flash_redirect(&response, "message.users-deleted");
}

#[tokio::test]
async fn test_bulk_delete_without_selection() {
    let mut service = MockUserService::new();
    service.expect_delete_users_by_ids().never();

    let response = app(service)
        .oneshot(post_form("/users/bulk-delete", ""))
        .await
        .unwrap();

    assert_flash_redirect(&response, "error.no-users-selected");
}

async fn assert_bad_request_page(response: Response) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("data-view=\"error\""));
}

#[tokio::test]
async fn test_edit_form_with_non_numeric_id_renders_error_page() {
    let mut service = MockUserService::new();
    service.expect_get_user_by_id().never();

    let response = app(service).oneshot(get("/users/edit/abc")).await.unwrap();

    assert_bad_request_page(response).await;
}

#[tokio::test]
async fn test_confirm_delete_without_user_id_renders_error_page() {
    let mut service = MockUserService::new();
    service.expect_get_user_by_id().never();

    let response = app(service)
        .oneshot(get("/users/confirm-delete"))
        .await
        .unwrap();

    assert_bad_request_page(response).await;
}

#[tokio::test]
async fn test_update_with_non_numeric_id_renders_error_page() {
    let mut service = MockUserService::new();
    service.expect_update_user().never();

    let response = app(service)
        .oneshot(post_form("/users/update", "id=abc&firstName=John&lastName=Cena"))
        .await
        .unwrap();

    assert_bad_request_page(response).await;
}

#[tokio::test]
async fn test_delete_with_malformed_user_id_renders_error_page() {
    let mut service = MockUserService::new();
    service.expect_delete_user().never();

    let response = app(service)
        .oneshot(post_form("/users/delete?userId=abc", ""))
        .await
        .unwrap();

    assert_bad_request_page(response).await;
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app(MockUserService::new());

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    let response = app.clone().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
