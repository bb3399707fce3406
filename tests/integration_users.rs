mod common;

use axum::http::StatusCode;
use common::{TestApp, field_names};
use officehub_auth::Role;
use officehub_models::ObjectId;
use serde_json::json;

#[tokio::test]
async fn test_employee_cannot_browse_directory() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;

    let (status, body) = app.request("GET", "/api/users", Some(&token), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_directory_requires_token() {
    let app = TestApp::new();

    let (status, _) = app.request("GET", "/api/users", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_manager_lists_and_filters() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;
    app.seed(Role::Employee, "alice@example.com").await;
    app.seed(Role::Employee, "bob@example.com").await;

    let (status, body) = app.request("GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 3);

    let (status, body) = app
        .request("GET", "/api/users?role=Employee&limit=1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .request("GET", "/api/users?search=ALICE", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;
    let (employee, _) = app.seed(Role::Employee, "carol@example.com").await;

    let uri = format!("/api/users/{}", employee.id);
    let (status, body) = app.request("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "carol@example.com");

    let uri = format!("/api/users/{}", ObjectId::new());
    let (status, _) = app.request("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Admin, "root@example.com").await;

    let (status, body) = app
        .request("GET", "/api/users/not-an-id", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["id"]);
}

#[tokio::test]
async fn test_only_admin_creates_users() {
    let app = TestApp::new();
    let (_, manager) = app.seed(Role::Manager, "boss@example.com").await;
    let (_, admin) = app.seed(Role::Admin, "root@example.com").await;
    let payload = json!({
        "name": "Dana Scully",
        "email": "dana@example.com",
        "password": "trust-no-1",
        "role": "Manager"
    });

    let (status, _) = app
        .request("POST", "/api/users", Some(&manager), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request("POST", "/api/users", Some(&admin), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "Manager");
}

#[tokio::test]
async fn test_create_user_rejects_unknown_role() {
    let app = TestApp::new();
    let (_, admin) = app.seed(Role::Admin, "root@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({
                "name": "Fox Mulder",
                "email": "fox@example.com",
                "password": "i-want-2-believe",
                "role": "Overlord"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["role"]);
}

#[tokio::test]
async fn test_admin_cannot_change_own_role() {
    let app = TestApp::new();
    let (admin, token) = app.seed(Role::Admin, "root@example.com").await;

    let uri = format!("/api/users/{}/role", admin.id);
    let (status, _) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "role": "Employee" })))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotes_employee() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Admin, "root@example.com").await;
    let (employee, employee_token) = app.seed(Role::Employee, "eve@example.com").await;

    let uri = format!("/api/users/{}/role", employee.id);
    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "role": "Manager" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Manager");

    // Same token, new role
    let (status, _) = app
        .request("GET", "/api/users", Some(&employee_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deactivation_revokes_access() {
    let app = TestApp::new();
    let (admin, token) = app.seed(Role::Admin, "root@example.com").await;
    let (employee, employee_token) = app.seed(Role::Employee, "frank@example.com").await;

    let uri = format!("/api/users/{}/status", admin.id);
    let (status, _) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "isActive": false })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/users/{}/status", employee.id);
    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "isActive": false })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, _) = app
        .request("GET", "/api/auth/me", Some(&employee_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
