//! Role gates and request validation for the Postgres-backed modules.
//! Every request here is rejected before a query runs.

mod common;

use axum::http::StatusCode;
use common::{TestApp, field_names};
use officehub_auth::Role;
use officehub_models::ObjectId;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_feature_routes_require_token() {
    let app = TestApp::new();

    for (method, uri) in [
        ("GET", "/api/projects"),
        ("GET", "/api/leaves/mine"),
        ("POST", "/api/attendance/check-out"),
        ("GET", "/api/work-logs/mine"),
        ("GET", "/api/announcements"),
        ("GET", "/api/holidays"),
    ] {
        let (status, _) = app.request(method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
    assert_eq!(app.identities.lookup_count(), 0);
}

#[tokio::test]
async fn test_employee_is_kept_out_of_staff_routes() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;
    let id = ObjectId::new();

    let cases = [
        ("POST", "/api/projects".to_string(), Some(json!({ "name": "X" }))),
        ("PUT", format!("/api/projects/{id}"), Some(json!({}))),
        ("GET", "/api/leaves".to_string(), None),
        (
            "PATCH",
            format!("/api/leaves/{id}/review"),
            Some(json!({ "status": "Approved" })),
        ),
        ("GET", "/api/attendance".to_string(), None),
        ("GET", "/api/work-logs".to_string(), None),
        ("POST", "/api/announcements".to_string(), Some(json!({}))),
    ];

    for (method, uri, body) in cases {
        let (status, _) = app.request(method, &uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_manager_is_kept_out_of_admin_routes() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;
    let id = ObjectId::new();

    for (method, uri, body) in [
        ("DELETE", format!("/api/projects/{id}"), None),
        ("DELETE", format!("/api/announcements/{id}"), None),
        ("DELETE", format!("/api/holidays/{id}"), None),
        (
            "POST",
            "/api/holidays".to_string(),
            Some(json!({ "name": "New Year", "date": "2025-01-01" })),
        ),
    ] {
        let (status, body) = app.request(method, &uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_malformed_ids_in_paths() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Admin, "root@example.com").await;

    for (method, uri, body) in [
        ("GET", "/api/projects/123", None),
        ("DELETE", "/api/holidays/ZZZZZZZZZZZZZZZZZZZZZZZZ", None),
        (
            "PATCH",
            "/api/leaves/abc/review",
            Some(json!({ "status": "Approved" })),
        ),
    ] {
        let (status, body) = app.request(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(field_names(&body), vec!["id"]);
    }
}

#[tokio::test]
async fn test_project_end_date_before_start() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/projects",
            Some(&token),
            Some(json!({
                "name": "Website relaunch",
                "startDate": "2024-05-10",
                "expectedEndDate": "2024-05-01"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["expectedEndDate"]);
    assert_eq!(
        body["errors"][0]["message"],
        "Expected end date must be on or after start date"
    );
}

#[tokio::test]
async fn test_project_rejects_bad_member_ids() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Admin, "root@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/projects",
            Some(&token),
            Some(json!({
                "name": "Website relaunch",
                "startDate": "2024-05-10",
                "memberIds": ["not-hex"]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["memberIds"]);
}

#[tokio::test]
async fn test_leave_request_validation() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/leaves",
            Some(&token),
            Some(json!({
                "leaveType": "Sick",
                "startDate": "2024-05-10",
                "endDate": "2024-05-09",
                "reason": "Flu symptoms"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["endDate"]);

    let (status, body) = app
        .request(
            "POST",
            "/api/leaves",
            Some(&token),
            Some(json!({
                "leaveType": "Sabbatical",
                "startDate": "2024-05-10",
                "endDate": "2024-05-12",
                "reason": "Time off"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["leaveType"]);
}

#[tokio::test]
async fn test_leave_review_only_accepts_decisions() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;

    let uri = format!("/api/leaves/{}/review", ObjectId::new());
    let (status, body) = app
        .request("PATCH", &uri, Some(&token), Some(json!({ "status": "Pending" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["status"]);
}

#[tokio::test]
async fn test_attendance_range_must_be_ordered() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;

    let (status, body) = app
        .request(
            "GET",
            "/api/attendance/mine?from=2024-02-10&to=2024-02-01",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["to"]);
}

#[tokio::test]
async fn test_work_log_hours_validation() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;

    for hours in [json!(30), json!("0.1"), json!("lots")] {
        let (status, body) = app
            .request(
                "POST",
                "/api/work-logs",
                Some(&token),
                Some(json!({
                    "date": "2024-05-06",
                    "hours": hours,
                    "description": "Code review"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "hours {hours}");
        assert_eq!(field_names(&body), vec!["hours"]);
    }
}

#[tokio::test]
async fn test_announcement_validation() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Manager, "boss@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&token),
            Some(json!({ "title": "Hi", "content": "", "audience": "Everyone" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["audience", "content", "title"]);
    assert_eq!(
        body["errors"][0]["message"],
        "audience must be one of: All, Managers, Employees"
    );
}

#[tokio::test]
async fn test_holiday_year_filter_range() {
    let app = TestApp::new();
    let (_, token) = app.seed(Role::Employee, "emp@example.com").await;

    let (status, body) = app
        .request("GET", "/api/holidays?year=1800", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["year"]);
}
