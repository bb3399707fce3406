use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use officehub_observability::logging_middleware;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::role::require_staff;
use crate::modules::announcements::router::init_announcements_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::holidays::router::init_holidays_router;
use crate::modules::leaves::router::init_leaves_router;
use crate::modules::projects::router::init_projects_router;
use crate::modules::users::router::init_users_router;
use crate::modules::work_logs::router::init_work_logs_router;
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", init_auth_router())
        .nest(
            "/users",
            init_users_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_staff)),
        )
        .nest("/projects", init_projects_router())
        .nest("/leaves", init_leaves_router())
        .nest("/attendance", init_attendance_router())
        .nest("/work-logs", init_work_logs_router())
        .nest("/announcements", init_announcements_router())
        .nest("/holidays", init_holidays_router());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
