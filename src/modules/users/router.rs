use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::users::controller::{
    create_user, get_user, list_users, update_user_role, update_user_status,
};
use crate::state::AppState;

/// Mounted behind the staff guard; admin-only handlers narrow it further.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user))
        .route("/{id}/role", patch(update_user_role))
        .route("/{id}/status", patch(update_user_status))
}
