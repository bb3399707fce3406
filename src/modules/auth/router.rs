use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::controller::{change_password, get_me, login, register, update_me};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me).put(update_me))
        .route("/me/password", post(change_password))
}
