use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::leaves::controller::{
    create_leave, list_leaves, list_my_leaves, review_leave,
};
use crate::state::AppState;

pub fn init_leaves_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leaves).post(create_leave))
        .route("/mine", get(list_my_leaves))
        .route("/{id}/review", patch(review_leave))
}
