use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::holidays::controller::{create_holiday, delete_holiday, list_holidays};
use crate::state::AppState;

pub fn init_holidays_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_holidays).post(create_holiday))
        .route("/{id}", delete(delete_holiday))
}
