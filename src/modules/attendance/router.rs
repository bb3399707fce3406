use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::attendance::controller::{
    check_in, check_out, list_attendance, list_my_attendance,
};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance))
        .route("/mine", get(list_my_attendance))
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
}
