use axum::{Router, routing::get};

use crate::modules::work_logs::controller::{create_work_log, list_my_work_logs, list_work_logs};
use crate::state::AppState;

pub fn init_work_logs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_work_logs).post(create_work_log))
        .route("/mine", get(list_my_work_logs))
}
