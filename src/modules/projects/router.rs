use axum::{Router, routing::get};

use crate::modules::projects::controller::{
    create_project, delete_project, get_project, list_projects, update_project,
};
use crate::state::AppState;

pub fn init_projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}
