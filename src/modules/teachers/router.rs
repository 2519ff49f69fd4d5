use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::exports::controller::export_teachers;
use crate::modules::teachers::controller::{
    create_teacher, delete_teacher, get_teacher, get_teacher_students, list_teachers,
    update_teacher,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher).get(list_teachers))
        .route("/export", get(export_teachers))
        .route(
            "/{id}",
            get(get_teacher)
                .put(update_teacher)
                .patch(update_teacher)
                .delete(delete_teacher),
        )
        .route("/{id}/students", get(get_teacher_students))
}
