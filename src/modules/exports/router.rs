use axum::{Router, routing::get};

use crate::modules::exports::controller::export_all;
use crate::state::AppState;

/// Routes under `/api/export`. Per-resource exports live on their own routers.
pub fn init_export_router() -> Router<AppState> {
    Router::new().route("/all", get(export_all))
}
