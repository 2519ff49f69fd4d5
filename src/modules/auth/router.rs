use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_profile, login_user, obtain_token_pair, refresh_token, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/me", get(get_profile))
}

/// Token endpoints mounted at `/api/token`.
pub fn init_token_router() -> Router<AppState> {
    Router::new()
        .route("/", post(obtain_token_pair))
        .route("/refresh", post(refresh_token))
}
