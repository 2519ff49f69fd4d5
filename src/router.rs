use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use schoolhub_observability::{logging_middleware, metrics_middleware};

use crate::docs::{ApiDoc, openapi_json};
use crate::modules::auth::{init_auth_router, init_token_router};
use crate::modules::exports::init_export_router;
use crate::modules::students::init_students_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/token", init_token_router())
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/export", init_export_router()),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Wraps the router so `/api/teachers/` and `/api/teachers` route alike.
///
/// Path normalisation has to run before routing, so it wraps the finished
/// router instead of being added with `Router::layer`.
pub fn into_service(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Convenience for tests and `main`: the fully wrapped application.
pub fn app(state: AppState) -> NormalizePath<Router> {
    into_service(init_router(state))
}
