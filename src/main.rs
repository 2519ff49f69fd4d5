use axum::ServiceExt;
use axum::extract::Request;
use dotenvy::dotenv;
use tracing::{info, warn};

use schoolhub::router::{init_router, into_service};
use schoolhub::state::init_app_state;
use schoolhub_config::ServerConfig;
use schoolhub_db::run_migrations;
use schoolhub_observability::{init_metrics, init_tracing, metrics_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server = ServerConfig::from_env();
    let state = init_app_state().await?;

    if server.run_migrations {
        run_migrations(&state.db).await?;
    }

    let db = state.db.clone();
    let mut router = init_router(state);
    if let Some(handle) = init_metrics()? {
        router = router.merge(metrics_app(handle));
        info!("Prometheus metrics exposed at /metrics");
    }

    let addr = server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(into_service(router)),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
