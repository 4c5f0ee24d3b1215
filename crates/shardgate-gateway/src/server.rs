//! Server startup and lifecycle
//!
//! Discovery runs once before the listener binds; an empty fleet is
//! fatal and the process never starts degraded.

use crate::{routes, AppState, GatewayConfig};
use shardgate_store::{Discover, InstanceRegistry, StaticDiscovery};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the gateway server until interrupted
pub async fn run_server(config: GatewayConfig) -> anyhow::Result<()> {
    run_server_with_shutdown(config, shutdown_signal()).await
}

/// Run the gateway server with an explicit shutdown future
pub async fn run_server_with_shutdown(
    config: GatewayConfig,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let discovery = StaticDiscovery::new(config.nodes.clone());
    let instances = discovery.discover().await?;
    info!("discovered {} storage instances", instances.len());

    let registry = InstanceRegistry::new(instances)?;
    let state = Arc::new(AppState::new(config.clone(), registry));
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("shardgate listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("gateway shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down server");
}
