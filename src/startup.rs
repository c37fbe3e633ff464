//! Application startup and server initialization.
//!
//! Builds the upstream client, runs the first refresh, starts the scheduler
//! and serves the routes until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::metrics::{Metrics, SampleRegistry};
use crate::routes;
use crate::scheduler::RefreshScheduler;
use crate::state::AppState;
use crate::upstream::UptimeRobotClient;

const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Initializes and runs the exporter.
///
/// One refresh runs before the listener is bound so the first scrape is not
/// empty; its failure is logged and the exporter starts anyway. The scheduler
/// is only started once the listener is bound.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the listener fails to
/// bind, or the server encounters a runtime error.
pub async fn run(config: Arc<Config>) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(UptimeRobotClient::new(&config)?);
    let registry = Arc::new(SampleRegistry::new());
    let metrics = Metrics::new();

    let scheduler = Arc::new(RefreshScheduler::new(
        client,
        registry.clone(),
        metrics.clone(),
        config.exporter_name.clone(),
        config.refresh_interval(),
        config.request_timeout(),
    ));

    if !scheduler.run_cycle().await.is_success() {
        warn!("Initial refresh failed, serving without monitor samples until the next cycle");
    }

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;

    let shutdown = CancellationToken::new();
    let scheduler_task = tokio::spawn(scheduler.clone().run(shutdown.clone()));

    let state = AppState {
        config: config.clone(),
        registry,
        metrics,
    };
    let app = routes::create_router(state);
    info!("Starting Uptime Robot Exporter on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await;

    shutdown.cancel();
    if let Err(e) = scheduler_task.await {
        warn!("Refresh scheduler ended abnormally: {}", e);
    }
    served?;

    info!("Uptime Robot Exporter stopped");
    Ok(())
}

/// Resolves on Ctrl+C, SIGTERM, or when `shutdown` is cancelled elsewhere.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}

/// Liveness probe for container orchestrators: can we open a TCP connection to
/// the exporter's port on localhost?
pub async fn healthcheck(config: &Config) -> bool {
    let addr = ("127.0.0.1", config.port);
    matches!(
        tokio::time::timeout(HEALTHCHECK_TIMEOUT, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}
