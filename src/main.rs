use crate::app::AppState;
use crate::config::{AppConfig, Cli};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

mod app;
mod colors;
mod config;
mod domain;
mod errors;
mod permits;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

/// How long in-flight requests get to answer after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 1. Settings from flags / environment
    let config = match AppConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // 2. Upstream client
    let state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Permit API client setup failed: {e}");
            std::process::exit(1);
        }
    };
    info!(endpoint = %config.endpoint, blocked = config.blocklist.len(), "permit source ready");

    // 3. Stop on SIGINT / SIGTERM
    if let Err(e) = spawn_shutdown_listener(Arc::clone(&state)) {
        error!("Could not install signal handlers: {e}");
        std::process::exit(1);
    }

    // 4. Serve
    info!("Starting server at http://{}", config.listen);
    let server = Server::bind(&config.listen).max_workers(config.workers);

    let served = Arc::clone(&state);
    let result = server.serve(move |req: astra::Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resp = match handle(req, &served) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        info!(%method, %path, status = resp.status().as_u16(), elapsed = ?started.elapsed(), "request");
        resp
    });

    state.shutdown();

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}

/// astra has no graceful stop, so a signal cancels every open view (their
/// loads come back discarded and answer 503), waits out the grace period and
/// exits.
fn spawn_shutdown_listener(state: Arc<AppState>) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("shutdown".into())
        .spawn(move || {
            runtime.block_on(wait_for_shutdown_signal());

            info!("Shutdown requested, cancelling open views");
            state.shutdown();
            std::thread::sleep(SHUTDOWN_GRACE);

            info!("Server shut down cleanly.");
            std::process::exit(0);
        })?;

    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    error!("Signal registration failed: {e}");
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Ctrl-C handler failed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
