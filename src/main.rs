use std::net::SocketAddr;

use todo_service::accounts::SessionSigner;
use todo_service::app::{Services, build_router};
use todo_service::config::Config;
use todo_service::storage::MemoryCache;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    // `--bind <addr:port>` overrides TODO_HOST / TODO_PORT.
    let args: Vec<String> = std::env::args().collect();
    let mut bind_addr: SocketAddr = config.bind_addr()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                let Some(value) = args.get(i + 1) else {
                    anyhow::bail!("Usage: {} [--bind <addr:port>]", args[0]);
                };
                bind_addr = value.parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Storage layer:
    let cache = MemoryCache::with_ttl(config.entry_ttl);
    tracing::info!("Entry TTL {:?}", cache.ttl());
    let reaper = cache.clone().start_reaper(config.reap_interval);

    // 2. Services:
    let signer = SessionSigner::new(&config.cookie_secret, config.cookie_secure)?;
    let services = Services::new(cache, signer, config.bcrypt_cost);

    // 3. HTTP Router:
    let app = build_router(services);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("HTTP server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.abort();
    tracing::info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
