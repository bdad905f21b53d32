use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notelet_api::config::ServerConfig;
use notelet_api::state::AppState;
use notelet_api::{background, router};
use notelet_pages::PageLifecycle;

/// Host simple markdown pages behind short urls.
#[derive(Debug, Parser)]
#[command(name = "notelet", version)]
struct Cli {
    /// Path to the page store (a SQLite file).
    store: PathBuf,

    /// Create a fresh store at the path, seed it, and exit.
    #[arg(short = 'i', long)]
    init: bool,

    /// Listen port (overrides $PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notelet_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Initialize mode ---
    if cli.init {
        match notelet_db::initialize_store(&cli.store).await {
            Ok(()) => {
                println!("Initialized page store at '{}'.", cli.store.display());
                return;
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }

    if !cli.store.exists() {
        eprintln!(
            "store file '{}' doesn't exist. Create one with: notelet --init <store>",
            cli.store.display()
        );
        std::process::exit(1);
    }

    // --- Configuration ---
    let mut config = ServerConfig::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    tracing::info!(
        host = %config.host,
        port = config.port,
        store = %cli.store.display(),
        "Loaded server configuration"
    );

    // --- Page store ---
    let pool = notelet_db::create_pool(&cli.store)
        .await
        .expect("Failed to open page store");
    notelet_db::health_check(&pool)
        .await
        .expect("Page store health check failed");
    tracing::info!("Page store opened");

    let pages = PageLifecycle::new(pool.clone());

    // --- Expiry sweep ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(background::retention::run(
        pages.clone(),
        config.retention_days,
        Duration::from_secs(config.sweep_interval_secs),
        sweep_cancel.clone(),
    ));

    // --- App state / router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pages,
    };
    let app = router::build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Page retention job stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
