//! FinTrack service entry point
//!
//! REST API server for the personal finance tracker.
//! Reads configuration from TOML file (~/.config/fintrack/config.toml).

use std::sync::Arc;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

use fintrack::application::{LedgerService, UserService};
use fintrack::config::AppConfig;
use fintrack::infrastructure::crypto::jwt::JwtConfig;
use fintrack::infrastructure::{JsonFileStore, Store};
use fintrack::shared::shutdown::ShutdownCoordinator;
use fintrack::{create_api_router, default_config_path};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Arc::new(Instant::now());

    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FINTRACK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting FinTrack service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── JWT configuration (env secret wins over the config file) ──
    let jwt_secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| app_cfg.security.jwt_secret.clone());
    let jwt_config = JwtConfig {
        secret: jwt_secret,
        expiration_hours: app_cfg.security.jwt_expiration_hours,
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Persistence store (failing to open the data file is fatal) ──
    let store = JsonFileStore::open(&app_cfg.storage.data_file).await?;
    info!("💾 Data file: {}", store.path().display());
    let store: Arc<dyn Store> = Arc::new(store);

    // ── Services ───────────────────────────────────────────────
    let users = Arc::new(UserService::new(store.clone(), jwt_config.clone()));
    let ledger = Arc::new(LedgerService::new(store));

    // ── Shutdown coordinator ───────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let app = create_api_router(users, ledger, jwt_config, prometheus_handle, started_at);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let shutdown_signal = shutdown.signal();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    server.await?;

    info!("👋 FinTrack service shutdown complete");
    Ok(())
}
