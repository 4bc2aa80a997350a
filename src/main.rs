use cart_service::cart::AppState;
use cart_service::config::AppConfig;
use cart_service::router::create_app_router;
use cart_service::store::{CartStore, MemoryStore, PgStore};
use cart_service::telemetry::init_tracing;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration before logging so the output format can be applied
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(Default::default());
            tracing::error!(error = %e, "Failed to load application configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "Invalid server address");
            return ExitCode::FAILURE;
        }
    };

    // Initialize application state over an explicitly constructed store
    let store: Arc<dyn CartStore> = match &config.database_url {
        Some(url) => match PgStore::connect(url, config.database_max_connections).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to the cart database");
                return ExitCode::FAILURE;
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set; carts are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let state = Arc::new(AppState::with_store(store));

    // Build application router with all routes and middleware
    let app = create_app_router(state, &config);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind server address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, mount = %config.mount_path, "Server running");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
