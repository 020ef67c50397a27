use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalog_api::api::{routes::create_app, AppState};
use vitalog_data::database::{connect, DatabaseConfig};
use vitalog_data::repository::{SqliteHealthRecordRepository, SqliteUserDirectory};
use vitalog_domain::auth::token::JwtCodec;
use vitalog_domain::services::HealthDataService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitalog API v{}", env!("CARGO_PKG_VERSION"));

    let db_config = match std::env::var("VITALOG_DB_PATH") {
        Ok(path) => DatabaseConfig::file(PathBuf::from(path)),
        Err(_) => {
            let data_dir =
                PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("failed to create data directory {:?}", data_dir))?;
            DatabaseConfig::file(data_dir.join("vitalog.db"))
        }
    };

    let pool = connect(&db_config).context("failed to open database pool")?;

    let codec = JwtCodec::from_env().context("failed to load token configuration")?;

    let state = AppState {
        service: Arc::new(HealthDataService::new(SqliteHealthRecordRepository::new(
            pool.clone(),
        ))),
        users: Arc::new(SqliteUserDirectory::new(pool)),
        codec: Arc::new(codec),
    };

    let app = create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on {}", addr);
    info!("Swagger UI available at http://localhost:{}/api-docs/", port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

/// Resolves when the process receives ctrl-c or SIGTERM.
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
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
