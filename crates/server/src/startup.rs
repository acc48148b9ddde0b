use std::{env, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `CONFIG_PATH` (default `config.toml`), see [`load_config_from`]
pub fn load_config() -> Result<AppConfig, StartupError> {
    load_config_from(&configs::config_path())
}

/// Config file when present, otherwise defaults plus SERVER_HOST/SERVER_PORT/DATABASE_URL
pub fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    if std::path::Path::new(path).exists() {
        let mut cfg = configs::load_from_file(path).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        return Ok(cfg);
    }

    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.database.url = models::db::DATABASE_URL.clone();
    cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Public entry: build the app and run the HTTP server.
///
/// Expects logging to be initialised by the caller and `cfg` to come from [`load_config`].
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    info!(host = %cfg.server.host, port = cfg.server.port, "configuration loaded");

    // DB connection
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
    }

    let app: Router = routes::build_router(AppState::from_db(db), build_cors());

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
