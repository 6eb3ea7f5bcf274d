use actix_web::web;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, HttpState};

pub async fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().map_err(|err| {
        eprintln!("{}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let state = web::Data::new(HttpState::from_config(&config));
    let (host, port) = config.bind_address();

    let server = start_server(state.clone(), &config).map_err(|err| {
        error!(error = %err, host = %host, port, "Failed to bind HTTP server");
        err
    })?;

    info!(
        host = %host,
        port,
        extraction_url = %config.extraction.url,
        "Inventario listening"
    );
    add_log(
        &state.logs,
        "INFO",
        "Server",
        &format!("Listening on http://{}:{}", host, port),
    );

    server.await
}
