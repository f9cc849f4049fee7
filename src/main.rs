use axum::serve;
use log::info;
use tokio::net::TcpListener;
use vehiculos_db_rust::build_app;
use vehiculos_db_rust::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Default to Info for everything, RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: server={}:{}, data file={}",
        config.server.host,
        config.server.port,
        config.storage.file.display()
    );

    run_server(build_app(&config), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("El servidor está escuchando en http://{}", bind_address);
    info!(
        "API documentation available at http://{}/docs",
        bind_address
    );

    serve(listener, app).await?;

    Ok(())
}
