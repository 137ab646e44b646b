use database::db::{create_connection, sync_schema};
use env_logger::Env;
use log::info;
use server::{config::Config, create_app, state::AppState, utils::shutdown::shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    info!("Allowed CORS origins: {:?}", config.cors_origins);

    let db = create_connection(&config.database_url, &config.pool).await?;
    sync_schema(&db).await?;

    let app = create_app(AppState::new(db), &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!("Server is running on http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
