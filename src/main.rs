use frontgate::server::{config::Config, error::Error, model::app::AppState, router, startup};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let session = startup::connect_to_session(&config).await?;
    let db = startup::connect_to_database(&config).await?;

    let bind_addr = config.bind_addr;
    let state = AppState::new(db, config);

    let app = router::routes(state)
        .layer(session)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("Starting server on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
