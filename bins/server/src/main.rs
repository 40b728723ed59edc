//! FeeDesk API Server
//!
//! Main entry point for the fee management backend.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedesk_api::{AppState, create_router};
use feedesk_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "feedesk=debug,feedesk_api=debug,feedesk_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = feedesk_db::connect(&config.database).await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(&config.jwt);
    info!(
        token_expires_in = jwt_service.token_expires_in(),
        "Session tokens configured"
    );

    let app = create_router(AppState::with_database(db, jwt_service));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
