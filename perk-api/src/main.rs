use std::net::SocketAddr;
use std::sync::Arc;

use perk_api::{app, AppState, AuthConfig};
use perk_offer::{OfferTierScaler, OfferValidator};
use perk_store::{app_config::Config, DbClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perk_api=debug,perk_store=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Perk API on port {}", config.server.port);

    let db = DbClient::connect(&config.database.url).await?;
    db.migrate().await?;

    let app_state = AppState {
        offers: Arc::new(db.offer_store()),
        merchants: Arc::new(db.merchant_store()),
        validator: OfferValidator::new(config.offers.validator_config()),
        scaler: OfferTierScaler::new(config.offers.currency_format()),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
