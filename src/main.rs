//! Alert relay web server
//!
//! (c) Softlandia 2025

use alert_relay::api;
use alert_relay::config::AppConfig;
use alert_relay::core::inference::OllamaClient;
use alert_relay::core::services::{MyAlertService, MyChatService};
use alert_relay::infrastructure::database::DatabaseConnection;
use alert_relay::infrastructure::repositories::DbAlertRepository;

use anyhow::anyhow;
use di::{Injectable, ServiceCollection, existing_as_self};
use di_axum::RouterServiceProviderExtensions;
use log::{error, info};
use tokio::runtime::{Builder, Runtime};
use tower_http::trace::TraceLayer;

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(web_server_task(config))
}

async fn web_server_task(config: AppConfig) -> anyhow::Result<()> {
    // best effort, the listing endpoint reports a missing collection on its own
    match DatabaseConnection::new(config.database_url.clone())
        .ensure_collection()
        .await
    {
        Ok(()) => info!("alerts collection ready"),
        Err(e) => error!("failed to prepare alerts collection: {e}"),
    }

    let bind_address = config.bind_address();
    info!("relaying chat requests to {}", config.inference_url);

    let provider = ServiceCollection::new()
        .add(existing_as_self(config))
        .add(DatabaseConnection::singleton())
        .add(DbAlertRepository::scoped())
        .add(MyAlertService::scoped())
        .add(OllamaClient::singleton())
        .add(MyChatService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))?;

    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    info!("Shutting down...");

    Ok(())
}
