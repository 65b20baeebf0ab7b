//! Shared setup for the integration tests.

#![allow(dead_code)]

use alert_relay::api;
use alert_relay::config::AppConfig;
use alert_relay::core::inference::OllamaClient;
use alert_relay::core::services::{MyAlertService, MyChatService};
use alert_relay::infrastructure::database::DatabaseConnection;
use alert_relay::infrastructure::repositories::DbAlertRepository;
use axum::body::Body;
use axum::http::Response;
use di::{Injectable, ServiceCollection, existing_as_self};
use di_axum::RouterServiceProviderExtensions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU32, Ordering};

/// Nothing listens on port 1, so connecting fails immediately.
pub const UNREACHABLE_INFERENCE_URL: &str = "http://127.0.0.1:1/api/chat";

pub const MISSING_DATABASE_URL: &str = "sqlite:/nonexistent-alert-relay-dir/alerts.db";

/// Counter for unique test database URIs
static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A named in-memory database that lives as long as the returned pool. Every
/// connection opened with the returned URL sees the same data.
pub async fn setup_test_db(migrate: bool) -> (SqlitePool, String) {
    let db_num = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db_url = format!("sqlite:file:alertsdb{}?mode=memory&cache=shared", db_num);

    let pool = SqlitePool::connect(&db_url).await.unwrap();
    if migrate {
        sqlx::migrate!().run(&pool).await.unwrap();
    }

    (pool, db_url)
}

pub async fn insert_documents<I, S>(pool: &SqlitePool, documents: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for document in documents {
        sqlx::query("INSERT INTO alerts (document) VALUES (?)")
            .bind(document.as_ref())
            .execute(pool)
            .await
            .unwrap();
    }
}

pub fn test_config(database_url: &str, inference_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_owned(),
        inference_url: inference_url.to_owned(),
        ..AppConfig::default()
    }
}

/// The production router wired to the given configuration.
pub fn create_test_app(config: AppConfig) -> axum::Router {
    let provider = ServiceCollection::new()
        .add(existing_as_self(config))
        .add(DatabaseConnection::singleton())
        .add(DbAlertRepository::scoped())
        .add(MyAlertService::scoped())
        .add(OllamaClient::singleton())
        .add(MyChatService::scoped())
        .build_provider()
        .unwrap();

    api::router().with_provider(provider)
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
