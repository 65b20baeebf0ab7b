//! SQLite connections to the alert store
//!
//! Connections are opened per request and closed before the handler returns, so no pool
//! is kept between calls.

use crate::config::AppConfig;
use crate::core::errors::StoreError;
use di::{Ref, inject, injectable};
use log::debug;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::str::FromStr;

pub struct DatabaseConnection {
    url: String,
}

#[injectable]
impl DatabaseConnection {
    #[inject]
    pub fn create(config: Ref<AppConfig>) -> DatabaseConnection {
        DatabaseConnection::new(config.database_url.clone())
    }
}

impl DatabaseConnection {
    pub fn new(url: impl Into<String>) -> DatabaseConnection {
        DatabaseConnection { url: url.into() }
    }

    /// Opens a fresh connection. The database must already exist.
    pub async fn open(&self) -> Result<SqliteConnection, StoreError> {
        debug!("opening alert store connection");
        Ok(SqliteConnection::connect(&self.url).await?)
    }

    /// Creates the database and the `alerts` collection when they are missing.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let mut connection = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .connect()
            .await?;

        let migrated = sqlx::migrate!().run(&mut connection).await;
        connection.close().await?;
        migrated?;

        Ok(())
    }
}
