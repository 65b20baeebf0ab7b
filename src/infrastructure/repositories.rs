//! DB Repository abstractions

use crate::core::errors::StoreError;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::AlertDocument;
use crate::infrastructure::traits::AlertRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::warn;
use sqlx::Connection;

#[injectable(AlertRepository)]
pub struct DbAlertRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl AlertRepository for DbAlertRepository {
    async fn list_alert_documents(&self, limit: u32) -> Result<Vec<AlertDocument>, StoreError> {
        let mut connection = self.connection.open().await?;

        let documents: Result<Vec<AlertDocument>, sqlx::Error> =
            sqlx::query_as("SELECT document FROM alerts LIMIT ?")
                .bind(i64::from(limit))
                .fetch_all(&mut connection)
                .await;

        if let Err(e) = connection.close().await {
            warn!("failed to close alert store connection: {e}");
        }

        Ok(documents?)
    }
}
