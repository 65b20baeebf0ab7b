//! Infrastructure traits, used for DI on higher levels

use crate::core::errors::StoreError;
use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Reads at most `limit` documents in store iteration order.
    async fn list_alert_documents(
        &self,
        limit: u32,
    ) -> Result<Vec<entities::AlertDocument>, StoreError>;
}
