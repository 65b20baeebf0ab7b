//! DI "Interfaces"

use crate::core::alerts::Alert;
use crate::core::errors::{ChatError, StoreError};
use async_trait::async_trait;
use serde_json::Value;

/// Maximum number of alerts a single listing returns.
pub const ALERT_LIMIT: u32 = 100;

#[async_trait]
pub trait AlertService: Send + Sync {
    /// Lists up to [`ALERT_LIMIT`] alerts, newest first.
    ///
    /// Returns `Err` if the store can't be reached or a document can't be decoded. No
    /// partial list is ever returned.
    async fn list_alerts(&self) -> Result<Vec<Alert>, StoreError>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Asks the model about `alert`, continuing the caller's conversation.
    ///
    /// `messages` are the raw turns as sent by the caller. They are decoded after the
    /// alert check, and the last one has to come from the user. Nothing is stored between calls, so the
    /// caller sends the whole history every time.
    async fn analyze_alert(
        &self,
        alert: Option<Alert>,
        messages: Vec<Value>,
    ) -> Result<String, ChatError>;
}
