//! Implementations for the service the app needs.
//!

use crate::core::alerts::{self, Alert};
use crate::core::errors::{ChatError, StoreError};
use crate::core::inference::{ChatMessage, InferenceClient};
use crate::core::prompt;
use crate::core::traits::{ALERT_LIMIT, AlertService, ChatService};
use crate::infrastructure::traits::AlertRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::debug;
use serde_json::Value;

#[injectable(AlertService)]
pub struct MyAlertService {
    repo: Ref<dyn AlertRepository>,
}

#[async_trait]
impl AlertService for MyAlertService {
    async fn list_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let documents = self.repo.list_alert_documents(ALERT_LIMIT).await?;

        let mut alerts = documents
            .iter()
            .map(|row| Alert::from_document(&row.document))
            .collect::<Result<Vec<_>, _>>()?;

        alerts::sort_newest_first(&mut alerts);
        Ok(alerts)
    }
}

#[injectable(ChatService)]
pub struct MyChatService {
    inference: Ref<dyn InferenceClient>,
}

#[async_trait]
impl ChatService for MyChatService {
    async fn analyze_alert(
        &self,
        alert: Option<Alert>,
        messages: Vec<Value>,
    ) -> Result<String, ChatError> {
        let alert = alert
            .filter(|alert| !alert.is_empty())
            .ok_or(ChatError::MissingAlert)?;

        let messages = decode_turns(messages)?;

        if !messages.last().is_some_and(ChatMessage::is_user) {
            return Err(ChatError::MissingUserMessage);
        }

        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(ChatMessage::system(prompt::render_system_prompt(&alert)?));
        conversation.extend(messages);

        debug!("relaying {} turns to {}", conversation.len(), self.inference.endpoint());

        Ok(self.inference.complete(&conversation).await?)
    }
}

/// Turns are only decoded once an alert is known to be present.
fn decode_turns(messages: Vec<Value>) -> Result<Vec<ChatMessage>, ChatError> {
    messages
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()
        .map_err(|e| ChatError::MalformedRequest(format!("invalid message: {e}")))
}
