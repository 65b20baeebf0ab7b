//! Error kinds returned by services. The HTTP mapping lives in `crate::api`.

use crate::core::inference::InferenceError;
use thiserror::Error;

/// Failures while reading the alert store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("malformed alert document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

/// Failures while relaying a conversation to the inference service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Missing alert")]
    MissingAlert,

    #[error("Missing user message")]
    MissingUserMessage,

    #[error("Malformed chat request: {0}")]
    MalformedRequest(String),

    #[error("failed to render system prompt: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error("failed to serialize alert: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl ChatError {
    /// Caller mistakes, as opposed to failures on our side or upstream.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChatError::MissingAlert | ChatError::MissingUserMessage | ChatError::MalformedRequest(_)
        )
    }
}
