//! Alert conversation endpoint

use crate::api::{Markdown, MarkdownJson};
use crate::core::errors::ChatError;
use crate::core::inference::InferenceError;
use crate::core::traits::ChatService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use di_axum::Inject;
use log::{error, warn};

pub fn router() -> Router {
    Router::new().route("/", post(analyze_alert))
}

async fn analyze_alert(
    Inject(chat_service): Inject<dyn ChatService>,
    MarkdownJson(request): MarkdownJson<schemas::ChatRequest>,
) -> Result<Markdown, ChatError> {
    let reply = chat_service
        .analyze_alert(request.alert, request.messages.unwrap_or_default())
        .await?;

    Ok(Markdown(reply))
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ChatError::MissingAlert | ChatError::MissingUserMessage => {
                (StatusCode::BAD_REQUEST, format!("# ❌ {}", self))
            }
            ChatError::MalformedRequest(detail) => (
                StatusCode::BAD_REQUEST,
                format!("# ❌ Malformed chat request\n{detail}"),
            ),
            ChatError::Inference(InferenceError::Unreachable { endpoint, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "# ❌ Inference Service Unreachable\nFailed to connect to `{endpoint}`."
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("# ❌ Error\n```text\n{}\n```", self),
            ),
        };

        if self.is_validation() {
            warn!("rejected chat request: {}", self);
        } else {
            error!("chat relay failed: {}", self);
        }

        (status, Markdown(body)).into_response()
    }
}

pub mod schemas {
    use crate::core::alerts::Alert;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Deserialize, Debug, Default)]
    pub struct ChatRequest {
        #[serde(default)]
        pub alert: Option<Alert>,
        /// Turns stay undecoded here so a missing alert is reported before a bad turn.
        #[serde(default)]
        pub messages: Option<Vec<Value>>,
    }
}
