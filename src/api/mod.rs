use crate::core::errors::ChatError;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

pub mod alerts;
pub mod chat;

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// All routes with the cross-origin policy applied. Services come from the DI provider
/// attached by the caller.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/alerts", alerts::router())
        .nest("/chat", chat::router())
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any),
        )
}

async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Markdown text body.
#[derive(Debug)]
pub struct Markdown(pub String);

impl IntoResponse for Markdown {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(MARKDOWN_CONTENT_TYPE),
            )],
            self.0,
        )
            .into_response()
    }
}

/// JSON body whose rejection is rendered as a markdown validation error, so `/chat`
/// never answers in another format.
#[derive(Debug)]
pub struct MarkdownJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for MarkdownJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ChatError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ChatError> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ChatError::MalformedRequest(rejection.body_text()))?;
        Ok(MarkdownJson(value))
    }
}
