//! Alert listing endpoint

use crate::core::alerts::Alert;
use crate::core::errors::StoreError;
use crate::core::traits::AlertService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;
use log::error;
use serde_json::json;

pub fn router() -> Router {
    Router::new().route("/", get(list_alerts))
}

async fn list_alerts(
    Inject(alert_service): Inject<dyn AlertService>,
) -> Result<(StatusCode, Json<Vec<Alert>>), StoreError> {
    let alerts = alert_service.list_alerts().await?;
    Ok((StatusCode::OK, Json(alerts)))
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        error!("failed to list alerts: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
