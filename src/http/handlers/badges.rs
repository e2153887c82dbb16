use crate::domain::error::err;
use crate::metrics::history::NoHistory;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct SampleQuery {
    /// `none` evaluates the sample against the current snapshot only.
    pub history: Option<String>,
}

pub async fn calculate_badges(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    match state.badge_service.evaluate_one(&body).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn bulk_calculate(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let items = match body {
        Value::Array(items) => items,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(err("INVALID_BODY", "request body must be a JSON array of metric snapshots")),
            )
                .into_response()
        }
    };

    if items.len() > state.badge_service.engine.max_bulk_items {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(err(
                "BULK_TOO_LARGE",
                &format!(
                    "batch of {} exceeds the limit of {} items",
                    items.len(),
                    state.badge_service.engine.max_bulk_items
                ),
            )),
        )
            .into_response();
    }

    let report = state.badge_service.evaluate_bulk(items).await;
    (StatusCode::OK, Json(report)).into_response()
}

pub async fn test_api(State(state): State<AppState>, Query(query): Query<SampleQuery>) -> impl IntoResponse {
    let service = match query.history.as_deref() {
        None | Some("default") => state.badge_service.clone(),
        Some("none") => state.badge_service.with_history(Arc::new(NoHistory)),
        Some(other) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(err(
                    "INVALID_QUERY",
                    &format!("history must be `default` or `none`, got `{other}`"),
                )),
            )
                .into_response()
        }
    };

    match service.sample_report().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
