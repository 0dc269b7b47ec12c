//! # API Handlers
//!
//! Axum handlers for the sales query endpoints.

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use sq_core::{QueryOptions, QueryParams, QueryResult};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;

#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub records: usize,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// A query task that died (panicked or was cancelled) surfaces as a generic 500.
fn query_failed(e: JoinError) -> (StatusCode, Json<ApiError>) {
    tracing::error!("Sales query failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            message: "Internal server error".into(),
        }),
    )
}

// =============================================================================
// Health
// =============================================================================

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "SALESQ retail sales API is running",
        records: state.store.len(),
    })
}

// =============================================================================
// Sales
// =============================================================================

/// `GET /api/sales`. Multi-value parameters may repeat and/or be comma-separated.
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<QueryResult> {
    let params = QueryParams::from_pairs(pairs);
    let options = QueryOptions::from(&params);

    let started = Instant::now();
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || store.query(&options))
        .await
        .map_err(query_failed)?;

    tracing::debug!(
        "Sales query matched {} records, page {}/{} in {}ms",
        result.meta.total_items,
        result.meta.current_page,
        result.meta.total_pages,
        started.elapsed().as_millis()
    );
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_query_task_maps_to_internal_error() {
        let err = tokio::task::spawn_blocking(|| panic!("query task panicked"))
            .await
            .unwrap_err();

        let (status, Json(body)) = query_failed(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"message": "Internal server error"})
        );
    }
}
