use std::sync::Arc;

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::{
    extract::{Json, Path, Query},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

/// Free-text movie search. Rejects a missing or empty query before any
/// outbound call is made.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Value>> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter is required".to_string()))?;

    let body = state.catalog.search(&query, params.page.unwrap_or(1)).await?;
    Ok(Json(body))
}

/// Popular movies listing
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Value>> {
    let body = state.catalog.popular(params.page.unwrap_or(1)).await?;
    Ok(Json(body))
}

/// Movie detail with credits, videos and similar titles appended
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let body = state.catalog.details(movie_id).await?;
    Ok(Json(body))
}

/// Recommendations for a movie (auth required)
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let body = state.catalog.recommendations(movie_id).await?;
    Ok(Json(body))
}
