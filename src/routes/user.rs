use std::sync::Arc;

use axum::{extract::State, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::MovieEntry,
    services::collections,
};

use super::{
    extract::{Json, Path},
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub movie_id: i64,
    pub title: String,
    pub poster_path: String,
}

impl From<AddMovieRequest> for MovieEntry {
    fn from(request: AddMovieRequest) -> Self {
        Self {
            movie_id: request.movie_id,
            title: request.title,
            poster_path: request.poster_path,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateMovieRequest {
    pub movie_id: i64,
    pub rating: f32,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<AddMovieRequest>,
) -> AppResult<Json<Value>> {
    let favorites =
        collections::add_favorite(state.users.as_ref(), user_id, request.into()).await?;
    Ok(Json(json!({
        "message": "Added to favorites",
        "favorites": favorites,
    })))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let favorites = collections::remove_favorite(state.users.as_ref(), user_id, movie_id).await?;
    Ok(Json(json!({
        "message": "Removed from favorites",
        "favorites": favorites,
    })))
}

pub async fn add_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<AddMovieRequest>,
) -> AppResult<Json<Value>> {
    let watchlist =
        collections::add_watchlist(state.users.as_ref(), user_id, request.into()).await?;
    Ok(Json(json!({
        "message": "Added to watchlist",
        "watchlist": watchlist,
    })))
}

pub async fn remove_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let watchlist = collections::remove_watchlist(state.users.as_ref(), user_id, movie_id).await?;
    Ok(Json(json!({
        "message": "Removed from watchlist",
        "watchlist": watchlist,
    })))
}

pub async fn upsert_rating(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<RateMovieRequest>,
) -> AppResult<Json<Value>> {
    // TMDB scale; the collection layer itself does not validate.
    if !request.rating.is_finite() || !(0.0..=10.0).contains(&request.rating) {
        return Err(AppError::InvalidInput(
            "Rating must be between 0 and 10".to_string(),
        ));
    }

    let ratings = collections::upsert_rating(
        state.users.as_ref(),
        user_id,
        request.movie_id,
        request.rating,
        request.review,
    )
    .await?;
    Ok(Json(json!({
        "message": "Rating saved",
        "ratings": ratings,
    })))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<Value>> {
    let profile =
        collections::update_profile(state.users.as_ref(), user_id, request.name, request.email)
            .await?;
    Ok(Json(json!({
        "message": "Profile updated",
        "user": profile,
    })))
}
