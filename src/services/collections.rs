/// User collection manager
///
/// Every operation follows the same shape: load the caller's record, apply
/// exactly one mutation, persist the whole record synchronously, and return
/// the updated sequence. Failures from the store surface unchanged; duplicate
/// inserts are the only client error produced here.
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{MovieEntry, MovieList, RatingList, UserProfile},
};

pub async fn add_favorite(
    store: &dyn UserStore,
    user_id: Uuid,
    entry: MovieEntry,
) -> AppResult<MovieList> {
    let mut record = store.load(user_id).await?;

    record
        .favorites
        .insert(entry)
        .map_err(|_| AppError::InvalidInput("Movie already in favorites".to_string()))?;

    store.save(&record).await?;
    tracing::info!(user_id = %user_id, count = record.favorites.len(), "Favorite added");
    Ok(record.favorites)
}

pub async fn remove_favorite(
    store: &dyn UserStore,
    user_id: Uuid,
    movie_id: i64,
) -> AppResult<MovieList> {
    let mut record = store.load(user_id).await?;

    record.favorites.remove(movie_id);

    store.save(&record).await?;
    Ok(record.favorites)
}

pub async fn add_watchlist(
    store: &dyn UserStore,
    user_id: Uuid,
    entry: MovieEntry,
) -> AppResult<MovieList> {
    let mut record = store.load(user_id).await?;

    record
        .watchlist
        .insert(entry)
        .map_err(|_| AppError::InvalidInput("Movie already in watchlist".to_string()))?;

    store.save(&record).await?;
    tracing::info!(user_id = %user_id, count = record.watchlist.len(), "Watchlist entry added");
    Ok(record.watchlist)
}

pub async fn remove_watchlist(
    store: &dyn UserStore,
    user_id: Uuid,
    movie_id: i64,
) -> AppResult<MovieList> {
    let mut record = store.load(user_id).await?;

    record.watchlist.remove(movie_id);

    store.save(&record).await?;
    Ok(record.watchlist)
}

pub async fn upsert_rating(
    store: &dyn UserStore,
    user_id: Uuid,
    movie_id: i64,
    rating: f32,
    review: String,
) -> AppResult<RatingList> {
    let mut record = store.load(user_id).await?;

    record.ratings.upsert(movie_id, rating, review, Utc::now());

    store.save(&record).await?;
    tracing::info!(user_id = %user_id, movie_id = movie_id, "Rating saved");
    Ok(record.ratings)
}

pub async fn update_profile(
    store: &dyn UserStore,
    user_id: Uuid,
    name: Option<String>,
    email: Option<String>,
) -> AppResult<UserProfile> {
    let mut record = store.load(user_id).await?;

    record.update_profile(name, email);

    store.save(&record).await?;
    Ok(record.profile())
}
