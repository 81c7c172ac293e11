use sqlx::{types::Json, PgPool, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{MovieList, RatingList, UserRecord},
};

/// Persistence contract for user records.
///
/// The store holds whole records; `save` rewrites the full row, so concurrent
/// mutations to the same user race last-write-wins at record granularity.
/// No transactions or optimistic concurrency are layered on top.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Loads the record for the given user id. Missing users surface as a
    /// storage error, not an empty record.
    async fn load(&self, user_id: Uuid) -> AppResult<UserRecord>;

    /// Persists the full record, replacing whatever is stored.
    async fn save(&self, record: &UserRecord) -> AppResult<()>;
}

/// PostgreSQL-backed user store. Collections live in JSONB columns so the
/// record round-trips as one row.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn load(&self, user_id: Uuid) -> AppResult<UserRecord> {
        let row = sqlx::query(
            "SELECT id, name, email, favorites, watchlist, ratings FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            favorites: row.try_get::<Json<MovieList>, _>("favorites")?.0,
            watchlist: row.try_get::<Json<MovieList>, _>("watchlist")?.0,
            ratings: row.try_get::<Json<RatingList>, _>("ratings")?.0,
        })
    }

    async fn save(&self, record: &UserRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, favorites, watchlist, ratings)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                favorites = EXCLUDED.favorites,
                watchlist = EXCLUDED.watchlist,
                ratings = EXCLUDED.ratings
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(Json(&record.favorites))
        .bind(Json(&record.watchlist))
        .bind(Json(&record.ratings))
        .execute(&self.pool)
        .await?;

        tracing::debug!(user_id = %record.id, "User record saved");
        Ok(())
    }
}
