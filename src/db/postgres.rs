use sqlx::{postgres::PgPoolOptions, PgPool};

/// Opens the connection pool backing the user store.
///
/// Each request borrows a connection for at most one statement at a time
/// (a record load, then a record save), so the pool stays small; the size
/// comes from configuration rather than a hardcoded constant.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
