use std::sync::Arc;

use marquee_api::{
    config::Config,
    db::{self, PgUserStore},
    middleware::auth::RemoteIdentityVerifier,
    routes::{create_router, AppState},
    services::TmdbGateway,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=info,tower_http=info".into()),
        )
        .init();

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = Arc::new(AppState {
        users: Arc::new(PgUserStore::new(pool)),
        catalog: Arc::new(TmdbGateway::new(&config)),
        identity: Arc::new(RemoteIdentityVerifier::new(&config)),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "marquee-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
