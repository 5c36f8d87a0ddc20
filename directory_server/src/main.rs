//! Directory server: reads settings from the environment (and `.env`), builds the store once,
//! ensures the resource tables exist, and serves the API.
//!
//! Run from repo root: `cargo run -p directory-server`
//! Without a database: `STORE=memory cargo run -p directory-server`

use directory_api::{
    app,
    ensure_database_exists,
    ensure_resource_tables,
    AppState,
    MemoryStore,
    PgResourceStore,
    ResourceStore,
    Settings,
    StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("directory_api=info,directory_server=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn ResourceStore> = match settings.store {
        StoreBackend::Postgres => {
            let database_url = settings.database_url.as_deref().unwrap_or_default();
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(database_url)
                .await?;
            ensure_resource_tables(&pool).await?;
            Arc::new(PgResourceStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, settings.page_size);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(page_size = settings.page_size, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
