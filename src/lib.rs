pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod preload;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::Router;
use comedor_recipe::SqliteCatalogStore;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use routes::AppState;
pub use session::{Planner, Session};

/// Build the application over a migrated pool
///
/// Loads the stored catalog and the preloaded recipes, merges them and
/// writes the merged catalog back before any request is served.
pub async fn create_app(config: Config, pool: SqlitePool) -> Router {
    let store = Arc::new(SqliteCatalogStore::new(pool.clone()));
    let preloaded = preload::load_preloaded(config.preload.path.as_deref()).await;
    let planner = Planner::start(store, preloaded).await;

    let state = AppState {
        config,
        pool,
        planner,
    };

    routes::router(state).layer(TraceLayer::new_for_http())
}
