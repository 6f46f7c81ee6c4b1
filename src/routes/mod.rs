use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use sqlx::SqlitePool;

use crate::{auth::require_session, config::Config, session::Planner};

mod download;
mod health;
mod log;
mod login;
mod menu;
mod recipes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub planner: Planner,
}

pub fn router(app_state: AppState) -> Router {
    let planning = Router::new()
        .route("/recipes", get(recipes::list).post(recipes::save))
        .route("/recipes/edit/cancel", post(recipes::cancel_edit))
        .route("/recipes/{index}/edit", post(recipes::begin_edit))
        .route("/recipes/{name}", delete(recipes::remove))
        .route("/menu", get(menu::page))
        .route("/menu/{day}/{slot}", put(menu::set_slot))
        .route("/order", post(menu::order))
        .route("/order/export", get(menu::export))
        .route("/log", get(log::page))
        .route("/log/totals", get(log::totals))
        .route("/log/export", get(log::export))
        .route("/log/{week}/{day}/{field}", put(log::set_field))
        .route("/log/{week}/{day}/usage/{ingredient}", put(log::set_usage))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/login", get(login::page))
        .route("/session", get(login::session))
        .route("/logout", post(login::logout))
        .merge(planning)
        .with_state(app_state)
}
