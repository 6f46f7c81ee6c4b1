use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use comedor_report::Report;
use comedor_shared::{DayFilter, MealSlot, UnknownDay, Weekday, deserialize_count};
use serde::Deserialize;

use crate::{error::AppError, routes::AppState, routes::download};

#[derive(Debug, Deserialize)]
pub struct SlotBody {
    receta: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderBody {
    #[serde(rename = "comensales", default, deserialize_with = "deserialize_count")]
    headcount: u32,
    #[serde(rename = "dia", default)]
    filter: DayFilter,
}

pub(crate) fn parse_day(raw: &str) -> Result<Weekday, AppError> {
    Weekday::from_str(raw).map_err(|_| UnknownDay(raw.to_owned()).into())
}

/// GET /menu - The weekly menu selection
#[tracing::instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.planner.snapshot().await.menu)
}

/// PUT /menu/{day}/{slot} - Choose the recipe for one slot, or clear it
#[tracing::instrument(skip(state))]
pub async fn set_slot(
    State(state): State<AppState>,
    Path((day, slot)): Path<(String, String)>,
    Json(body): Json<SlotBody>,
) -> Result<impl IntoResponse, AppError> {
    let day = parse_day(&day)?;
    let slot = MealSlot::from_str(&slot)
        .map_err(|_| AppError::BadRequest(format!("unknown menu slot '{slot}'")))?;

    let menu = state.planner.set_menu_slot(day, slot, body.receta).await;

    Ok(Json(menu))
}

/// POST /order - Ingredient order for the menu and headcount
#[tracing::instrument(skip(state))]
pub async fn order(State(state): State<AppState>, Json(body): Json<OrderBody>) -> impl IntoResponse {
    Json(state.planner.order(body.headcount, body.filter).await)
}

/// GET /order/export - The last computed order as a spreadsheet
#[tracing::instrument(skip(state))]
pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = state.planner.export_order().await?;
    Ok(download::xlsx(Report::Order, bytes))
}
