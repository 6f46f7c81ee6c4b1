use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use comedor_monthly::LogField;
use comedor_report::Report;
use serde::Deserialize;

use crate::{
    error::AppError,
    routes::{AppState, download, menu::parse_day},
};

#[derive(Debug, Deserialize)]
pub struct ValueBody {
    #[serde(default)]
    valor: serde_json::Value,
}

impl ValueBody {
    /// The form value as entered. Numbers are taken as their text.
    fn raw(&self) -> String {
        match &self.valor {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Weeks are numbered from 1 in paths. 0 maps past the end and is ignored.
fn week_index(week: usize) -> usize {
    week.checked_sub(1).unwrap_or(usize::MAX)
}

/// GET /log - The five-week monthly log
#[tracing::instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.planner.snapshot().await.log)
}

/// PUT /log/{week}/{day}/{field}
#[tracing::instrument(skip(state))]
pub async fn set_field(
    State(state): State<AppState>,
    Path((week, day, field)): Path<(usize, String, String)>,
    Json(body): Json<ValueBody>,
) -> Result<impl IntoResponse, AppError> {
    let day = parse_day(&day)?;
    let field = LogField::parse(&field, &body.raw())?;

    let log = state
        .planner
        .set_log_field(week_index(week), day, &field)
        .await;

    Ok(Json(log))
}

/// PUT /log/{week}/{day}/usage/{ingredient} - Hand-entered quantity used
#[tracing::instrument(skip(state))]
pub async fn set_usage(
    State(state): State<AppState>,
    Path((week, day, ingredient)): Path<(usize, String, String)>,
    Json(body): Json<ValueBody>,
) -> Result<impl IntoResponse, AppError> {
    let day = parse_day(&day)?;

    let log = state
        .planner
        .set_usage(week_index(week), day, &ingredient, &body.raw())
        .await;

    Ok(Json(log))
}

/// GET /log/totals - Month totals per ingredient
#[tracing::instrument(skip(state))]
pub async fn totals(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.planner.monthly_totals().await)
}

/// GET /log/export - The monthly log as a spreadsheet
#[tracing::instrument(skip(state))]
pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = state.planner.export_monthly_log().await?;
    Ok(download::xlsx(Report::MonthlyLog, bytes))
}
