use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use comedor_recipe::{Catalog, RawRecipe, Recipe, RecipeType, normalize_entered_recipe};
use serde::Deserialize;
use serde_json::json;

use crate::{auth::SignedIn, error::AppError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct RecipesQuery {
    tipo: Option<RecipeType>,
}

fn catalog_json(catalog: &Catalog, recipe_type: Option<RecipeType>) -> serde_json::Value {
    let recipes: Vec<&Recipe> = match recipe_type {
        Some(recipe_type) => catalog.of_type(recipe_type).collect(),
        None => catalog.recipes().iter().collect(),
    };

    json!({ "recetas": recipes, "editando": catalog.editing() })
}

/// GET /recipes - The catalog, optionally narrowed to one type
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RecipesQuery>,
) -> impl IntoResponse {
    let catalog = state.planner.catalog().await;
    Json(catalog_json(&catalog, query.tipo))
}

/// POST /recipes - Replace the recipe being edited, or add a new one
#[tracing::instrument(skip_all)]
pub async fn save(
    State(state): State<AppState>,
    Extension(session): Extension<SignedIn>,
    Json(raw): Json<RawRecipe>,
) -> impl IntoResponse {
    let recipe = normalize_entered_recipe(raw);
    let name = recipe.name.clone();
    let (index, catalog) = state.planner.add_or_update(recipe).await;
    tracing::info!(subject = %session.subject, recipe = %name, index, "Recipe saved");

    let mut body = catalog_json(&catalog, None);
    body["indice"] = json!(index);
    Json(body)
}

/// POST /recipes/{index}/edit - Start editing the recipe at `index`
#[tracing::instrument(skip(state))]
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state
        .planner
        .begin_edit(index)
        .await
        .ok_or_else(|| AppError::NotFound(format!("no recipe at index {index}")))?;

    Ok(Json(json!({ "indice": index, "receta": recipe })))
}

/// POST /recipes/edit/cancel
#[tracing::instrument(skip(state))]
pub async fn cancel_edit(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.planner.cancel_edit().await;
    Json(catalog_json(&catalog, None))
}

/// DELETE /recipes/{name} - Remove every recipe with that name
#[tracing::instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<SignedIn>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let (removed, catalog) = state.planner.delete(&name).await;
    tracing::info!(subject = %session.subject, removed, "Recipe deleted");

    let mut body = catalog_json(&catalog, None);
    body["eliminadas"] = json!(removed);
    Json(body)
}
