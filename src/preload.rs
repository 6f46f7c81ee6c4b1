use comedor_recipe::{Recipe, parse_preload};
use rust_embed::RustEmbed;

pub const PRELOAD_FILE: &str = "recetas_precargadas.json";

#[derive(RustEmbed)]
#[folder = "data/"]
struct Data;

/// Recipes every session starts with.
///
/// Read from `path` when set, otherwise from the bundled file. Any failure is
/// logged and yields no recipes.
pub async fn load_preloaded(path: Option<&str>) -> Vec<Recipe> {
    let document = match path {
        Some(path) => match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path, "Preloaded recipes unavailable: {e}");
                return Vec::new();
            }
        },
        None => match Data::get(PRELOAD_FILE) {
            Some(file) => file.data.into_owned(),
            None => {
                tracing::warn!("Bundled preloaded recipes missing");
                return Vec::new();
            }
        },
    };

    match parse_preload(&document) {
        Ok(recipes) => {
            tracing::info!(recipes = recipes.len(), "Preloaded recipes loaded");
            recipes
        }
        Err(e) => {
            tracing::warn!("Preloaded recipes unreadable: {e}");
            Vec::new()
        }
    }
}
