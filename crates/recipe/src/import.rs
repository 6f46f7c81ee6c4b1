use std::str::FromStr;

use comedor_shared::deserialize_quantity;
use serde::Deserialize;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{Ingredient, Recipe, RecipeType};

/// Canonical spellings restored after accents are folded away.
const RECIPE_TYPE_TABLE: &[(&str, &str)] = &[("acompanamiento", "acompañamiento")];

/// Fold a preloaded `tipo` value: NFD, combining marks dropped, lowercased,
/// then mapped through [`RECIPE_TYPE_TABLE`]. Anything else passes through.
pub fn normalize_recipe_type(raw: &str) -> String {
    let folded = raw
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    RECIPE_TYPE_TABLE
        .iter()
        .find(|(from, _)| *from == folded)
        .map(|(_, to)| (*to).to_owned())
        .unwrap_or(folded)
}

/// A record of the preload document, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub ingredientes: Option<Vec<RawIngredient>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIngredient {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub ingrediente: Option<String>,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub cantidad: f64,
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        let name = raw
            .nombre
            .filter(|n| !n.is_empty())
            .or(raw.ingrediente)
            .unwrap_or_default();

        Ingredient {
            name,
            unit: raw.unidad.unwrap_or_default(),
            quantity: raw.cantidad,
        }
    }
}

/// Turn a preload record into a catalog recipe.
///
/// Records without a name, or whose type does not fold to a known
/// [`RecipeType`], are skipped.
pub fn normalize_imported_recipe(raw: RawRecipe) -> Option<Recipe> {
    let Some(name) = raw.nombre.filter(|n| !n.trim().is_empty()) else {
        tracing::warn!("Skipping preloaded recipe without a name");
        return None;
    };

    let tipo = normalize_recipe_type(raw.tipo.as_deref().unwrap_or_default());
    let Ok(recipe_type) = RecipeType::from_str(&tipo) else {
        tracing::warn!(recipe = %name, tipo = %tipo, "Skipping preloaded recipe with unknown type");
        return None;
    };

    let ingredients = raw
        .ingredientes
        .unwrap_or_default()
        .into_iter()
        .map(Ingredient::from)
        .collect();

    Some(Recipe {
        name,
        recipe_type,
        ingredients,
    })
}

/// Turn a recipe entered by hand into a catalog recipe.
///
/// Same folding as [`normalize_imported_recipe`], but nothing is rejected:
/// a type that does not fold to a known [`RecipeType`] becomes the default.
pub fn normalize_entered_recipe(raw: RawRecipe) -> Recipe {
    let name = raw.nombre.unwrap_or_default();

    let tipo = normalize_recipe_type(raw.tipo.as_deref().unwrap_or_default());
    let recipe_type = RecipeType::from_str(&tipo).unwrap_or_else(|_| {
        tracing::warn!(recipe = %name, tipo = %tipo, "Unknown recipe type, using default");
        RecipeType::default()
    });

    let ingredients = raw
        .ingredientes
        .unwrap_or_default()
        .into_iter()
        .map(Ingredient::from)
        .collect();

    Recipe {
        name,
        recipe_type,
        ingredients,
    }
}

/// Parse the preload document, a JSON array of recipe records.
///
/// A malformed document is an error; a malformed record is skipped.
pub fn parse_preload(document: &[u8]) -> anyhow::Result<Vec<Recipe>> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(document)?;

    let recipes = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<RawRecipe>(record) {
            Ok(raw) => normalize_imported_recipe(raw),
            Err(e) => {
                tracing::warn!(index, "Skipping malformed preloaded recipe: {e}");
                None
            }
        })
        .collect();

    Ok(recipes)
}

/// Combine preloaded recipes with the stored catalog.
///
/// Stored recipes win by name: the result is every preloaded recipe whose name
/// is not stored, followed by the stored recipes in their saved order.
pub fn merge_preloaded(preloaded: Vec<Recipe>, stored: Vec<Recipe>) -> Vec<Recipe> {
    let mut merged: Vec<Recipe> = preloaded
        .into_iter()
        .filter(|p| !stored.iter().any(|s| s.name == p.name))
        .collect();
    merged.extend(stored);
    merged
}
