use comedor_shared::{MealSlot, deserialize_quantity};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum RecipeType {
    #[default]
    #[strum(serialize = "principal")]
    #[serde(rename = "principal")]
    Principal,
    #[strum(serialize = "acompañamiento")]
    #[serde(rename = "acompañamiento", alias = "acompanamiento")]
    Acompanamiento,
    #[strum(serialize = "postre")]
    #[serde(rename = "postre")]
    Postre,
    #[strum(serialize = "fruta")]
    #[serde(rename = "fruta")]
    Fruta,
}

impl From<MealSlot> for RecipeType {
    fn from(value: MealSlot) -> Self {
        match value {
            MealSlot::Principal => RecipeType::Principal,
            MealSlot::Acompanamiento => RecipeType::Acompanamiento,
            MealSlot::Postre => RecipeType::Postre,
        }
    }
}

/// One line of a recipe, quantity given per diner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "nombre", alias = "ingrediente")]
    pub name: String,
    #[serde(rename = "unidad", default)]
    pub unit: String,
    #[serde(
        rename = "cantidad",
        default,
        deserialize_with = "deserialize_quantity"
    )]
    pub quantity: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            quantity,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub recipe_type: RecipeType,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        recipe_type: RecipeType,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        Self {
            name: name.into(),
            recipe_type,
            ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_uses_stored_field_names() {
        let recipe = Recipe::new(
            "Guiso",
            RecipeType::Acompanamiento,
            vec![Ingredient::new("Papa", "g", 150.0)],
        );
        let json = serde_json::to_value(&recipe).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nombre": "Guiso",
                "tipo": "acompañamiento",
                "ingredientes": [{"nombre": "Papa", "unidad": "g", "cantidad": 150.0}]
            })
        );
    }

    #[test]
    fn ingredient_quantity_accepts_form_strings() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{"nombre":"Leche","unidad":"l","cantidad":"0.2"}"#).unwrap();
        assert_eq!(ingredient.quantity, 0.2);

        let ingredient: Ingredient =
            serde_json::from_str(r#"{"nombre":"Sal","cantidad":"a gusto"}"#).unwrap();
        assert_eq!(ingredient.quantity, 0.0);
        assert_eq!(ingredient.unit, "");
    }

    #[test]
    fn slot_maps_to_type() {
        assert_eq!(RecipeType::from(MealSlot::Postre), RecipeType::Postre);
        assert_eq!(RecipeType::Fruta.to_string(), "fruta");
    }
}
