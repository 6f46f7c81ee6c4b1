use comedor_recipe::Catalog;
use comedor_shared::{DayFilter, normalize_key};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::WeeklyMenu;

/// Totals at or above this are reported in the next unit up.
pub const RESCALE_THRESHOLD: f64 = 1000.0;

/// One row of the order: an ingredient total for the selected days.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
}

/// Order totals before rescaling, keyed by (name, unit) in first-encounter order.
pub fn accumulate_order(
    menu: &WeeklyMenu,
    catalog: &Catalog,
    headcount: u32,
    filter: DayFilter,
) -> IndexMap<(String, String), f64> {
    let diners = f64::from(headcount);
    let mut totals: IndexMap<(String, String), f64> = IndexMap::new();

    for day in filter.days() {
        for name in menu.day(*day).recipes() {
            let Some(recipe) = catalog.find(name) else {
                tracing::debug!(recipe = %name, day = %day, "Menu recipe not in catalog, skipped");
                continue;
            };

            for ingredient in &recipe.ingredients {
                let key = (normalize_key(&ingredient.name), normalize_key(&ingredient.unit));
                *totals.entry(key).or_insert(0.0) += ingredient.quantity * diners;
            }
        }
    }

    totals
}

/// Ingredient order for `headcount` diners over the days in `filter`.
///
/// Recipes missing from the catalog contribute nothing. Gram and millilitre
/// totals of 1000 or more are reported in kilograms and litres.
pub fn compute_order(
    menu: &WeeklyMenu,
    catalog: &Catalog,
    headcount: u32,
    filter: DayFilter,
) -> Vec<OrderLine> {
    accumulate_order(menu, catalog, headcount, filter)
        .into_iter()
        .map(|((name, unit), total)| rescale(name, unit, total))
        .collect()
}

pub fn rescale(name: String, unit: String, total: f64) -> OrderLine {
    let larger = match unit.as_str() {
        "g" => Some("kg"),
        "ml" => Some("l"),
        // Other units are never divided, however large the total.
        _ => None,
    };

    match larger {
        Some(larger) if total >= RESCALE_THRESHOLD => OrderLine {
            name,
            unit: larger.to_owned(),
            quantity: total / RESCALE_THRESHOLD,
        },
        _ => OrderLine {
            name,
            unit,
            quantity: total,
        },
    }
}
