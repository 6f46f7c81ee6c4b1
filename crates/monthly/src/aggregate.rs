use comedor_recipe::Catalog;
use comedor_shared::{MealSlot, normalize_key};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::MonthlyLog;

/// Month-wide ingredient totals keyed by lowercased ingredient name.
///
/// Totals carry no unit. The units seen for each name while summing recipe
/// ingredients are kept so callers can spot names mixed across units.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyTotals {
    totals: IndexMap<String, f64>,
    #[serde(skip)]
    units: IndexMap<String, IndexSet<String>>,
}

impl MonthlyTotals {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.totals.get(&normalize_key(name)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Names whose recipe quantities were summed across more than one unit.
    pub fn mixed_units(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.units
            .iter()
            .filter(|(_, units)| units.len() > 1)
            .map(|(name, units)| (name.as_str(), units))
    }

    fn add(&mut self, name: String, quantity: f64) {
        *self.totals.entry(name).or_insert(0.0) += quantity;
    }
}

/// Sum ingredient usage over the whole log.
///
/// Every served recipe contributes `quantity × (adults + children)` under the
/// ingredient name, then each hand-entered usage is added on top.
pub fn compute_monthly_totals(log: &MonthlyLog, catalog: &Catalog) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();

    for (_, _, record) in log.iter() {
        let diners = f64::from(record.diners());

        for slot in MealSlot::all() {
            let Some(recipe) = record.recipe(*slot).and_then(|name| catalog.find(name)) else {
                continue;
            };

            for ingredient in &recipe.ingredients {
                let name = normalize_key(&ingredient.name);
                totals
                    .units
                    .entry(name.clone())
                    .or_default()
                    .insert(normalize_key(&ingredient.unit));
                totals.add(name, ingredient.quantity * diners);
            }
        }

        for (name, quantity) in &record.used {
            totals.add(normalize_key(name), *quantity);
        }
    }

    for (name, units) in totals.mixed_units() {
        tracing::warn!(
            ingredient = %name,
            units = ?units,
            "Monthly total sums quantities in different units"
        );
    }

    totals
}
