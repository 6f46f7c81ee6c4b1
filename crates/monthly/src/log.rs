use std::sync::Arc;

use comedor_shared::{
    MealSlot, Weekday, deserialize_count, parse_count, parse_quantity, quantity_from_value,
};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Number of weeks kept in the monthly log.
pub const WEEKS: usize = 5;

/// What happened in the dining room on one school day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLogRecord {
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "adultos", default, deserialize_with = "deserialize_count")]
    pub adults: u32,
    #[serde(rename = "ninos", default, deserialize_with = "deserialize_count")]
    pub children: u32,
    #[serde(default)]
    pub principal: Option<String>,
    #[serde(rename = "acompañamiento", alias = "acompanamiento", default)]
    pub acompanamiento: Option<String>,
    #[serde(default)]
    pub postre: Option<String>,
    /// Quantities actually used, entered by hand, keyed by ingredient name.
    #[serde(
        rename = "ingredientesUsados",
        default,
        deserialize_with = "deserialize_usage"
    )]
    pub used: IndexMap<String, f64>,
}

impl DailyLogRecord {
    pub fn diners(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn recipe(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Principal => self.principal.as_deref(),
            MealSlot::Acompanamiento => self.acompanamiento.as_deref(),
            MealSlot::Postre => self.postre.as_deref(),
        }
    }

    /// Recipe names served that day in slot order.
    pub fn recipes(&self) -> impl Iterator<Item = &str> {
        [&self.principal, &self.acompanamiento, &self.postre]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }

    fn apply(&self, field: &LogField) -> Self {
        let mut next = self.clone();
        match field {
            LogField::Date(date) => next.date = date.clone(),
            LogField::Adults(count) => next.adults = *count,
            LogField::Children(count) => next.children = *count,
            LogField::Recipe(slot, recipe) => {
                let recipe = recipe.clone().filter(|name| !name.trim().is_empty());
                match slot {
                    MealSlot::Principal => next.principal = recipe,
                    MealSlot::Acompanamiento => next.acompanamiento = recipe,
                    MealSlot::Postre => next.postre = recipe,
                }
            }
        }
        next
    }
}

fn deserialize_usage<'de, D>(deserializer: D) -> Result<IndexMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name, quantity_from_value(&value)))
        .collect())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown log field '{0}'")]
pub struct UnknownLogField(pub String);

/// A single editable field of a [`DailyLogRecord`], already coerced.
#[derive(Clone, Debug, PartialEq)]
pub enum LogField {
    Date(String),
    Adults(u32),
    Children(u32),
    Recipe(MealSlot, Option<String>),
}

impl LogField {
    /// Map a wire field name and a raw form value to a field edit.
    ///
    /// Counts that do not parse become 0.
    pub fn parse(field: &str, raw: &str) -> Result<Self, UnknownLogField> {
        let value = || Some(raw.trim().to_owned()).filter(|v| !v.is_empty());

        match field {
            "fecha" => Ok(LogField::Date(raw.trim().to_owned())),
            "adultos" => Ok(LogField::Adults(parse_count(raw))),
            "ninos" | "niños" => Ok(LogField::Children(parse_count(raw))),
            "principal" => Ok(LogField::Recipe(MealSlot::Principal, value())),
            "acompañamiento" | "acompanamiento" => {
                Ok(LogField::Recipe(MealSlot::Acompanamiento, value()))
            }
            "postre" => Ok(LogField::Recipe(MealSlot::Postre, value())),
            other => Err(UnknownLogField(other.to_owned())),
        }
    }
}

type Week = [Arc<DailyLogRecord>; Weekday::COUNT];

/// Five weeks of five daily records.
///
/// Edits return a new log that shares every untouched week and day with the
/// previous one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyLog {
    weeks: [Arc<Week>; WEEKS],
}

impl Default for MonthlyLog {
    fn default() -> Self {
        Self::empty()
    }
}

impl MonthlyLog {
    pub fn empty() -> Self {
        Self {
            weeks: std::array::from_fn(|_| Arc::new(std::array::from_fn(|_| Arc::default()))),
        }
    }

    pub fn week(&self, week: usize) -> Option<&Arc<Week>> {
        self.weeks.get(week)
    }

    pub fn day(&self, week: usize, day: Weekday) -> Option<&Arc<DailyLogRecord>> {
        self.weeks.get(week).map(|days| &days[day.index()])
    }

    /// Every record with its zero-based week index and weekday, in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Weekday, &DailyLogRecord)> {
        self.weeks.iter().enumerate().flat_map(|(week, days)| {
            Weekday::all()
                .iter()
                .map(move |day| (week, *day, days[day.index()].as_ref()))
        })
    }

    pub fn with_field(&self, week: usize, day: Weekday, field: &LogField) -> Self {
        self.update_day(week, day, |record| record.apply(field))
    }

    /// Set the hand-entered usage of `ingredient`. Unparseable values become 0.
    pub fn with_usage(&self, week: usize, day: Weekday, ingredient: &str, raw: &str) -> Self {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return self.clone();
        }

        let quantity = parse_quantity(raw);
        self.update_day(week, day, |record| {
            let mut next = record.clone();
            next.used.insert(ingredient.to_owned(), quantity);
            next
        })
    }

    fn update_day(
        &self,
        week: usize,
        day: Weekday,
        update: impl FnOnce(&DailyLogRecord) -> DailyLogRecord,
    ) -> Self {
        let Some(current) = self.weeks.get(week) else {
            tracing::debug!(week, "Log week out of range, edit ignored");
            return self.clone();
        };

        let mut days: Week = current.as_ref().clone();
        days[day.index()] = Arc::new(update(&days[day.index()]));

        let mut weeks = self.weeks.clone();
        weeks[week] = Arc::new(days);
        Self { weeks }
    }
}
