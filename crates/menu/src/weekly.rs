use std::sync::Arc;

use comedor_shared::{MealSlot, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The recipes chosen for one day. Slots hold recipe names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMenuSlot {
    #[serde(default)]
    pub principal: Option<String>,
    #[serde(rename = "acompañamiento", alias = "acompanamiento", default)]
    pub acompanamiento: Option<String>,
    #[serde(default)]
    pub postre: Option<String>,
}

impl DailyMenuSlot {
    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Principal => self.principal.as_deref(),
            MealSlot::Acompanamiento => self.acompanamiento.as_deref(),
            MealSlot::Postre => self.postre.as_deref(),
        }
    }

    /// A copy with `slot` set. Blank names clear the slot.
    pub fn with(&self, slot: MealSlot, recipe: Option<String>) -> Self {
        let recipe = recipe.filter(|name| !name.trim().is_empty());
        let mut next = self.clone();
        match slot {
            MealSlot::Principal => next.principal = recipe,
            MealSlot::Acompanamiento => next.acompanamiento = recipe,
            MealSlot::Postre => next.postre = recipe,
        }
        next
    }

    /// Chosen recipe names in slot order, skipping empty slots.
    pub fn recipes(&self) -> impl Iterator<Item = &str> {
        [&self.principal, &self.acompanamiento, &self.postre]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// Monday to Friday menu selection.
///
/// Days are shared between copies: [`WeeklyMenu::with_slot`] only allocates
/// the day it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<Weekday, DailyMenuSlot>",
    into = "IndexMap<Weekday, DailyMenuSlot>"
)]
pub struct WeeklyMenu {
    days: [Arc<DailyMenuSlot>; Weekday::COUNT],
}

impl WeeklyMenu {
    pub fn day(&self, day: Weekday) -> &DailyMenuSlot {
        &self.days[day.index()]
    }

    pub fn day_arc(&self, day: Weekday) -> &Arc<DailyMenuSlot> {
        &self.days[day.index()]
    }

    pub fn with_slot(&self, day: Weekday, slot: MealSlot, recipe: Option<String>) -> Self {
        let mut days = self.days.clone();
        days[day.index()] = Arc::new(days[day.index()].with(slot, recipe));
        Self { days }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DailyMenuSlot)> {
        Weekday::all()
            .iter()
            .map(|day| (*day, self.days[day.index()].as_ref()))
    }
}

impl From<IndexMap<Weekday, DailyMenuSlot>> for WeeklyMenu {
    fn from(mut value: IndexMap<Weekday, DailyMenuSlot>) -> Self {
        let days = std::array::from_fn(|index| {
            let slot = Weekday::from_index(index)
                .and_then(|day| value.swap_remove(&day))
                .unwrap_or_default();
            Arc::new(slot)
        });
        Self { days }
    }
}

impl From<WeeklyMenu> for IndexMap<Weekday, DailyMenuSlot> {
    fn from(value: WeeklyMenu) -> Self {
        value
            .iter()
            .map(|(day, slot)| (day, slot.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_slot_replaces_only_the_touched_day() {
        let menu = WeeklyMenu::default();
        let next = menu.with_slot(
            Weekday::Martes,
            MealSlot::Principal,
            Some("Milanesa".to_owned()),
        );

        assert_eq!(next.day(Weekday::Martes).principal.as_deref(), Some("Milanesa"));
        assert!(menu.day(Weekday::Martes).principal.is_none());
        for day in [Weekday::Lunes, Weekday::Miercoles, Weekday::Jueves, Weekday::Viernes] {
            assert!(Arc::ptr_eq(menu.day_arc(day), next.day_arc(day)));
        }
        assert!(!Arc::ptr_eq(
            menu.day_arc(Weekday::Martes),
            next.day_arc(Weekday::Martes)
        ));
    }

    #[test]
    fn blank_recipe_clears_slot() {
        let menu = WeeklyMenu::default()
            .with_slot(Weekday::Lunes, MealSlot::Postre, Some("Flan".to_owned()))
            .with_slot(Weekday::Lunes, MealSlot::Postre, Some("  ".to_owned()));

        assert!(menu.day(Weekday::Lunes).postre.is_none());
    }

    #[test]
    fn recipes_follow_slot_order() {
        let slot = DailyMenuSlot {
            principal: Some("Pollo".to_owned()),
            acompanamiento: None,
            postre: Some("Gelatina".to_owned()),
        };

        assert_eq!(slot.recipes().collect::<Vec<_>>(), ["Pollo", "Gelatina"]);
        assert_eq!(slot.get(MealSlot::Acompanamiento), None);
    }

    #[test]
    fn serializes_as_weekday_map() {
        let menu = WeeklyMenu::default().with_slot(
            Weekday::Miercoles,
            MealSlot::Acompanamiento,
            Some("Pure".to_owned()),
        );
        let json = serde_json::to_value(&menu).unwrap();

        assert_eq!(json["miercoles"]["acompañamiento"], "Pure");
        assert!(json["lunes"]["principal"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn deserializes_partial_menus() {
        let menu: WeeklyMenu = serde_json::from_str(
            r#"{"viernes": {"principal": "Pizza"}, "miércoles": {"acompanamiento": "Arroz"}}"#,
        )
        .unwrap();

        assert_eq!(menu.day(Weekday::Viernes).principal.as_deref(), Some("Pizza"));
        assert_eq!(
            menu.day(Weekday::Miercoles).acompanamiento.as_deref(),
            Some("Arroz")
        );
        assert_eq!(menu.day(Weekday::Lunes), &DailyMenuSlot::default());
    }
}
