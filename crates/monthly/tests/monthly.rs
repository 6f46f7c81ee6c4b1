use std::sync::Arc;

use comedor_monthly::{LogField, MonthlyLog, compute_monthly_totals};
use comedor_recipe::{Catalog, Ingredient, Recipe, RecipeType};
use comedor_shared::{MealSlot, Weekday};

fn leche_catalog() -> Catalog {
    Catalog::new(vec![Recipe::new(
        "Leche chocolatada",
        RecipeType::Principal,
        vec![Ingredient::new("Leche", "l", 0.2)],
    )])
}

fn principal(name: &str) -> LogField {
    LogField::Recipe(MealSlot::Principal, Some(name.to_owned()))
}

#[test]
fn test_day_adds_recipe_usage_and_manual_usage() {
    let log = MonthlyLog::empty()
        .with_field(0, Weekday::Lunes, &LogField::Adults(10))
        .with_field(0, Weekday::Lunes, &LogField::Children(0))
        .with_field(0, Weekday::Lunes, &principal("Leche chocolatada"))
        .with_usage(0, Weekday::Lunes, "leche", "5");

    let totals = compute_monthly_totals(&log, &leche_catalog());

    assert_eq!(totals.get("leche"), Some(7.0));
    assert_eq!(totals.len(), 1);
}

#[test]
fn test_children_count_as_diners() {
    let log = MonthlyLog::empty()
        .with_field(3, Weekday::Viernes, &LogField::Adults(2))
        .with_field(3, Weekday::Viernes, &LogField::Children(8))
        .with_field(3, Weekday::Viernes, &principal("Leche chocolatada"));

    let totals = compute_monthly_totals(&log, &leche_catalog());

    assert_eq!(totals.get("leche"), Some(2.0));
}

#[test]
fn test_manual_usage_without_recipe_is_counted() {
    let log = MonthlyLog::empty()
        .with_usage(4, Weekday::Martes, "Pan", "40")
        .with_usage(1, Weekday::Lunes, "pan ", "10");

    let totals = compute_monthly_totals(&log, &Catalog::default());

    assert_eq!(totals.get("pan"), Some(50.0));
}

#[test]
fn test_adding_records_never_decreases_totals() {
    let catalog = leche_catalog();
    let mut log = MonthlyLog::empty()
        .with_field(0, Weekday::Lunes, &LogField::Adults(5))
        .with_field(0, Weekday::Lunes, &principal("Leche chocolatada"));
    let mut previous = compute_monthly_totals(&log, &catalog);

    let edits = [
        (1, Weekday::Martes, LogField::Adults(12)),
        (1, Weekday::Martes, principal("Leche chocolatada")),
        (2, Weekday::Jueves, LogField::Children(7)),
        (2, Weekday::Jueves, principal("Leche chocolatada")),
    ];

    for (week, day, field) in edits {
        log = log.with_field(week, day, &field);
        let next = compute_monthly_totals(&log, &catalog);
        for (name, total) in previous.iter() {
            assert!(next.get(name).unwrap_or_default() >= total, "{name} decreased");
        }
        previous = next;
    }

    log = log.with_usage(4, Weekday::Viernes, "azucar", "3");
    let next = compute_monthly_totals(&log, &catalog);
    assert!(next.get("leche") >= previous.get("leche"));
    assert_eq!(next.get("azucar"), Some(3.0));
}

#[test]
fn test_recomputing_is_idempotent() {
    let log = MonthlyLog::empty()
        .with_field(2, Weekday::Miercoles, &LogField::Adults(25))
        .with_field(2, Weekday::Miercoles, &principal("Leche chocolatada"))
        .with_usage(2, Weekday::Miercoles, "Cacao", "0,3");
    let catalog = leche_catalog();

    assert_eq!(
        compute_monthly_totals(&log, &catalog),
        compute_monthly_totals(&log, &catalog)
    );
}

#[test]
fn test_edit_shares_untouched_weeks_and_days() {
    let log = MonthlyLog::empty();
    let next = log.with_field(1, Weekday::Jueves, &LogField::Date("2025-04-10".to_owned()));

    for week in [0, 2, 3, 4] {
        assert!(Arc::ptr_eq(log.week(week).unwrap(), next.week(week).unwrap()));
    }
    assert!(!Arc::ptr_eq(log.week(1).unwrap(), next.week(1).unwrap()));

    for day in Weekday::all().iter().filter(|d| **d != Weekday::Jueves) {
        assert!(Arc::ptr_eq(
            log.day(1, *day).unwrap(),
            next.day(1, *day).unwrap()
        ));
    }
    assert_eq!(next.day(1, Weekday::Jueves).unwrap().date, "2025-04-10");
    assert!(log.day(1, Weekday::Jueves).unwrap().date.is_empty());
}

#[test]
fn test_out_of_range_week_leaves_log_unchanged() {
    let log = MonthlyLog::empty().with_field(0, Weekday::Lunes, &LogField::Adults(3));

    let same = log
        .with_field(5, Weekday::Lunes, &LogField::Adults(99))
        .with_usage(12, Weekday::Viernes, "Pan", "4");

    assert_eq!(same, log);
    for week in 0..5 {
        assert!(Arc::ptr_eq(log.week(week).unwrap(), same.week(week).unwrap()));
    }
}

#[test]
fn test_unparseable_counts_read_as_zero() {
    let log = MonthlyLog::empty()
        .with_field(0, Weekday::Lunes, &LogField::parse("adultos", "muchos").unwrap())
        .with_field(0, Weekday::Lunes, &principal("Leche chocolatada"))
        .with_usage(0, Weekday::Lunes, "Leche", "-4");

    let totals = compute_monthly_totals(&log, &leche_catalog());

    assert_eq!(totals.get("leche"), Some(0.0));
}
