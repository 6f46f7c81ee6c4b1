use comedor_menu::OrderLine;
use comedor_monthly::{MonthlyLog, MonthlyTotals};
use comedor_recipe::Catalog;
use indexmap::IndexMap;

/// Label written in the `Día` column of the month total row.
pub const MONTH_TOTAL_LABEL: &str = "TOTAL MES";

/// Fixed leading columns of the monthly log sheet.
pub const LOG_COLUMNS: [&str; 8] = [
    "Semana",
    "Día",
    "Fecha",
    "Adultos",
    "Niños",
    "Principal",
    "Acompañamiento",
    "Postre",
];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn optional(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, Cell::text)
    }
}

/// A flat record; each key becomes a column.
pub type Row = IndexMap<String, Cell>;

/// Column headers for `rows`: every key in the order it is first seen.
pub fn columns(rows: &[Row]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    columns
}

pub fn order_rows(lines: &[OrderLine]) -> Vec<Row> {
    lines
        .iter()
        .map(|line| {
            Row::from([
                ("nombre".to_owned(), Cell::text(&line.name)),
                ("unidad".to_owned(), Cell::text(&line.unit)),
                ("cantidad".to_owned(), Cell::Number(line.quantity)),
            ])
        })
        .collect()
}

/// One row per logged day followed by the month total row.
///
/// Every catalog ingredient gets a column on each day row, filled with the
/// hand-entered usage when there is one. The total row adds a column for any
/// total key that no ingredient column already covers.
pub fn monthly_rows(log: &MonthlyLog, catalog: &Catalog, totals: &MonthlyTotals) -> Vec<Row> {
    let ingredients = catalog.ingredient_names();
    let mut rows: Vec<Row> = Vec::with_capacity(26);

    for (week, day, record) in log.iter() {
        let mut row = Row::from([
            ("Semana".to_owned(), Cell::Number((week + 1) as f64)),
            ("Día".to_owned(), Cell::text(day.label())),
            ("Fecha".to_owned(), Cell::text(&record.date)),
            ("Adultos".to_owned(), Cell::Number(f64::from(record.adults))),
            ("Niños".to_owned(), Cell::Number(f64::from(record.children))),
            (
                "Principal".to_owned(),
                Cell::optional(record.principal.as_deref()),
            ),
            (
                "Acompañamiento".to_owned(),
                Cell::optional(record.acompanamiento.as_deref()),
            ),
            ("Postre".to_owned(), Cell::optional(record.postre.as_deref())),
        ]);

        for name in &ingredients {
            let cell = match record.used.get(*name) {
                Some(quantity) if *quantity != 0.0 => Cell::Number(*quantity),
                _ => Cell::Empty,
            };
            row.entry((*name).to_owned()).or_insert(cell);
        }

        rows.push(row);
    }

    let mut total = Row::from([
        ("Semana".to_owned(), Cell::Empty),
        ("Día".to_owned(), Cell::text(MONTH_TOTAL_LABEL)),
    ]);
    for (name, quantity) in totals.iter() {
        total.insert(name.to_owned(), Cell::Number(quantity));
    }
    rows.push(total);

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keys: &[&str]) -> Row {
        keys.iter()
            .map(|key| ((*key).to_owned(), Cell::Empty))
            .collect()
    }

    #[test]
    fn columns_are_first_seen_union() {
        let rows = vec![row(&["a", "b"]), row(&["b", "c"]), row(&["a", "d"])];
        assert_eq!(columns(&rows), ["a", "b", "c", "d"]);
    }

    #[test]
    fn order_rows_use_line_fields() {
        let rows = order_rows(&[OrderLine {
            name: "arroz".to_owned(),
            unit: "kg".to_owned(),
            quantity: 1.2,
        }]);

        assert_eq!(columns(&rows), ["nombre", "unidad", "cantidad"]);
        assert_eq!(rows[0]["cantidad"], Cell::Number(1.2));
    }
}
