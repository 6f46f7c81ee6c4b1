use std::path::Path;

use comedor_menu::OrderLine;
use comedor_monthly::{MonthlyLog, MonthlyTotals};
use comedor_recipe::Catalog;
use rust_xlsxwriter::{Format, FormatBorder, Workbook};

use crate::{Cell, ReportError, Row, columns, monthly_rows, order_rows};

/// The two spreadsheets the dining room hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    Order,
    MonthlyLog,
}

impl Report {
    pub fn sheet_name(self) -> &'static str {
        match self {
            Report::Order => "Pedido",
            Report::MonthlyLog => "Registro Mensual",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Report::Order => "pedido_comedor.xlsx",
            Report::MonthlyLog => "registro_mensual_comedor.xlsx",
        }
    }
}

pub fn order_workbook(lines: &[OrderLine]) -> Result<Workbook, ReportError> {
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, Report::Order, &order_rows(lines))?;
    Ok(workbook)
}

pub fn monthly_workbook(
    log: &MonthlyLog,
    catalog: &Catalog,
    totals: &MonthlyTotals,
) -> Result<Workbook, ReportError> {
    let mut workbook = Workbook::new();
    let rows = monthly_rows(log, catalog, totals);
    write_sheet(&mut workbook, Report::MonthlyLog, &rows)?;
    Ok(workbook)
}

/// Serialize a workbook for download.
pub fn to_buffer(mut workbook: Workbook) -> Result<Vec<u8>, ReportError> {
    Ok(workbook.save_to_buffer()?)
}

pub fn save(mut workbook: Workbook, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    workbook.save(path)?;
    tracing::info!(path = %path.display(), "Report written");
    Ok(())
}

/// Write `rows` as one sheet: a bold header of every key, then one line per row.
fn write_sheet(workbook: &mut Workbook, report: Report, rows: &[Row]) -> Result<(), ReportError> {
    let header = Format::new().set_bold().set_border(FormatBorder::Thin);
    let columns = columns(rows);

    let sheet = workbook.add_worksheet();
    sheet.set_name(report.sheet_name())?;

    for (col, name) in columns.iter().enumerate() {
        let col = column_index(col, columns.len())?;
        sheet.write_with_format(0, col, *name, &header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let line = u32::try_from(index + 1).map_err(|_| ReportError::TooManyRows(rows.len()))?;

        for (col, name) in columns.iter().enumerate() {
            let col = column_index(col, columns.len())?;
            match row.get(*name) {
                Some(Cell::Text(text)) => {
                    sheet.write(line, col, text.as_str())?;
                }
                Some(Cell::Number(number)) => {
                    sheet.write(line, col, *number)?;
                }
                Some(Cell::Empty) | None => {}
            }
        }
    }

    Ok(())
}

fn column_index(col: usize, total: usize) -> Result<u16, ReportError> {
    u16::try_from(col).map_err(|_| ReportError::TooManyColumns(total))
}
