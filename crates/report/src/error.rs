use rust_xlsxwriter::XlsxError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("report has {0} columns, more than a worksheet holds")]
    TooManyColumns(usize),

    #[error("report has {0} rows, more than a worksheet holds")]
    TooManyRows(usize),
}
