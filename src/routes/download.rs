use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use comedor_report::Report;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Spreadsheet bytes served as a download under the report's fixed filename.
pub fn xlsx(report: Report, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", report.file_name());

    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
