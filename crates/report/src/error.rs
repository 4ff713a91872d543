use thiserror::Error;

/// Result type alias for report generation.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while serializing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Building the Excel workbook failed.
    #[error("Excel export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Building the PDF document failed.
    #[error("PDF export failed: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Flushing a buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer produced bytes that are not UTF-8.
    #[error("report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
