//! Presentation and export of simulation batches.
//!
//! Every renderer works from the typed values of a finished batch; nothing
//! here recomputes metrics or parses formatted output.
//! - Terminal tables
//! - Standalone HTML with an inline SVG chart
//! - CSV (raw curves, per-simulation metrics)
//! - JSON
//! - Excel workbook and paginated PDF

/// Inline SVG chart.
pub mod chart;
/// CSV exports.
pub mod csv_export;
/// Error types.
pub mod error;
/// Number and parameter formatting.
pub mod format;
/// HTML report.
pub mod html;
/// JSON report.
pub mod json;
/// PDF report.
pub mod pdf;
/// Terminal tables.
pub mod table;
/// Excel workbook.
pub mod xlsx;

use chrono::{DateTime, Utc};
use eqsim_domain::ParameterSet;
use eqsim_simulation::monte_carlo::BatchResult;

pub use error::{ReportError, Result};

/// A finished batch plus the context needed to describe it.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// Parameters the batch ran with.
    pub params: &'a ParameterSet,
    /// Curves, metrics and aggregate statistics.
    pub batch: &'a BatchResult,
    /// Seed, when the run was reproducible.
    pub seed: Option<u64>,
    /// Report timestamp.
    pub generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    /// Creates a report stamped with the current time.
    #[must_use]
    pub fn new(params: &'a ParameterSet, batch: &'a BatchResult) -> Self {
        Self {
            params,
            batch,
            seed: None,
            generated_at: Utc::now(),
        }
    }

    /// Records the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the timestamp.
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Parameters, summary and per-simulation tables for a terminal.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "Simulation Parameters\n{}\nSummary Statistics\n{}\nDetailed Simulation Results\n{}",
            table::render_parameters(self.params),
            table::render_summary(&self.batch.report),
            table::render_results(self.batch)
        )
    }

    /// Standalone HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::export_html(self)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if serialization fails.
    pub fn to_json(&self, include_curves: bool) -> Result<String> {
        json::export_json(self, include_curves)
    }

    /// Raw curve points as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Csv`] if writing fails.
    pub fn curves_csv(&self) -> Result<String> {
        csv_export::export_curves_csv(&self.batch.curves)
    }

    /// Excel workbook with parameter, summary, results and raw data sheets.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the workbook cannot be built.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        xlsx::export_xlsx(self)
    }

    /// Paginated PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Pdf`] if the document cannot be built.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        pdf::export_pdf(self)
    }

    /// Per-simulation metrics as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Csv`] if writing fails.
    pub fn results_csv(&self) -> Result<String> {
        csv_export::export_results_csv(&self.batch.curves, &self.batch.metrics)
    }
}
