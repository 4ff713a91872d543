//! Excel workbook export.
//!
//! Four sheets: Parameters, Summary Statistics, Detailed Results and Raw Data.
//! Cells hold numbers wherever the value is finite; Excel has no `NaN` or
//! infinity, so those are written as their display text.

use crate::Report;
use crate::error::Result;
use crate::format::{format_value, parameter_rows};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

const RESULT_HEADERS: [&str; 8] = [
    "Simulation",
    "Final Equity",
    "Total Return (%)",
    "Max Drawdown (%)",
    "Sharpe Ratio",
    "Profit Factor",
    "Volatility (%)",
    "Average Return (%)",
];

fn row(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn col(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

fn write_value(
    sheet: &mut Worksheet,
    r: u32,
    c: u16,
    value: f64,
) -> std::result::Result<(), XlsxError> {
    if value.is_finite() {
        sheet.write_number(r, c, value)?;
    } else {
        sheet.write_string(r, c, format_value(value))?;
    }
    Ok(())
}

fn write_header(
    sheet: &mut Worksheet,
    headers: &[&str],
    bold: &Format,
) -> std::result::Result<(), XlsxError> {
    for (c, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col(c), *header, bold)?;
    }
    Ok(())
}

fn parameters_sheet(report: &Report<'_>, sheet: &mut Worksheet, bold: &Format) -> Result<()> {
    sheet.set_name("Parameters")?;
    write_header(sheet, &["Parameter", "Value"], bold)?;
    for (i, (name, value)) in parameter_rows(report.params).into_iter().enumerate() {
        sheet.write_string(row(i + 1), 0, name)?;
        sheet.write_string(row(i + 1), 1, value)?;
    }
    sheet.set_column_width(0, 24)?;
    Ok(())
}

fn summary_sheet(report: &Report<'_>, sheet: &mut Worksheet, bold: &Format) -> Result<()> {
    sheet.set_name("Summary Statistics")?;
    write_header(sheet, &["Metric", "Average", "Minimum", "Maximum"], bold)?;
    for (i, (label, stats)) in report.batch.report.entries().into_iter().enumerate() {
        let r = row(i + 1);
        sheet.write_string(r, 0, label)?;
        write_value(sheet, r, 1, stats.average)?;
        write_value(sheet, r, 2, stats.minimum)?;
        write_value(sheet, r, 3, stats.maximum)?;
    }
    sheet.set_column_width(0, 20)?;
    Ok(())
}

fn results_sheet(report: &Report<'_>, sheet: &mut Worksheet, bold: &Format) -> Result<()> {
    sheet.set_name("Detailed Results")?;
    write_header(sheet, &RESULT_HEADERS, bold)?;
    let batch = report.batch;
    for (i, (curve, m)) in batch.curves.iter().zip(&batch.metrics).enumerate() {
        let r = row(i + 1);
        sheet.write_number(r, 0, (i + 1) as f64)?;
        let values = [
            curve.final_equity(),
            m.total_return,
            m.max_drawdown,
            m.sharpe_ratio,
            m.profit_factor,
            m.volatility,
            m.average_return,
        ];
        for (c, value) in values.into_iter().enumerate() {
            write_value(sheet, r, col(c + 1), value)?;
        }
    }
    Ok(())
}

fn raw_data_sheet(report: &Report<'_>, sheet: &mut Worksheet, bold: &Format) -> Result<()> {
    sheet.set_name("Raw Data")?;
    let curves = &report.batch.curves;
    sheet.write_string_with_format(0, 0, "Trade Number", bold)?;
    for i in 0..curves.len() {
        sheet.write_string_with_format(0, col(i + 1), format!("Simulation {}", i + 1), bold)?;
    }

    let steps = curves.iter().map(|c| c.len()).max().unwrap_or(0);
    for step in 0..steps {
        let r = row(step + 1);
        sheet.write_number(r, 0, step as f64)?;
        for (i, curve) in curves.iter().enumerate() {
            if let Some(value) = curve.points().get(step) {
                write_value(sheet, r, col(i + 1), *value)?;
            }
        }
    }
    Ok(())
}

/// Builds the workbook and returns the `.xlsx` bytes.
///
/// # Errors
///
/// Returns [`crate::ReportError::Xlsx`] if a sheet exceeds Excel's limits or
/// the workbook cannot be assembled.
pub fn export_xlsx(report: &Report<'_>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    parameters_sheet(report, workbook.add_worksheet(), &bold)?;
    summary_sheet(report, workbook.add_worksheet(), &bold)?;
    results_sheet(report, workbook.add_worksheet(), &bold)?;
    raw_data_sheet(report, workbook.add_worksheet(), &bold)?;

    Ok(workbook.save_to_buffer()?)
}
