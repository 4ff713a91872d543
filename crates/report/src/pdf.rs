//! Paginated PDF report.
//!
//! A4 pages laid out top to bottom: parameters, summary statistics, then the
//! per-simulation table with its header repeated on every page. The curves
//! themselves are charted in the HTML report.

use crate::Report;
use crate::error::Result;
use crate::format::{format_value, parameter_rows};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;
const COLUMN_WIDTH: f32 = 21.0;

const RESULT_HEADERS: [&str; 8] = [
    "Sim",
    "Final Eq.",
    "Return %",
    "Max DD %",
    "Sharpe",
    "Profit F.",
    "Vol. %",
    "Avg Ret. %",
];

// Builtin PDF fonts only cover Latin-1.
fn pdf_value(value: f64) -> String {
    format_value(value).replace('∞', "inf")
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge of the current page.
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN;
        self.pages += 1;
    }

    /// Starts a new page when fewer than `needed` millimetres remain.
    fn reserve(&mut self, needed: f32) -> bool {
        if self.cursor + needed > PAGE_HEIGHT - MARGIN {
            self.new_page();
            return true;
        }
        false
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            text,
            size,
            Mm(MARGIN + x),
            Mm(PAGE_HEIGHT - self.cursor),
            font,
        );
    }

    fn line(&mut self, text: &str, size: f32, indent: f32, bold: bool) {
        self.reserve(LINE_HEIGHT);
        self.text_at(text, size, indent, bold);
        self.cursor += LINE_HEIGHT;
    }

    fn heading(&mut self, text: &str) {
        // keep a heading together with at least one line below it
        self.reserve(3.0 * LINE_HEIGHT);
        self.line(text, 12.0, 0.0, true);
        self.cursor += LINE_HEIGHT / 2.0;
    }

    fn row(&mut self, cells: &[String], bold: bool) {
        for (i, cell) in cells.iter().enumerate() {
            self.text_at(cell, 9.0, i as f32 * COLUMN_WIDTH, bold);
        }
        self.cursor += LINE_HEIGHT;
    }

    fn finish(self) -> Result<(Vec<u8>, usize)> {
        let pages = self.pages;
        Ok((self.doc.save_to_bytes()?, pages))
    }
}

fn render(report: &Report<'_>) -> Result<(Vec<u8>, usize)> {
    let mut pdf = PageWriter::new("Equity Curve Simulation Report")?;

    pdf.line("Equity Curve Simulation Report", 16.0, 0.0, true);
    let mut stamp = format!(
        "Generated {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(seed) = report.seed {
        stamp.push_str(&format!(", seed {seed}"));
    }
    pdf.line(&stamp, 10.0, 0.0, false);
    pdf.cursor += LINE_HEIGHT;

    pdf.heading("Simulation Parameters");
    for (name, value) in parameter_rows(report.params) {
        pdf.line(&format!("{name}: {value}"), 11.0, 0.0, false);
    }
    pdf.cursor += LINE_HEIGHT;

    pdf.heading("Summary Statistics");
    for (label, stats) in report.batch.report.entries() {
        pdf.reserve(4.0 * LINE_HEIGHT);
        pdf.line(label, 11.0, 0.0, true);
        pdf.line(&format!("Avg: {}", pdf_value(stats.average)), 11.0, 10.0, false);
        pdf.line(&format!("Min: {}", pdf_value(stats.minimum)), 11.0, 10.0, false);
        pdf.line(&format!("Max: {}", pdf_value(stats.maximum)), 11.0, 10.0, false);
    }

    pdf.new_page();
    pdf.heading("Detailed Simulation Results");
    let headers: Vec<String> = RESULT_HEADERS.iter().map(|h| (*h).to_string()).collect();
    pdf.row(&headers, true);

    let batch = report.batch;
    for (index, (curve, m)) in batch.curves.iter().zip(&batch.metrics).enumerate() {
        if pdf.reserve(LINE_HEIGHT) {
            pdf.row(&headers, true);
        }
        let cells = [
            (index + 1).to_string(),
            pdf_value(curve.final_equity()),
            pdf_value(m.total_return),
            pdf_value(m.max_drawdown),
            pdf_value(m.sharpe_ratio),
            pdf_value(m.profit_factor),
            pdf_value(m.volatility),
            pdf_value(m.average_return),
        ];
        pdf.row(&cells, false);
    }

    pdf.finish()
}

/// Renders the report as PDF bytes.
///
/// # Errors
///
/// Returns [`crate::ReportError::Pdf`] if the document cannot be assembled.
pub fn export_pdf(report: &Report<'_>) -> Result<Vec<u8>> {
    Ok(render(report)?.0)
}
