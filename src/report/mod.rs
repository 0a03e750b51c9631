// Report module: declarative workbook layout and its renderers.
//
// `layout` decides what goes where (sheets, tables, widths, number formats);
// `xlsx` only knows how to put a `ReportLayout` on disk.

pub mod layout;
pub mod xlsx;

use crate::model::WriteError;

pub use layout::build_report;
pub use xlsx::XlsxReportWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    General,
    /// Dollars with cents, for large amounts.
    Usd,
    /// Dollars keeping sub-cent digits, for unit prices.
    UsdPrecise,
    /// Value is already expressed in percent units.
    Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64, NumberFormat),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

#[derive(Debug, Clone)]
pub struct TableBlock {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub blocks: Vec<TableBlock>,
    /// Blank rows inserted between consecutive blocks.
    pub gap_rows: u32,
}

#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub sheets: Vec<SheetLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacedRow<'a> {
    Title(&'a str),
    Header(&'a [String]),
    Data(&'a [CellValue]),
}

impl SheetLayout {
    /// Resolves every block into absolute zero-based row positions.
    pub fn placed_rows(&self) -> Vec<(u32, PlacedRow<'_>)> {
        let mut placed = Vec::new();
        let mut row = 0u32;

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                row += self.gap_rows;
            }
            if let Some(title) = &block.title {
                placed.push((row, PlacedRow::Title(title.as_str())));
                row += 1;
            }
            placed.push((row, PlacedRow::Header(&block.headers)));
            row += 1;
            for data in &block.rows {
                placed.push((row, PlacedRow::Data(data)));
                row += 1;
            }
        }

        placed
    }
}

/// Destination for a finished report.
pub trait ReportSink {
    fn write_report(&self, report: &ReportLayout) -> Result<(), WriteError>;
}
