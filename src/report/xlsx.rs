use crate::model::WriteError;
use crate::report::{CellValue, NumberFormat, PlacedRow, ReportLayout, ReportSink, SheetLayout};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

struct Formats {
    title: Format,
    header: Format,
    cell: Format,
    usd: Format,
    usd_precise: Format,
    percent: Format,
}

impl Formats {
    fn new() -> Self {
        let base = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter);
        let bold = base.clone().set_bold().set_font_size(12);
        let bordered = base.set_border(FormatBorder::Thin);

        Self {
            title: bold.clone(),
            header: bold.set_border(FormatBorder::Thin),
            cell: bordered.clone(),
            usd: bordered.clone().set_num_format("$#,##0.00"),
            usd_precise: bordered.clone().set_num_format("$#,##0.00######"),
            percent: bordered.set_num_format("0.00\"%\""),
        }
    }

    fn for_number(&self, number_format: NumberFormat) -> &Format {
        match number_format {
            NumberFormat::General => &self.cell,
            NumberFormat::Usd => &self.usd,
            NumberFormat::UsdPrecise => &self.usd_precise,
            NumberFormat::Percent => &self.percent,
        }
    }
}

/// Renders a `ReportLayout` into an `.xlsx` file, replacing the previous file.
pub struct XlsxReportWriter {
    path: PathBuf,
}

impl XlsxReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.xlsx".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }

    fn render(report: &ReportLayout) -> Result<Workbook, XlsxError> {
        let formats = Formats::new();
        let mut workbook = Workbook::new();

        for sheet in &report.sheets {
            let worksheet = workbook.add_worksheet();
            render_sheet(worksheet, sheet, &formats)?;
        }

        Ok(workbook)
    }
}

impl ReportSink for XlsxReportWriter {
    fn write_report(&self, report: &ReportLayout) -> Result<(), WriteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut workbook = Self::render(report)?;
        let temp = self.temp_path();
        if let Err(e) = workbook.save(&temp) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        info!("Report saved to {}", self.path.display());
        Ok(())
    }
}

fn render_sheet(worksheet: &mut Worksheet, sheet: &SheetLayout, formats: &Formats) -> Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (row, placed) in sheet.placed_rows() {
        match placed {
            PlacedRow::Title(title) => {
                worksheet.write_string_with_format(row, 0, title, &formats.title)?;
            }
            PlacedRow::Header(headers) => {
                for (col, header) in headers.iter().enumerate() {
                    worksheet.write_string_with_format(row, col as u16, header, &formats.header)?;
                }
            }
            PlacedRow::Data(cells) => {
                for (col, cell) in cells.iter().enumerate() {
                    write_cell(worksheet, row, col as u16, cell, formats)?;
                }
            }
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    formats: &Formats,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, text, &formats.cell)?;
        }
        CellValue::Number(value, number_format) if value.is_finite() => {
            worksheet.write_number_with_format(row, col, *value, formats.for_number(*number_format))?;
        }
        // Excel has no representation for NaN or infinities.
        CellValue::Number(..) | CellValue::Empty => {
            worksheet.write_blank(row, col, &formats.cell)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, AnalyzerImpl};
    use crate::model::{AssetRecord, Snapshot};
    use crate::report::build_report;
    use crate::report::layout::{top_table_title, ANALYSIS_SHEET, DATA_SHEET};
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use chrono::Utc;

    fn temp_xlsx() -> PathBuf {
        std::env::temp_dir()
            .join(format!("crypto-tracker-{}", rand::random::<u64>()))
            .join("crypto_data.xlsx")
    }

    fn snapshot(n: usize) -> Snapshot {
        let records = (0..n)
            .map(|i| AssetRecord {
                name: format!("Coin {i}"),
                symbol: format!("c{i}"),
                price_usd: 10.0 * (i + 1) as f64,
                // deliberately shuffled so the top table differs from input order
                market_cap_usd: ((i * 7) % n) as f64 * 1000.0,
                volume_24h_usd: 500.0,
                price_change_24h_pct: if i == 1 { None } else { Some(i as f64 - 2.5) },
            })
            .collect();
        Snapshot::new(records, Utc::now())
    }

    fn column_strings(rows: &calamine::Range<Data>) -> Vec<String> {
        rows.rows().map(|r| r.first().map(|c| c.to_string()).unwrap_or_default()).collect()
    }

    #[test]
    fn round_trip_keeps_record_count_and_top_order() {
        let snap = snapshot(8);
        let summary = AnalyzerImpl::new(5).summarize(&snap).unwrap();
        let path = temp_xlsx();

        let writer = XlsxReportWriter::new(&path);
        writer.write_report(&build_report(&snap, &summary, 5)).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![DATA_SHEET.to_string(), ANALYSIS_SHEET.to_string()]);

        let data = workbook.worksheet_range(DATA_SHEET).unwrap();
        assert_eq!(data.height(), 1 + snap.len());
        assert_eq!(data.get((0, 0)), Some(&Data::String("Name".into())));
        assert_eq!(data.get((2, 0)), Some(&Data::String("Coin 1".into())));

        let analysis = workbook.worksheet_range(ANALYSIS_SHEET).unwrap();
        let first_column = column_strings(&analysis);
        let title_row = first_column
            .iter()
            .position(|c| *c == top_table_title(5))
            .unwrap();
        let written: Vec<&str> = first_column[title_row + 2..title_row + 7]
            .iter()
            .map(String::as_str)
            .collect();
        let expected: Vec<&str> = summary.top_by_market_cap.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(written, expected);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn overwrites_previous_file_and_leaves_no_temp() {
        let path = temp_xlsx();
        let writer = XlsxReportWriter::new(&path);

        for n in [6, 3] {
            let snap = snapshot(n);
            let summary = AnalyzerImpl::new(5).summarize(&snap).unwrap();
            writer.write_report(&build_report(&snap, &summary, 5)).unwrap();
        }

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.worksheet_range(DATA_SHEET).unwrap().height(), 4);
        assert!(!writer.temp_path().exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let blocker = std::env::temp_dir().join(format!("crypto-tracker-file-{}", rand::random::<u64>()));
        fs::write(&blocker, b"not a directory").unwrap();

        // parent "directory" is a regular file
        let writer = XlsxReportWriter::new(blocker.join("crypto_data.xlsx"));
        let snap = snapshot(2);
        let summary = AnalyzerImpl::new(5).summarize(&snap).unwrap();

        let err = writer.write_report(&build_report(&snap, &summary, 5)).unwrap_err();
        assert!(matches!(err, WriteError::Io(_)));

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn failed_save_keeps_previous_report() {
        let path = temp_xlsx();
        let writer = XlsxReportWriter::new(&path);
        let snap = snapshot(4);
        let summary = AnalyzerImpl::new(5).summarize(&snap).unwrap();
        let report = build_report(&snap, &summary, 5);

        writer.write_report(&report).unwrap();
        let before = fs::read(&path).unwrap();

        // a directory where the temporary workbook should go makes the save fail
        fs::create_dir(writer.temp_path()).unwrap();
        let err = writer.write_report(&report).unwrap_err();
        assert!(matches!(err, WriteError::Xlsx(_)));
        assert_eq!(fs::read(&path).unwrap(), before);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let path = temp_xlsx();
        // a non-empty directory cannot be replaced by the finished workbook
        fs::create_dir_all(path.join("occupied")).unwrap();
        let writer = XlsxReportWriter::new(&path);
        let snap = snapshot(2);
        let summary = AnalyzerImpl::new(5).summarize(&snap).unwrap();

        let err = writer.write_report(&build_report(&snap, &summary, 5)).unwrap_err();
        assert!(matches!(err, WriteError::Io(_)));
        assert!(!writer.temp_path().exists());
        assert!(path.is_dir());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
