use crate::model::{AnalysisSummary, AssetRecord, Snapshot};
use crate::report::{CellValue, NumberFormat, ReportLayout, SheetLayout, TableBlock};
use crate::utils::{format_change, format_timestamp, format_usd};

pub const DATA_SHEET: &str = "Cryptocurrency Data";
pub const ANALYSIS_SHEET: &str = "Analysis Results";

const DATA_HEADERS: [&str; 6] = [
    "Name",
    "Symbol",
    "Price (USD)",
    "Market Cap",
    "24h Volume",
    "24h Price Change (%)",
];

pub fn top_table_title(top_n: usize) -> String {
    format!("Top {} Cryptocurrencies by Market Cap", top_n)
}

/// Lays out the full table and the analysis summary as a two-sheet report.
pub fn build_report(snapshot: &Snapshot, summary: &AnalysisSummary, top_n: usize) -> ReportLayout {
    ReportLayout {
        sheets: vec![data_sheet(snapshot), analysis_sheet(summary, top_n)],
    }
}

fn data_sheet(snapshot: &Snapshot) -> SheetLayout {
    SheetLayout {
        name: DATA_SHEET.to_string(),
        column_widths: vec![28.0, 10.0, 18.0, 24.0, 24.0, 22.0],
        blocks: vec![TableBlock {
            title: None,
            headers: DATA_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: snapshot.records.iter().map(asset_row).collect(),
        }],
        gap_rows: 0,
    }
}

fn asset_row(record: &AssetRecord) -> Vec<CellValue> {
    vec![
        CellValue::text(&record.name),
        CellValue::text(&record.symbol),
        CellValue::Number(record.price_usd, NumberFormat::UsdPrecise),
        CellValue::Number(record.market_cap_usd, NumberFormat::Usd),
        CellValue::Number(record.volume_24h_usd, NumberFormat::Usd),
        match record.price_change_24h_pct {
            Some(pct) => CellValue::Number(pct, NumberFormat::Percent),
            None => CellValue::Empty,
        },
    ]
}

fn analysis_sheet(summary: &AnalysisSummary, top_n: usize) -> SheetLayout {
    let metrics = vec![
        metric(
            format!("Average Price of Top {} Cryptocurrencies", summary.asset_count),
            CellValue::text(format_usd(summary.average_price)),
        ),
        metric(
            "Highest 24h Price Change".to_string(),
            CellValue::text(format_change(summary.max_change.as_ref())),
        ),
        metric(
            "Lowest 24h Price Change".to_string(),
            CellValue::text(format_change(summary.min_change.as_ref())),
        ),
        metric(
            "Assets Tracked".to_string(),
            CellValue::Number(summary.asset_count as f64, NumberFormat::General),
        ),
        metric(
            "Last Updated (UTC)".to_string(),
            CellValue::text(format_timestamp(&summary.generated_at)),
        ),
    ];

    let top_rows = summary
        .top_by_market_cap
        .iter()
        .map(|e| vec![CellValue::text(&e.name), CellValue::Number(e.market_cap_usd, NumberFormat::Usd)])
        .collect();

    SheetLayout {
        name: ANALYSIS_SHEET.to_string(),
        column_widths: vec![40.0, 60.0],
        blocks: vec![
            TableBlock {
                title: None,
                headers: vec!["Metric".into(), "Value".into()],
                rows: metrics,
            },
            TableBlock {
                title: Some(top_table_title(top_n)),
                headers: vec!["Name".into(), "Market Cap".into()],
                rows: top_rows,
            },
        ],
        gap_rows: 1,
    }
}

fn metric(label: String, value: CellValue) -> Vec<CellValue> {
    vec![CellValue::Text(label), value]
}
