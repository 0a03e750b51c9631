// Utility functions
use crate::model::ChangeEntry;
use chrono::{DateTime, Utc};

/// Formats an amount as dollars with two decimals, e.g. `$200.00`.
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// Renders an extreme 24h change as `Name (+1.23%)`, or `n/a` when no asset reported one.
pub fn format_change(entry: Option<&ChangeEntry>) -> String {
    match entry {
        Some(e) => format!("{} ({:+.2}%)", e.name, e.change_pct),
        None => "n/a".to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
