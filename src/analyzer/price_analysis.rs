use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{AnalysisError, AnalysisSummary, Snapshot};
use chrono::Utc;

/// Trait defining the interface for a snapshot analyzer.
pub trait Analyzer {
    fn summarize(&self, snapshot: &Snapshot) -> Result<AnalysisSummary, AnalysisError>;
}

/// Implementation of the snapshot analyzer.
pub struct AnalyzerImpl {
    top_n: usize,
}

impl AnalyzerImpl {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Analyzer for AnalyzerImpl {
    /// Computes every summary metric from this snapshot alone; nothing carries over between cycles.
    fn summarize(&self, snapshot: &Snapshot) -> Result<AnalysisSummary, AnalysisError> {
        if snapshot.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let records = &snapshot.records;
        let average_price = MarketAnalyzer::average_price(records).ok_or(AnalysisError::EmptyInput)?;

        Ok(AnalysisSummary {
            average_price,
            top_by_market_cap: MarketAnalyzer::top_by_market_cap(records, self.top_n),
            max_change: MarketAnalyzer::highest_change(records),
            min_change: MarketAnalyzer::lowest_change(records),
            asset_count: records.len(),
            generated_at: Utc::now(),
        })
    }
}
