use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::fetcher::MarketFetcher;
use crate::model::CycleError;
use crate::parser::{MarketParser, Parser};
use crate::report::{build_report, ReportSink};
use crate::utils::format_timestamp;
use chrono::Utc;
use tracing::info;

/// What a successful cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub asset_count: usize,
    pub average_price: f64,
}

/// One fetch → transform → analyze → write pass.
pub struct Pipeline<F, S> {
    fetcher: F,
    parser: MarketParser,
    analyzer: AnalyzerImpl,
    sink: S,
    top_n: usize,
}

impl<F: MarketFetcher, S: ReportSink> Pipeline<F, S> {
    pub fn new(fetcher: F, sink: S, top_n: usize) -> Self {
        Self {
            fetcher,
            parser: MarketParser::new(),
            analyzer: AnalyzerImpl::new(top_n),
            sink,
            top_n,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs every stage in order. The first failing stage aborts the cycle and nothing is written.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        info!("Fetching market data...");
        let raw = self.fetcher.fetch_markets().await?;

        info!("Transforming {} records...", raw.len());
        let snapshot = self.parser.parse(&raw, Utc::now())?;

        info!(
            "Analyzing {} assets fetched at {}...",
            snapshot.len(),
            format_timestamp(&snapshot.fetched_at)
        );
        let summary = self.analyzer.summarize(&snapshot)?;

        info!("Writing report...");
        self.sink.write_report(&build_report(&snapshot, &summary, self.top_n))?;

        Ok(CycleReport {
            asset_count: summary.asset_count,
            average_price: summary.average_price,
        })
    }
}
