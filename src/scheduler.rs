use crate::fetcher::MarketFetcher;
use crate::pipeline::Pipeline;
use crate::report::ReportSink;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

/// Source of the pause between cycles.
#[async_trait::async_trait]
pub trait Ticker: Send {
    async fn wait(&mut self);
}

pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn wait(&mut self) {
        sleep(self.period).await;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    pub succeeded: u64,
    pub failed: u64,
}

pub struct Scheduler<F, S, T> {
    pipeline: Pipeline<F, S>,
    ticker: T,
}

impl<F: MarketFetcher, S: ReportSink, T: Ticker> Scheduler<F, S, T> {
    pub fn new(pipeline: Pipeline<F, S>, ticker: T) -> Self {
        Self { pipeline, ticker }
    }

    pub fn pipeline(&self) -> &Pipeline<F, S> {
        &self.pipeline
    }

    /// Runs a cycle immediately, then one per tick, until `shutdown` flips to true
    /// or its sender is dropped. A failed cycle is logged and the loop keeps going.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> SchedulerStats {
        let mut stats = SchedulerStats::default();

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested.");
                break;
            }

            match self.pipeline.run_cycle().await {
                Ok(report) => {
                    stats.succeeded += 1;
                    info!(
                        "Data and analysis updated: {} assets, average price {:.2}",
                        report.asset_count, report.average_price
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!("Cycle aborted: {}", e);
                }
            }

            info!("Waiting for next cycle...");
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    info!("Shutdown requested while waiting.");
                    break;
                }
                _ = self.ticker.wait() => {}
            }
        }

        stats
    }
}
