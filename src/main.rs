mod analyzer;
mod config;
mod fetcher;
mod model;
mod parser;
mod pipeline;
mod report;
mod scheduler;
mod utils;

use config::load_config;
use fetcher::CoinGeckoFetcher;
use pipeline::Pipeline;
use report::XlsxReportWriter;
use scheduler::{IntervalTicker, Scheduler};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration, defaults apply when the file is absent
    let config = match load_config(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher = match CoinGeckoFetcher::new(config.api.clone()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let writer = XlsxReportWriter::new(&config.output_path);
    info!(
        "Tracking top {} assets every {}s into {}",
        config.api.per_page,
        config.refresh_interval_seconds,
        writer.path().display()
    );

    let pipeline = Pipeline::new(fetcher, writer, config.top_n);
    let ticker = IntervalTicker::new(Duration::from_secs(config.refresh_interval_seconds));
    let mut scheduler = Scheduler::new(pipeline, ticker);

    // Ctrl-C flips the shutdown flag; the loop exits between cycles
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current cycle...");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!("Cannot listen for Ctrl-C: {}", e);
                // the scheduler treats a dropped sender as shutdown, so hold it forever
                let _held = shutdown_tx;
                std::future::pending::<()>().await;
            }
        }
    });

    let stats = scheduler.run(shutdown_rx).await;
    info!(
        "Stopped after {} successful and {} failed cycles. Last report: {}",
        stats.succeeded,
        stats.failed,
        scheduler.pipeline().sink().path().display()
    );
}
