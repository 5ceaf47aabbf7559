use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use radar::config::{AppConfig, fetch_config};
use radar::models::{Timeframe, Trade};
use radar::{Dataset, RadarError, TradeFeed};

#[tokio::main]
async fn main() -> Result<(), RadarError> {
    let config = fetch_config()?;
    let interactive = std::io::stdout().is_terminal();
    init_tracing(&config, interactive)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let today = Local::now().date_naive();
    let dataset = Arc::new(Dataset::build(&config.timeframes, today, &mut rng));
    let feed = TradeFeed::with_rng(config.feed_interval, StdRng::seed_from_u64(rng.r#gen()));

    if interactive {
        radar::tui::run(dataset, feed, config.tick_rate).await
    } else {
        run_headless(&dataset, feed).await
    }
}

/// Logs to stdout in headless mode; the viewer owns the terminal, so it only
/// logs when `RADAR_LOG_FILE` is set.
fn init_tracing(config: &AppConfig, interactive: bool) -> Result<(), RadarError> {
    if !interactive {
        tracing_subscriber::fmt::init();
        return Ok(());
    }

    if let Some(path) = &config.log_file {
        let file = open_log(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

fn open_log(path: &Path) -> Result<std::fs::File, RadarError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RadarError::Io(format!("failed to open {}: {e}", path.display())))
}

/// Prints the latest price per timeframe, then logs trades until Ctrl-C.
async fn run_headless(dataset: &Dataset, mut feed: TradeFeed) -> Result<(), RadarError> {
    for timeframe in Timeframe::ALL {
        let series = dataset.series(timeframe);
        if let Some(latest) = series.latest() {
            info!(
                timeframe = %timeframe,
                date = %latest.label(),
                price = %latest.price,
                change_pct = ?series.change_pct(),
                "Latest share price"
            );
        }
    }

    let mut trades = feed.subscribe();
    feed.start();
    for trade in trades.borrow_and_update().iter().rev() {
        log_trade(trade);
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = trades.changed() => {
                if changed.is_err() {
                    break;
                }
                let newest = trades.borrow_and_update().first().cloned();
                if let Some(trade) = newest {
                    log_trade(&trade);
                }
            }
        }
    }

    feed.stop();
    Ok(())
}

fn log_trade(trade: &Trade) {
    info!(
        id = trade.id,
        time = %trade.time_label(),
        volume = trade.volume,
        side = trade.side.label(),
        "Trade"
    );
}
