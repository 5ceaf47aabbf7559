//! Synthetic market data for an investor-relations share-price chart.
//!
//! Provides a seeded random-walk price generator, a once-built dataset of
//! per-timeframe series, and a timer-driven live trade feed, plus a terminal
//! viewer that renders them.

pub mod config;
pub mod dataset;
pub mod error;
pub mod feed;
pub mod models;
pub mod tui;
pub mod walk;

pub use dataset::{Dataset, TimeframeTable};
pub use error::{RadarError, Result};
pub use feed::{FeedState, TradeFeed};
pub use models::Timeframe;
