//! Shared models for the investor chart.
//!
//! Contains the timeframe selector, price series types and the synthetic
//! trades published by the live feed.

pub mod price;
pub mod trade;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use price::{PricePoint, Series};
pub use trade::{Trade, TradeSide};

/// Display horizons for the share-price chart.
///
/// Labels are stable: they double as lookup keys and as the serialized form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1W")]
    Week,
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "QTD")]
    Quarter,
    #[serde(rename = "YTD")]
    Year,
}

impl Timeframe {
    /// Every timeframe in display order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Quarter,
        Timeframe::Year,
    ];

    /// Returns the display label, also used as the lookup key.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "1W",
            Timeframe::Month => "1M",
            Timeframe::Quarter => "QTD",
            Timeframe::Year => "YTD",
        }
    }

    /// Position of this timeframe in [`Timeframe::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Timeframe::Week => 0,
            Timeframe::Month => 1,
            Timeframe::Quarter => 2,
            Timeframe::Year => 3,
        }
    }

    /// Returns the next timeframe, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns the previous timeframe, wrapping around.
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = crate::RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.label() == s)
            .ok_or_else(|| crate::RadarError::UnknownTimeframe(s.to_string()))
    }
}
