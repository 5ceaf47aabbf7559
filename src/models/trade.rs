//! Synthetic trade models.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Display format for trade times, e.g. `"14:05"`.
const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns the uppercase label shown in the order book.
    pub fn label(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

/// A single simulated trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trade {
    /// Monotonic identifier; higher means created later.
    pub id: u64,
    pub at: DateTime<Local>,
    pub volume: u32,
    pub side: TradeSide,
}

impl Trade {
    /// Returns the hour:minute label shown next to the trade.
    pub fn time_label(&self) -> String {
        self.at.format(TIME_LABEL_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_label_is_hours_and_minutes() {
        let at = Local.with_ymd_and_hms(2026, 10, 16, 9, 5, 42).unwrap();
        let trade = Trade {
            id: 1,
            at,
            volume: 1200,
            side: TradeSide::Buy,
        };
        assert_eq!(trade.time_label(), "09:05");
    }

    #[test]
    fn side_labels() {
        assert_eq!(TradeSide::Buy.label(), "BUY");
        assert_eq!(TradeSide::Sell.label(), "SELL");
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TradeSide::Sell).unwrap(), "\"sell\"");
    }
}
