//! Application state for the TUI.

use std::sync::Arc;

use crate::dataset::Dataset;
use crate::models::{PricePoint, Series, Timeframe, Trade};

/// Central application state container.
pub struct App {
    dataset: Arc<Dataset>,
    /// Timeframe whose series is on the chart.
    pub timeframe: Timeframe,
    /// Latest snapshot of the trade feed, newest first.
    pub trades: Vec<Trade>,
    /// Whether the trade feed is publishing.
    pub feed_running: bool,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App showing the week timeframe.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            timeframe: Timeframe::default(),
            trades: Vec::new(),
            feed_running: false,
            should_quit: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the series for the selected timeframe.
    pub fn series(&self) -> &Series {
        self.dataset.series(self.timeframe)
    }

    /// Returns the most recent point of the selected series.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.dataset.latest(self.timeframe)
    }

    pub fn select(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    pub fn next_timeframe(&mut self) {
        self.timeframe = self.timeframe.next();
    }

    pub fn previous_timeframe(&mut self) {
        self.timeframe = self.timeframe.previous();
    }

    /// Replaces the trade snapshot.
    pub fn set_trades(&mut self, trades: Vec<Trade>) {
        self.trades = trades;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TimeframeTable;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let dataset = Dataset::build(
            &TimeframeTable::DEFAULT,
            today,
            &mut StdRng::seed_from_u64(1),
        );
        App::new(Arc::new(dataset))
    }

    #[test]
    fn starts_on_week() {
        let app = app();
        assert_eq!(app.timeframe, Timeframe::Week);
        assert_eq!(app.series().len(), 20);
    }

    #[test]
    fn selecting_switches_series_without_regenerating() {
        let mut app = app();
        let year = app.dataset().series(Timeframe::Year).clone();

        app.select(Timeframe::Year);
        assert_eq!(app.series(), &year);

        app.select(Timeframe::Week);
        app.select(Timeframe::Year);
        assert_eq!(app.series(), &year);
    }

    #[test]
    fn timeframe_cycling_wraps() {
        let mut app = app();
        app.previous_timeframe();
        assert_eq!(app.timeframe, Timeframe::Year);
        app.next_timeframe();
        assert_eq!(app.timeframe, Timeframe::Week);
    }

    #[test]
    fn latest_follows_selection() {
        let mut app = app();
        app.select(Timeframe::Quarter);
        assert_eq!(
            app.latest(),
            app.dataset().series(Timeframe::Quarter).latest()
        );
    }
}
