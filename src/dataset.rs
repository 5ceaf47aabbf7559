//! Per-timeframe price series, computed once.
//!
//! A [`Dataset`] is built explicitly at startup and shared with consumers
//! (typically behind an `Arc`). Switching timeframes only selects one of the
//! precomputed series; nothing is regenerated.

use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::models::{PricePoint, Series, Timeframe};
use crate::walk::{WalkParams, generate};

/// Walk parameters for each [`Timeframe`], indexed by [`Timeframe::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeTable {
    params: [WalkParams; 4],
}

impl TimeframeTable {
    /// The stock chart presets: points, start price, volatility.
    pub const DEFAULT: TimeframeTable = TimeframeTable {
        params: [
            WalkParams::preset(20, 2.35, 0.015),
            WalkParams::preset(40, 2.20, 0.02),
            WalkParams::preset(90, 1.95, 0.03),
            WalkParams::preset(120, 1.60, 0.05),
        ],
    };

    pub fn get(&self, timeframe: Timeframe) -> &WalkParams {
        &self.params[timeframe.index()]
    }

    pub fn set(&mut self, timeframe: Timeframe, params: WalkParams) {
        self.params[timeframe.index()] = params;
    }
}

impl Default for TimeframeTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read-only cache of one [`Series`] per [`Timeframe`].
#[derive(Debug, Clone)]
pub struct Dataset {
    series: [Series; 4],
    generated_on: NaiveDate,
}

impl Dataset {
    /// Generates every timeframe's series, ending at `today`.
    pub fn build<R: Rng + ?Sized>(table: &TimeframeTable, today: NaiveDate, rng: &mut R) -> Self {
        let series = Timeframe::ALL.map(|timeframe| {
            let series = generate(table.get(timeframe), today, &mut *rng);
            info!(
                timeframe = %timeframe,
                points = series.len(),
                latest = ?series.latest().map(|p| p.price),
                "Generated price series"
            );
            series
        });

        Self {
            series,
            generated_on: today,
        }
    }

    /// Returns the precomputed series for a timeframe.
    pub fn series(&self, timeframe: Timeframe) -> &Series {
        &self.series[timeframe.index()]
    }

    /// Returns the most recent point of a timeframe's series.
    ///
    /// `None` only when the configured point count is zero.
    pub fn latest(&self, timeframe: Timeframe) -> Option<&PricePoint> {
        self.series(timeframe).latest()
    }

    /// Looks up a series by its display label (`"1W"`, `"1M"`, `"QTD"`, `"YTD"`).
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::UnknownTimeframe`](crate::RadarError::UnknownTimeframe)
    /// for any other label.
    pub fn series_by_label(&self, label: &str) -> crate::Result<&Series> {
        let timeframe: Timeframe = label.parse()?;
        Ok(self.series(timeframe))
    }

    /// The "today" the series were generated against.
    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }
}
