//! Price series models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Display format for point dates, e.g. `"16 Oct"`.
const DATE_LABEL_FORMAT: &str = "%-d %b";

/// A closing price for one simulated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// Share price rounded to two decimal places.
    pub price: Decimal,
}

impl PricePoint {
    /// Returns the day/short-month label shown on the chart axis.
    pub fn label(&self) -> String {
        self.date.format(DATE_LABEL_FORMAT).to_string()
    }
}

/// A chronological sequence of [`PricePoint`]s, one per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Wraps already-ordered points.
    #[must_use]
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Oldest point.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Most recent point ("today").
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Percent change from the oldest to the most recent price, to 2 dp.
    ///
    /// Returns `None` for an empty series or a zero opening price.
    pub fn change_pct(&self) -> Option<Decimal> {
        let first = self.first()?.price;
        let last = self.latest()?.price;
        let ratio = (last - first).checked_div(first)?;
        Some((ratio * Decimal::ONE_HUNDRED).round_dp(2))
    }

    /// Lowest and highest price in the series.
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        let first = self.first()?.price;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(p.price), max.max(p.price))),
        )
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(day: u32, price: Decimal) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            price,
        }
    }

    #[test]
    fn label_uses_day_and_short_month() {
        assert_eq!(point(6, dec!(1)).label(), "6 Oct");
        assert_eq!(point(16, dec!(1)).label(), "16 Oct");
    }

    #[test]
    fn change_pct_from_first_to_latest() {
        let series = Series::new(vec![point(1, dec!(2.00)), point(2, dec!(2.50))]);
        assert_eq!(series.change_pct(), Some(dec!(25.00)));
    }

    #[test]
    fn change_pct_negative() {
        let series = Series::new(vec![point(1, dec!(2.00)), point(2, dec!(1.50))]);
        assert_eq!(series.change_pct(), Some(dec!(-25.00)));
    }

    #[test]
    fn price_range_tracks_extremes() {
        let series = Series::new(vec![
            point(1, dec!(2.10)),
            point(2, dec!(1.90)),
            point(3, dec!(2.40)),
            point(4, dec!(2.00)),
        ]);
        assert_eq!(series.price_range(), Some((dec!(1.90), dec!(2.40))));
    }

    #[test]
    fn empty_series_has_no_statistics() {
        let series = Series::default();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
        assert!(series.change_pct().is_none());
        assert!(series.price_range().is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let series = Series::new(vec![point(16, dec!(2.35))]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"[{"date":"2026-10-16","price":"2.35"}]"#);
    }
}
