//! Random-walk share-price generator.
//!
//! Each simulated day multiplies the running price by `1 + (r - 0.45) * v`
//! where `r` is a uniform draw in `[0, 1)` and `v` the volatility. The
//! centre sits below one half, so long walks drift slightly upwards.
//! Points are dated backwards from `today`, one per calendar day.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{PricePoint, Series};

/// Centre of the per-step perturbation.
const WALK_CENTER: f64 = 0.45;

/// Largest accepted volatility. Keeps the step factor at or above 0.55.
pub const MAX_VOLATILITY: f64 = 1.0;

/// Largest accepted series length, about a century of daily points.
pub const MAX_POINTS: usize = 36_500;

/// Decimal places kept on generated prices.
const PRICE_DP: u32 = 2;

/// Validated inputs for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkParams {
    points: usize,
    start_price: f64,
    volatility: f64,
}

impl WalkParams {
    /// Creates walk parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidWalk`](crate::RadarError::InvalidWalk)
    /// if `points` exceeds [`MAX_POINTS`], `start_price` is not a positive
    /// finite number or `volatility` is not within `0.0..=1.0`.
    pub fn new(points: usize, start_price: f64, volatility: f64) -> crate::Result<Self> {
        if points > MAX_POINTS {
            return Err(crate::RadarError::InvalidWalk(format!(
                "points must be at most {MAX_POINTS}, got {points}"
            )));
        }
        if !start_price.is_finite() || start_price <= 0.0 {
            return Err(crate::RadarError::InvalidWalk(format!(
                "start price must be positive, got {start_price}"
            )));
        }
        if !volatility.is_finite() || !(0.0..=MAX_VOLATILITY).contains(&volatility) {
            return Err(crate::RadarError::InvalidWalk(format!(
                "volatility must be within 0..={MAX_VOLATILITY}, got {volatility}"
            )));
        }
        Ok(Self::preset(points, start_price, volatility))
    }

    /// Builds parameters known to be valid at compile time.
    pub(crate) const fn preset(points: usize, start_price: f64, volatility: f64) -> Self {
        Self {
            points,
            start_price,
            volatility,
        }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn start_price(&self) -> f64 {
        self.start_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

/// Generates `params.points()` daily prices ending at `today`.
///
/// The running price is carried unrounded between steps; only the stored
/// value is rounded. Zero points yields an empty series.
pub fn generate<R: Rng + ?Sized>(params: &WalkParams, today: NaiveDate, rng: &mut R) -> Series {
    let mut current = params.start_price;

    let points = (0..params.points)
        .map(|step| {
            let r: f64 = rng.r#gen();
            let delta = (r - WALK_CENTER) * params.volatility;
            current *= 1.0 + delta;

            let days_back = (params.points - 1 - step) as u64;
            PricePoint {
                date: today - Days::new(days_back),
                price: to_price(current),
            }
        })
        .collect();

    Series::new(points)
}

/// Rounds a raw walk value half away from zero to two decimals.
///
/// Rounding sees the exact binary value, so `1.005` (stored just below the
/// midpoint) becomes `1.00`. Values beyond the decimal range saturate at
/// [`Decimal::MAX`].
fn to_price(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(PRICE_DP, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::MAX)
}
