//! Application configuration loaded from environment variables.
//!
//! All variables are optional:
//! - `RADAR_SEED`: seeds the price series and trade feed for reproducible runs
//! - `RADAR_FEED_INTERVAL_MS`: delay between live trades (default 2500)
//! - `RADAR_TICK_RATE_MS`: UI redraw tick (default 250)
//! - `RADAR_MARKET_CONFIG`: JSON file overriding per-timeframe walk parameters
//! - `RADAR_LOG_FILE`: where the viewer writes logs while it owns the terminal

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::dataset::TimeframeTable;
use crate::feed::DEFAULT_INTERVAL;
use crate::models::Timeframe;
use crate::walk::WalkParams;

/// Default UI tick rate in milliseconds.
const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub feed_interval: Duration,
    pub tick_rate: Duration,
    pub timeframes: TimeframeTable,
    pub log_file: Option<PathBuf>,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`RadarError::Config`](crate::RadarError::Config) if a numeric
/// variable does not parse or an interval is zero, and propagates errors
/// from loading the market configuration file.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let seed = parse_u64("RADAR_SEED")?;

    let feed_interval = millis_var("RADAR_FEED_INTERVAL_MS")?.unwrap_or(DEFAULT_INTERVAL);
    let tick_rate = millis_var("RADAR_TICK_RATE_MS")?
        .unwrap_or(Duration::from_millis(DEFAULT_TICK_RATE_MS));

    let timeframes = match non_empty_var("RADAR_MARKET_CONFIG") {
        Some(path) => MarketConfig::load(Path::new(&path))?.table()?,
        None => TimeframeTable::DEFAULT,
    };

    let log_file = non_empty_var("RADAR_LOG_FILE").map(PathBuf::from);

    Ok(AppConfig {
        seed,
        feed_interval,
        tick_rate,
        timeframes,
        log_file,
    })
}

/// Per-timeframe walk overrides loaded from JSON.
///
/// ```json
/// { "timeframes": { "1W": { "points": 30, "volatility": 0.01 } } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketConfig {
    /// Keyed by timeframe label. Missing timeframes keep the defaults.
    #[serde(default)]
    pub timeframes: HashMap<Timeframe, WalkOverrides>,
}

/// Every field optional; missing fields inherit from the default table.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkOverrides {
    pub points: Option<usize>,
    pub start_price: Option<f64>,
    pub volatility: Option<f64>,
}

impl MarketConfig {
    /// Loads market configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::RadarError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Returns the effective table, merging overrides with the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidWalk`](crate::RadarError::InvalidWalk) if
    /// a merged entry is out of range.
    pub fn table(&self) -> crate::Result<TimeframeTable> {
        let mut table = TimeframeTable::DEFAULT;
        for (&timeframe, overrides) in &self.timeframes {
            let defaults = *TimeframeTable::DEFAULT.get(timeframe);
            let params = WalkParams::new(
                overrides.points.unwrap_or(defaults.points()),
                overrides.start_price.unwrap_or(defaults.start_price()),
                overrides.volatility.unwrap_or(defaults.volatility()),
            )
            .map_err(|e| match e {
                crate::RadarError::InvalidWalk(msg) => {
                    crate::RadarError::InvalidWalk(format!("{timeframe}: {msg}"))
                }
                other => other,
            })?;
            table.set(timeframe, params);
        }
        Ok(table)
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a non-empty environment variable as an unsigned integer.
fn parse_u64(name: &str) -> crate::Result<Option<u64>> {
    non_empty_var(name)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|_| {
                crate::RadarError::Config(format!(
                    "{name} must be an unsigned integer, got {raw:?}"
                ))
            })
        })
        .transpose()
}

/// Parses a positive millisecond duration.
fn millis_var(name: &str) -> crate::Result<Option<Duration>> {
    match parse_u64(name)? {
        Some(0) => Err(crate::RadarError::Config(format!(
            "{name} must be greater than zero"
        ))),
        other => Ok(other.map(Duration::from_millis)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that mutate the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "RADAR_SEED",
        "RADAR_FEED_INTERVAL_MS",
        "RADAR_TICK_RATE_MS",
        "RADAR_MARKET_CONFIG",
        "RADAR_LOG_FILE",
    ];

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Every `RADAR_*` variable not listed in `vars` is cleared for the call.
    ///
    /// # Safety
    ///
    /// Holds [`ENV_LOCK`] for the duration; nothing else in the crate reads
    /// `RADAR_*` variables.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        for k in VARS {
            let value = vars.iter().find(|(name, _)| *name == k).and_then(|(_, v)| *v);
            // SAFETY: ENV_LOCK serializes every writer of these variables.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values while still holding ENV_LOCK.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert!(config.seed.is_none());
            assert_eq!(config.feed_interval, Duration::from_millis(2500));
            assert_eq!(config.tick_rate, Duration::from_millis(DEFAULT_TICK_RATE_MS));
            assert_eq!(config.timeframes, TimeframeTable::DEFAULT);
            assert!(config.log_file.is_none());
        });
    }

    #[test]
    fn loads_values_from_env() {
        with_env(
            &[
                ("RADAR_SEED", Some("42")),
                ("RADAR_FEED_INTERVAL_MS", Some("1000")),
                ("RADAR_TICK_RATE_MS", Some("100")),
                ("RADAR_LOG_FILE", Some("/tmp/radar.log")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.seed, Some(42));
                assert_eq!(config.feed_interval, Duration::from_millis(1000));
                assert_eq!(config.tick_rate, Duration::from_millis(100));
                assert_eq!(config.log_file, Some(PathBuf::from("/tmp/radar.log")));
            },
        );
    }

    #[test]
    fn rejects_non_numeric_seed() {
        with_env(&[("RADAR_SEED", Some("abc"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("RADAR_SEED"));
        });
    }

    #[test]
    fn rejects_zero_interval() {
        with_env(&[("RADAR_FEED_INTERVAL_MS", Some("0"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("RADAR_SEED", Some("")),
                ("RADAR_FEED_INTERVAL_MS", Some("")),
                ("RADAR_MARKET_CONFIG", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert!(config.seed.is_none());
                assert_eq!(config.feed_interval, DEFAULT_INTERVAL);
                assert_eq!(config.timeframes, TimeframeTable::DEFAULT);
            },
        );
    }

    #[test]
    fn market_config_file_is_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "timeframes": {{ "1W": {{ "points": 30 }} }} }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        with_env(&[("RADAR_MARKET_CONFIG", Some(path.as_str()))], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.timeframes.get(Timeframe::Week).points(), 30);
        });
    }

    #[test]
    fn missing_market_config_file_fails() {
        with_env(
            &[("RADAR_MARKET_CONFIG", Some("/nonexistent/radar.json"))],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("failed to read"));
            },
        );
    }

    #[test]
    fn partial_override_inherits_defaults() {
        let json = r#"{ "timeframes": { "QTD": { "volatility": 0.04 } } }"#;
        let config: MarketConfig = serde_json::from_str(json).unwrap();
        let table = config.table().unwrap();

        let quarter = table.get(Timeframe::Quarter);
        assert_eq!(quarter.points(), 90);
        assert_eq!(quarter.start_price(), 1.95);
        assert_eq!(quarter.volatility(), 0.04);
        assert_eq!(table.get(Timeframe::Week), TimeframeTable::DEFAULT.get(Timeframe::Week));
    }

    #[test]
    fn unknown_timeframe_key_is_rejected() {
        let json = r#"{ "timeframes": { "5Y": { "points": 10 } } }"#;
        assert!(serde_json::from_str::<MarketConfig>(json).is_err());
    }

    #[test]
    fn unknown_override_field_is_rejected() {
        let json = r#"{ "timeframes": { "1M": { "drift": 0.1 } } }"#;
        assert!(serde_json::from_str::<MarketConfig>(json).is_err());
    }

    #[test]
    fn out_of_range_override_fails_validation() {
        let json = r#"{ "timeframes": { "YTD": { "start_price": -1.0 } } }"#;
        let config: MarketConfig = serde_json::from_str(json).unwrap();
        let err = config.table().unwrap_err();
        assert!(err.to_string().contains("YTD"));
    }

    #[test]
    fn oversized_points_override_fails_validation() {
        let json = r#"{ "timeframes": { "1W": { "points": 100000000 } } }"#;
        let config: MarketConfig = serde_json::from_str(json).unwrap();
        match config.table() {
            Err(crate::RadarError::InvalidWalk(msg)) => assert!(msg.starts_with("1W"), "{msg}"),
            other => panic!("expected InvalidWalk, got {other:?}"),
        }
    }

    #[test]
    fn missing_timeframes_section_ok() {
        let config: MarketConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.table().unwrap(), TimeframeTable::DEFAULT);
    }
}
