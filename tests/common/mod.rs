//! Shared test utilities and constants.

#![allow(dead_code)]

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use radar::{Dataset, TimeframeTable};

/// Fixed "today" so date assertions do not depend on the wall clock.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

/// Builds the default dataset from a seeded random source.
pub fn seeded_dataset(seed: u64) -> Dataset {
    Dataset::build(
        &TimeframeTable::DEFAULT,
        today(),
        &mut StdRng::seed_from_u64(seed),
    )
}
