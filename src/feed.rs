//! Live trade feed simulation.
//!
//! [`TradeFeed`] starts [`Idle`](FeedState::Idle). On [`start`](TradeFeed::start)
//! it seeds five historical trades one minute apart and spawns a task that
//! publishes a new trade every interval (2.5 s by default), keeping only the
//! five most recent, newest first. [`stop`](TradeFeed::stop) or dropping the
//! feed cancels the task.
//!
//! The trade list is published through a [`tokio::sync::watch`] channel; the
//! interval task is its only writer while running.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::models::{Trade, TradeSide};

/// Default delay between live trades.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2500);

/// Maximum number of trades retained.
pub const FEED_CAPACITY: usize = 5;

/// Volume range for the trades seeded on start.
const SEED_VOLUME: RangeInclusive<u32> = 100..=5099;

/// Volume range for trades published by the interval task.
const LIVE_VOLUME: RangeInclusive<u32> = 500..=8499;

/// Probability that a generated trade is a buy.
const BUY_PROBABILITY: f64 = 0.6;

/// Feed lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedState {
    #[default]
    Idle,
    Running,
}

/// Owns the interval task of a running feed. Dropping it cancels the task.
#[derive(Debug)]
pub struct FeedHandle {
    task: JoinHandle<()>,
    halted: Arc<AtomicBool>,
    tx: Arc<watch::Sender<Vec<Trade>>>,
}

impl FeedHandle {
    /// Stops the interval task. No trade is published after this returns.
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        // The task checks the flag under the channel lock before publishing,
        // so raising it under the same lock fences off any in-flight trade.
        self.tx.send_if_modified(|_| {
            self.halted.store(true, Ordering::Release);
            false
        });
        self.task.abort();
    }
}

/// Rolling window of simulated trades.
pub struct TradeFeed {
    interval: Duration,
    rng: StdRng,
    next_id: Arc<AtomicU64>,
    tx: Arc<watch::Sender<Vec<Trade>>>,
    handle: Option<FeedHandle>,
}

impl TradeFeed {
    /// Creates an idle feed with an entropy-seeded random source.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::with_rng(interval, StdRng::from_entropy())
    }

    /// Creates an idle feed drawing from the given random source.
    #[must_use]
    pub fn with_rng(interval: Duration, rng: StdRng) -> Self {
        let (tx, _rx) = watch::channel(Vec::with_capacity(FEED_CAPACITY));
        Self {
            interval,
            rng,
            next_id: Arc::new(AtomicU64::new(1)),
            tx: Arc::new(tx),
            handle: None,
        }
    }

    /// Seeds the window and starts publishing. Does nothing if already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Trade feed already running");
            return;
        }

        let now = Local::now();
        let ids = &self.next_id;
        let rng = &mut self.rng;
        // Oldest first so ids grow with time, then flip to newest first.
        let mut seeds: Vec<Trade> = (0..FEED_CAPACITY as i64)
            .rev()
            .map(|age| {
                let id = ids.fetch_add(1, Ordering::Relaxed);
                make_trade(&mut *rng, id, now - TimeDelta::minutes(age), SEED_VOLUME)
            })
            .collect();
        seeds.reverse();
        self.tx.send_replace(seeds);

        let halted = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_interval(
            self.interval,
            StdRng::seed_from_u64(self.rng.r#gen()),
            Arc::clone(&self.next_id),
            Arc::clone(&self.tx),
            Arc::clone(&halted),
        ));

        self.handle = Some(FeedHandle {
            task,
            halted,
            tx: Arc::clone(&self.tx),
        });
        info!(interval_ms = self.interval.as_millis() as u64, "Trade feed started");
    }

    /// Cancels the interval task. The retained trades are left in place.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            info!("Trade feed stopped");
        }
    }

    /// Snapshot of the retained trades, newest first.
    pub fn current(&self) -> Vec<Trade> {
        self.tx.borrow().clone()
    }

    /// Returns a receiver notified whenever the trade list changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Trade>> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> FeedState {
        if self.is_running() {
            FeedState::Running
        } else {
            FeedState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for TradeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// Publishes one trade per tick until halted.
async fn run_interval(
    period: Duration,
    mut rng: StdRng,
    ids: Arc<AtomicU64>,
    tx: Arc<watch::Sender<Vec<Trade>>>,
    halted: Arc<AtomicBool>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let id = ids.fetch_add(1, Ordering::Relaxed);
        let trade = make_trade(&mut rng, id, Local::now(), LIVE_VOLUME);
        debug!(
            id = trade.id,
            volume = trade.volume,
            side = trade.side.label(),
            "Simulated trade"
        );

        let published = tx.send_if_modified(|trades| {
            if halted.load(Ordering::Acquire) {
                return false;
            }
            push_trade(trades, trade);
            true
        });
        if !published {
            break;
        }
    }
}

/// Draws a trade with the given id, timestamp and volume range.
fn make_trade<R: Rng + ?Sized>(
    rng: &mut R,
    id: u64,
    at: DateTime<Local>,
    volume: RangeInclusive<u32>,
) -> Trade {
    let side = if rng.gen_bool(BUY_PROBABILITY) {
        TradeSide::Buy
    } else {
        TradeSide::Sell
    };

    Trade {
        id,
        at,
        volume: rng.gen_range(volume),
        side,
    }
}

/// Prepends a trade and drops anything past [`FEED_CAPACITY`].
fn push_trade(trades: &mut Vec<Trade>, trade: Trade) {
    trades.insert(0, trade);
    trades.truncate(FEED_CAPACITY);
}
