//! Terminal viewer for the share-price chart and live trade feed.
//!
//! Provides a Ratatui-based TUI that renders the selected timeframe's series
//! next to the rolling trade list. It only reads engine state; the single
//! input it feeds back is the timeframe selection (and pausing the feed).

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use crate::dataset::Dataset;
use crate::feed::TradeFeed;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

/// Runs the viewer until the user quits.
///
/// Starts `feed` on entry and stops it on exit.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or restored.
pub async fn run(
    dataset: Arc<Dataset>,
    mut feed: TradeFeed,
    tick_rate: Duration,
) -> crate::Result<()> {
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), tick_rate);
    event::spawn_trade_forwarder(feed.subscribe(), tx);

    let mut app = App::new(dataset);
    feed.start();
    app.feed_running = feed.is_running();
    app.set_trades(feed.current());
    info!("Viewer started");

    let result = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, &app)) {
            break Err(crate::RadarError::Io(format!("failed to draw: {e}")));
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };

        if let Some(Action::ToggleFeed) = event::update(&mut app, message) {
            if feed.is_running() {
                feed.stop();
            } else {
                feed.start();
            }
            app.feed_running = feed.is_running();
        }

        if app.should_quit {
            break Ok(());
        }
    };

    feed.stop();
    restore_terminal(&mut terminal)?;
    info!("Viewer closed");
    result
}
