//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::app::App;
use super::components::{status_bar, tab_bar};
use crate::models::{Series, TradeSide};

/// Vertical padding added around a flat series so the line stays visible.
const FLAT_PADDING: f64 = 0.05;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Timeframe tabs
            Constraint::Length(1), // Status bar
            Constraint::Min(10),   // Trades + chart
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_layout[2]);

    render_trades(frame, content[0], app);
    render_chart(frame, content[1], app);

    render_keybindings(frame, main_layout[3]);
}

/// Renders the price line for the selected timeframe.
fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let series = app.series();
    let block = Block::default()
        .title(format!(" Price [{}] ", app.timeframe.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some((low, high)) = series.price_range() else {
        let para = Paragraph::new("No price data")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let data = chart_points(series);
    let (y_min, y_max) = y_bounds(low, high);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let x_labels = match (series.first(), series.latest()) {
        (Some(first), Some(last)) => vec![first.label(), last.label()],
        _ => Vec::new(),
    };
    let y_labels = vec![format!("{y_min:.2}"), format!("{y_max:.2}")];

    let datasets = vec![
        Dataset::default()
            .name(app.timeframe.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Renders the rolling trade list, newest on top.
fn render_trades(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Live Order Book ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!(" {:<6} {:>10}  {:>4}", "Time", "Volume", "Side"),
        Style::default().fg(Color::DarkGray),
    ))];

    for trade in &app.trades {
        let color = match trade.side {
            TradeSide::Buy => Color::Green,
            TradeSide::Sell => Color::Red,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<6}", trade.time_label()),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(format!(" {:>10}", group_thousands(trade.volume))),
            Span::styled(
                format!("  {:>4}", trade.side.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if app.trades.is_empty() {
        lines.push(Line::from(Span::styled(
            " No trades",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[1-4]timeframe [Tab]next [p]pause feed [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Maps a series to `(day index, price)` pairs.
fn chart_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price.to_f64().unwrap_or_default()))
        .collect()
}

/// Chart y-axis bounds, padded when the series is flat.
fn y_bounds(low: Decimal, high: Decimal) -> (f64, f64) {
    let low = low.to_f64().unwrap_or_default();
    let high = high.to_f64().unwrap_or_default();
    if high > low {
        (low, high)
    } else {
        (low - FLAT_PADDING, high + FLAT_PADDING)
    }
}

/// Formats a volume with comma thousands separators.
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
