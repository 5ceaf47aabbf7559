//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use rust_decimal::Decimal;

use crate::tui::app::App;

/// Renders the latest price, its change over the timeframe and the feed state.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let series = app.series();

    let price_span = match app.latest() {
        Some(point) => Span::styled(
            format!(" {:.2} ", point.price),
            Style::default().fg(Color::White),
        ),
        None => Span::styled(" -- ", Style::default().fg(Color::DarkGray)),
    };

    let change_span = match series.change_pct() {
        Some(pct) => {
            let color = if pct >= Decimal::ZERO {
                Color::Green
            } else {
                Color::Red
            };
            Span::styled(format!(" {pct:+.2}% "), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let feed_span = if app.feed_running {
        Span::styled(" LIVE ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" PAUSED ", Style::default().fg(Color::Black).bg(Color::Yellow))
    };

    let as_of = format!(
        " {} points to {} ",
        series.len(),
        app.dataset().generated_on().format("%-d %b %Y")
    );

    let line = Line::from(vec![
        feed_span,
        Span::raw("│"),
        price_span,
        Span::raw("│"),
        change_span,
        Span::raw("│"),
        Span::styled(as_of, Style::default().fg(Color::Gray)),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
