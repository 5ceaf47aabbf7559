//! Timeframe selector bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Timeframe;
use crate::tui::app::App;

/// Renders one tab per timeframe, highlighting the selected one.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " Share Price ",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];

    for timeframe in Timeframe::ALL {
        let style = if timeframe == app.timeframe {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", timeframe.label()), style));
    }

    let para = Paragraph::new(Line::from(spans));
    frame.render_widget(para, area);
}
