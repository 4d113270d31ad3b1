//! Top-level UI layout: header, metrics row, chart, info line, status bar.

pub mod header;
pub mod help;
pub mod metrics;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::panels::CandleChartPanel;
use crate::theme::{self, Theme};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    draw_body(f, chunks[1], app);
    draw_info_line(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    if app.show_help {
        help::render(f, chunks[1], app.config.pullback_threshold_pct, app.watchlist().len());
    }
}

fn draw_body(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = Theme::default();

    if let Some(message) = &app.last_error {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::negative())
            .title(" Refresh failed ")
            .title_style(theme::negative());
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(message.as_str(), theme::negative())),
            Line::from(""),
            Line::from(Span::styled("Press r to try again.", theme::muted())),
        ];
        f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
        return;
    }

    let Some(snapshot) = &app.snapshot else {
        let block = Block::default().borders(Borders::ALL).border_style(theme::muted());
        let text = Line::from(Span::styled(app.connecting_message(), theme::muted()));
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let cards = metrics::cards(
        &snapshot.signal,
        snapshot.daily.params().ema_period,
        snapshot.intraday.params().atr_period,
        &theme,
    );
    f.render_widget(metrics::MetricsRow::new(&cards, &theme), rows[0]);

    let chart = CandleChartPanel::new(&snapshot.intraday, &theme)
        .pullback_marker(snapshot.signal.in_pullback_range);
    f.render_widget(chart, rows[1]);
}

fn draw_info_line(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(format!(" data: {} | ", app.source_label), theme::muted()),
        Span::styled(snapshot.signal.summary_note(), theme::text()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
