//! Metrics row: price, daily trend, 4H pullback distance, ATR.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use sniper_core::Signal;

use crate::theme::Theme;

/// One bordered card: title, big value, short detail line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub detail: String,
    pub value_color: Color,
    pub detail_color: Color,
}

impl MetricCard {
    fn render_with(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(Style::default().bg(theme.background));
        let lines = vec![
            Line::styled(
                self.value.clone(),
                Style::default()
                    .fg(self.value_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(self.detail.clone(), Style::default().fg(self.detail_color)),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// ATR value, or an em-dash while the window is still filling.
pub fn format_atr(atr: Option<f64>) -> String {
    atr.map(|v| format!("{v:.2}")).unwrap_or_else(|| "—".to_string())
}

pub fn cards(signal: &Signal, daily_ema_period: usize, atr_period: usize, theme: &Theme) -> [MetricCard; 4] {
    let trend_color = theme.trend_color(signal.trend_is_bullish);
    let pullback_color = theme.pullback_color(signal.in_pullback_range);
    [
        MetricCard {
            title: "Price".into(),
            value: format_price(signal.current_price),
            detail: "last 4H close".into(),
            value_color: theme.text_primary,
            detail_color: theme.text_secondary,
        },
        MetricCard {
            title: "Daily Trend".into(),
            value: signal.trend_label().into(),
            detail: format!(
                "{} EMA{daily_ema_period}",
                if signal.trend_is_bullish { "above" } else { "below" }
            ),
            value_color: trend_color,
            detail_color: trend_color,
        },
        MetricCard {
            title: "4H Pullback".into(),
            value: format!("{:.2}% from EMA", signal.distance_pct),
            detail: signal.pullback_label().into(),
            value_color: theme.text_primary,
            detail_color: pullback_color,
        },
        MetricCard {
            title: "ATR (volatility)".into(),
            value: format_atr(signal.atr),
            detail: format!("{atr_period}-bar 4H"),
            value_color: theme.text_primary,
            detail_color: theme.text_secondary,
        },
    ]
}

/// Four equal-width cards side by side.
pub struct MetricsRow<'a> {
    cards: &'a [MetricCard],
    theme: &'a Theme,
}

impl<'a> MetricsRow<'a> {
    pub fn new(cards: &'a [MetricCard], theme: &'a Theme) -> Self {
        Self { cards, theme }
    }
}

impl Widget for MetricsRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            return;
        }
        let n = self.cards.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, n); self.cards.len()])
            .split(area);
        for (card, column) in self.cards.iter().zip(columns.iter()) {
            card.render_with(*column, buf, self.theme);
        }
    }
}
