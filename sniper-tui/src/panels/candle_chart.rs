//! 4H candle chart with the EMA overlay and the pullback marker.
//!
//! Renders with direct buffer writes:
//! - Each candle = 1 terminal column, newest on the right
//! - Body: block char, green if close >= open, pink otherwise
//! - Wicks: vertical line chars to high/low
//! - EMA: yellow dots in cells not covered by a candle
//! - Pullback marker: `▲` under the last candle when price is in range

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use sniper_core::AnnotatedSeries;

use crate::theme::Theme;

const LABEL_WIDTH: u16 = 11;
const EMA_DOT: &str = "•";
const MARKER: &str = "▲";

pub struct CandleChartPanel<'a> {
    series: &'a AnnotatedSeries,
    show_marker: bool,
    theme: &'a Theme,
}

impl<'a> CandleChartPanel<'a> {
    pub fn new(series: &'a AnnotatedSeries, theme: &'a Theme) -> Self {
        Self {
            series,
            show_marker: false,
            theme,
        }
    }

    /// Mark the latest candle as a pullback entry.
    pub fn pullback_marker(mut self, show: bool) -> Self {
        self.show_marker = show;
        self
    }
}

/// Map a price to a row in the plot area (0 = top).
fn price_to_y(price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
    if (y_max - y_min).abs() < 1e-9 || plot_height == 0 {
        return 0;
    }
    let bottom = plot_height.saturating_sub(1) as f64;
    let frac = (price - y_min) / (y_max - y_min);
    (bottom * (1.0 - frac)).round().clamp(0.0, bottom) as u16
}

impl Widget for CandleChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let params = self.series.params();
        let pair = self.series.pair();
        let timeframe = self.series.timeframe().label();
        let rows: Vec<_> = self.series.rows().collect();

        // Scale covers the visible candles and their EMA values.
        let probe = Block::default().borders(Borders::ALL).inner(area);
        let plot_width = probe.width.saturating_sub(LABEL_WIDTH) as usize;
        let start = rows.len().saturating_sub(plot_width);
        let visible = &rows[start..];

        let (y_min, y_max) = visible.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.bar.low).min(r.ema), hi.max(r.bar.high).max(r.ema))
        });
        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        let mut title = format!(
            " {pair} {timeframe} | {} bars | EMA{} ",
            rows.len(),
            params.ema_period
        );
        if self.show_marker {
            title.push_str("| PULLBACK ");
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        let plot_left = inner.x + LABEL_WIDTH;
        let plot_top = inner.y;
        let plot_height = inner.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 || visible.is_empty() {
            return;
        }

        // Y-axis labels
        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (value, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            buf.set_string(
                inner.x,
                plot_top + y_pos,
                format!("{value:>10.2}"),
                Style::default().fg(self.theme.muted),
            );
        }

        let to_y = |price: f64| plot_top + price_to_y(price, y_lower, y_upper, plot_height);

        for (i, row) in visible.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }
            let bar = row.bar;
            let is_up = bar.is_up();
            let style = Style::default().fg(if is_up {
                self.theme.positive
            } else {
                self.theme.negative
            });

            let high_y = to_y(bar.high);
            let low_y = to_y(bar.low);
            let body_top = to_y(bar.open.max(bar.close));
            let body_bot = to_y(bar.open.min(bar.close));

            for y in high_y..body_top {
                buf.set_string(x, y, "│", style);
            }
            let body = if is_up { "█" } else { "▓" };
            for y in body_top..=body_bot {
                buf.set_string(x, y, body, style);
            }
            for y in (body_bot + 1)..=low_y {
                buf.set_string(x, y, "│", style);
            }

            let ema_y = to_y(row.ema);
            if let Some(cell) = buf.cell_mut((x, ema_y)) {
                if cell.symbol() == " " {
                    cell.set_symbol(EMA_DOT)
                        .set_style(Style::default().fg(self.theme.highlight));
                }
            }
        }

        let info_y = plot_top + plot_height;
        let last_x = plot_left + (visible.len() as u16).saturating_sub(1);
        if self.show_marker && last_x < inner.right() {
            let last = visible[visible.len() - 1].bar;
            let below = to_y(last.low) + 1;
            let marker_style = Style::default()
                .fg(self.theme.highlight)
                .add_modifier(Modifier::BOLD);
            if below < info_y {
                buf.set_string(last_x, below, MARKER, marker_style);
            } else {
                buf.set_string(last_x, info_y, MARKER, marker_style);
            }
        }

        // Legend on the bottom row
        if info_y < inner.bottom() {
            let legend = format!("{EMA_DOT} EMA{}  {MARKER} pullback", params.ema_period);
            buf.set_string(plot_left + 1, info_y, legend, Style::default().fg(self.theme.muted));
        }
    }
}
