//! Help overlay.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme;
use crate::ui::centered_rect;

/// Digit keys reach at most nine pairs.
const MAX_SLOTS: usize = 9;

const KEYS: [(&str, &str); 5] = [
    ("←/→  h/l", "previous / next pair (refreshes)"),
    ("r", "refresh the selected pair"),
    ("?", "toggle this help"),
    ("Esc", "close help, or quit"),
    ("q", "quit"),
];

/// Digit range that selects a pair, e.g. `1-5`; `None` for an empty watchlist.
fn slot_keys(pair_count: usize) -> Option<String> {
    match pair_count.min(MAX_SLOTS) {
        0 => None,
        1 => Some("1".to_string()),
        n => Some(format!("1-{n}")),
    }
}

pub fn render(f: &mut Frame, area: Rect, threshold_pct: f64, pair_count: usize) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help ")
        .title_style(theme::accent_bold());

    let slots = slot_keys(pair_count);
    let rows = KEYS
        .iter()
        .take(1)
        .map(|&(key, action)| (key.to_string(), action))
        .chain(slots.map(|keys| (keys, "jump to a pair (refreshes)")))
        .chain(KEYS.iter().skip(1).map(|&(key, action)| (key.to_string(), action)));

    let mut text = vec![Line::from("")];
    for (key, action) in rows {
        text.push(Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::accent_bold()),
            Span::styled(action, theme::text()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("Setup:", theme::accent_bold())));
    text.push(Line::from(Span::styled(
        "  Bull when the daily close is above the daily EMA.",
        theme::muted(),
    )));
    text.push(Line::from(Span::styled(
        format!("  In range when the 4H close is within {threshold_pct:.2}% of the 4H EMA."),
        theme::muted(),
    )));

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
