//! Top bar: app title, watchlist selector, data source.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Pullback Sniper ")
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let source = format!("source: {} ", app.source_label);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(source.len() as u16)])
        .split(inner);

    let titles: Vec<Line> = app
        .watchlist()
        .iter()
        .enumerate()
        .map(|(i, pair)| Line::from(format!("{} {pair}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.selected)
        .style(theme::text_secondary())
        .highlight_style(theme::accent_bold())
        .divider(Span::styled("|", theme::muted()));
    f.render_widget(tabs, chunks[0]);

    let label = Paragraph::new(Line::from(vec![
        Span::styled("source: ", theme::muted()),
        Span::styled(app.source_label.as_str(), theme::accent()),
    ]));
    f.render_widget(label, chunks[1]);
}
