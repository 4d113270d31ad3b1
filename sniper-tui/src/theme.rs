//! Neon-on-charcoal theme tokens for the dashboard.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, selected pair)
//! - **Positive**: neon green (bull trend, up candles, in range)
//! - **Negative**: hot pink (bear trend, down candles, errors)
//! - **Warning**: neon orange (waiting, warnings)
//! - **Highlight**: yellow (EMA line, pullback marker)
//! - **Muted**: steel blue (labels, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    /// EMA overlay and pullback marker
    pub highlight: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            highlight: Color::Rgb(255, 230, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Green for a bullish daily trend, pink for bearish.
    pub fn trend_color(&self, bullish: bool) -> Color {
        if bullish {
            self.positive
        } else {
            self.negative
        }
    }

    /// Green when price sits inside the pullback band, orange while waiting.
    pub fn pullback_color(&self, in_range: bool) -> Color {
        if in_range {
            self.positive
        } else {
            self.warning
        }
    }
}

// Shorthand styles for widgets built from Spans.

pub fn accent() -> Style {
    Style::default().fg(Theme::neon().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::neon().muted)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::neon().warning)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::neon().negative)
}

pub fn text() -> Style {
    Style::default().fg(Theme::neon().text_primary)
}

pub fn text_secondary() -> Style {
    Style::default().fg(Theme::neon().text_secondary)
}
