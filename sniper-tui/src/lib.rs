//! Sniper TUI: terminal dashboard for the daily-trend / 4H-pullback setup.
//!
//! Shows, for the selected pair:
//! - Price, daily trend, 4H distance to the EMA and ATR as metric cards
//! - A 4H candle chart with the EMA overlay and a pullback marker
//! - The one-line strategy note and the last status or error

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::{AppState, StatusLevel};
pub use input::handle_key;
pub use theme::Theme;
