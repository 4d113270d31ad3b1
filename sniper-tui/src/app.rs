//! Application state: single-owner, main-thread only.
//!
//! A refresh is requested by input handling and carried out by the main loop,
//! which feeds the cycle outcome back through `apply_cycle`.

use sniper_core::TradingPair;
use sniper_runner::{CycleError, DashboardConfig, DashboardSnapshot};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    pub selected: usize,
    /// Data source shown in the header, e.g. "Kraken" or "Demo".
    pub source_label: String,
    /// Result of the last successful cycle for the selected pair.
    pub snapshot: Option<DashboardSnapshot>,
    /// User-facing message of the last failed cycle; replaces the results.
    pub last_error: Option<String>,
    pub status_message: Option<(String, StatusLevel)>,
    pub show_help: bool,
    pub refresh_requested: bool,
    pub running: bool,
}

impl AppState {
    /// Starts with the first pair selected and a refresh pending.
    pub fn new(config: DashboardConfig, source_label: impl Into<String>) -> Self {
        Self {
            config,
            selected: 0,
            source_label: source_label.into(),
            snapshot: None,
            last_error: None,
            status_message: None,
            show_help: false,
            refresh_requested: true,
            running: true,
        }
    }

    pub fn watchlist(&self) -> &[TradingPair] {
        &self.config.watchlist
    }

    pub fn selected_pair(&self) -> Option<&TradingPair> {
        self.watchlist().get(self.selected)
    }

    /// Select the pair at `index` and queue a refresh. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.watchlist().len() {
            self.selected = index;
            self.refresh_requested = true;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.watchlist().len();
        if len > 0 {
            self.select((self.selected + 1) % len);
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.watchlist().len();
        if len > 0 {
            self.select((self.selected + len - 1) % len);
        }
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Status line shown while the cycle runs.
    pub fn connecting_message(&self) -> String {
        match self.selected_pair() {
            Some(pair) => format!("connecting to {} for {pair}…", self.source_label),
            None => format!("connecting to {}…", self.source_label),
        }
    }

    /// Take the result of a finished cycle.
    ///
    /// A failure clears the previous snapshot so stale numbers for another
    /// pair are never shown next to the error.
    pub fn apply_cycle(&mut self, result: Result<DashboardSnapshot, CycleError>) {
        self.refresh_requested = false;
        match result {
            Ok(snapshot) => {
                self.set_status(format!(
                    "{} updated {}",
                    snapshot.pair,
                    snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                let message = e.user_message();
                self.snapshot = None;
                self.last_error = Some(message.clone());
                self.set_error(message);
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
