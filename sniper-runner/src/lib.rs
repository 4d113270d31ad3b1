//! Sniper Runner: configuration, the refresh cycle and export.
//!
//! This crate builds on `sniper-core` to provide:
//! - `DashboardConfig` loaded from TOML with full defaults
//! - `run_cycle()`: one daily + 4H refresh producing a `DashboardSnapshot`
//! - CSV and JSON export of a snapshot

pub mod config;
pub mod export;
pub mod pipeline;

pub use config::{ConfigError, DashboardConfig, ExchangeConfig, LegConfig};
pub use export::{save_snapshot_csv, series_csv, snapshot_json, write_series_csv, ExportError, SnapshotView};
pub use pipeline::{run_cycle, CycleError, DashboardSnapshot, Leg};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<DashboardConfig>();
        assert_sync::<DashboardConfig>();
    }

    #[test]
    fn snapshot_is_send_sync() {
        assert_send::<DashboardSnapshot>();
        assert_sync::<DashboardSnapshot>();
    }

    #[test]
    fn cycle_error_is_send_sync() {
        assert_send::<CycleError>();
        assert_sync::<CycleError>();
    }
}
