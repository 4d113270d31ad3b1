//! Export: per-bar CSV of an annotated leg and a JSON view of a snapshot.
//!
//! CSV columns: timestamp, open, high, low, close, volume, ema, atr.
//! The ATR cell is left blank while the window is still filling.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use sniper_core::AnnotatedSeries;

use crate::pipeline::DashboardSnapshot;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

const CSV_HEADER: [&str; 8] = ["timestamp", "open", "high", "low", "close", "volume", "ema", "atr"];

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, series: &AnnotatedSeries) -> Result<(), ExportError> {
    wtr.write_record(CSV_HEADER)?;
    for row in series.rows() {
        wtr.write_record([
            row.bar.timestamp.to_rfc3339(),
            format!("{:.8}", row.bar.open),
            format!("{:.8}", row.bar.high),
            format!("{:.8}", row.bar.low),
            format!("{:.8}", row.bar.close),
            format!("{:.8}", row.bar.volume),
            format!("{:.8}", row.ema),
            row.atr.map(|v| format!("{v:.8}")).unwrap_or_default(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render an annotated series as CSV text.
pub fn series_csv(series: &AnnotatedSeries) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    write_rows(&mut wtr, series)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write an annotated series to `path` as CSV, one row per bar.
pub fn write_series_csv(series: &AnnotatedSeries, path: &Path) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_rows(&mut wtr, series)
}

/// Flat view of the four metrics and the signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotView {
    pub pair: String,
    pub fetched_at: DateTime<Utc>,
    pub price: f64,
    pub trend: &'static str,
    pub trend_is_bullish: bool,
    pub distance_pct: f64,
    pub in_pullback_range: bool,
    pub threshold_pct: f64,
    pub atr: Option<f64>,
    pub daily_close: f64,
    pub daily_ema: f64,
    pub daily_ema_period: usize,
    pub h4_ema: f64,
    pub h4_ema_period: usize,
    pub daily_bars: usize,
    pub h4_bars: usize,
    pub note: String,
}

impl SnapshotView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let signal = &snapshot.signal;
        Self {
            pair: snapshot.pair.to_string(),
            fetched_at: snapshot.fetched_at,
            price: signal.current_price,
            trend: signal.trend_label(),
            trend_is_bullish: signal.trend_is_bullish,
            distance_pct: signal.distance_pct,
            in_pullback_range: signal.in_pullback_range,
            threshold_pct: signal.threshold_pct,
            atr: signal.atr,
            daily_close: signal.daily_close,
            daily_ema: signal.daily_ema,
            daily_ema_period: snapshot.daily.params().ema_period,
            h4_ema: signal.h4_ema,
            h4_ema_period: snapshot.intraday.params().ema_period,
            daily_bars: snapshot.daily.len(),
            h4_bars: snapshot.intraday.len(),
            note: signal.summary_note(),
        }
    }
}

/// Pretty JSON of the snapshot metrics.
pub fn snapshot_json(snapshot: &DashboardSnapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&SnapshotView::from_snapshot(snapshot))?)
}

/// Write both legs as CSV into `dir`, e.g. `ETH-USD_1d.csv` and `ETH-USD_4h.csv`.
///
/// Creates `dir` if needed. Returns the written paths, daily first.
pub fn save_snapshot_csv(snapshot: &DashboardSnapshot, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let stem = format!("{}-{}", snapshot.pair.base(), snapshot.pair.quote());

    let mut written = Vec::with_capacity(2);
    for series in [&snapshot.daily, &snapshot.intraday] {
        let path = dir.join(format!("{stem}_{}.csv", series.timeframe()));
        write_series_csv(series, &path)?;
        tracing::info!(path = %path.display(), rows = series.len(), "wrote CSV");
        written.push(path);
    }
    Ok(written)
}
