//! Standalone widgets rendered straight into a buffer.

pub mod candle_chart;

pub use candle_chart::CandleChartPanel;
