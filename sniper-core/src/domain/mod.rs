//! Domain types: bars, timeframes, trading pairs, bar series.

pub mod bar;
pub mod pair;
pub mod series;
pub mod timeframe;

pub use bar::Bar;
pub use pair::{PairError, TradingPair};
pub use series::{BarSeries, SeriesError};
pub use timeframe::{Timeframe, TimeframeError};
