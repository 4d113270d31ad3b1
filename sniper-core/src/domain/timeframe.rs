//! Candle timeframes supported by the dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported timeframe '{0}' (expected 1d or 4h)")]
pub struct TimeframeError(pub String);

/// Bar interval. Only the two legs of the pullback setup are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "4h")]
    FourHours,
}

impl Timeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::FourHours => "4h",
        }
    }

    /// Interval length in minutes, as venues expect it in OHLC queries.
    pub fn minutes(self) -> u32 {
        match self {
            Timeframe::OneDay => 1440,
            Timeframe::FourHours => 240,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(i64::from(self.minutes()))
    }

    /// Short label for display ("Daily", "4H").
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneDay => "Daily",
            Timeframe::FourHours => "4H",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Timeframe::OneDay),
            "4h" => Ok(Timeframe::FourHours),
            other => Err(TimeframeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("1d".parse::<Timeframe>().unwrap(), Timeframe::OneDay);
        assert_eq!(" 4H ".parse::<Timeframe>().unwrap(), Timeframe::FourHours);
        assert_eq!(Timeframe::FourHours.to_string(), "4h");
        assert!("15m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn interval_minutes() {
        assert_eq!(Timeframe::OneDay.minutes(), 1440);
        assert_eq!(Timeframe::FourHours.minutes(), 240);
        assert_eq!(Timeframe::FourHours.duration(), Duration::hours(4));
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&Timeframe::OneDay).unwrap();
        assert_eq!(json, "\"1d\"");
    }
}
