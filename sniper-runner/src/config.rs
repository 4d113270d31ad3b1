//! Dashboard configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock setup: Kraken, ETH/BTC/SOL against USD, daily EMA 50, 4H EMA 20,
//! ATR 14, 100 bars per leg, 2.5% pullback threshold.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use sniper_core::data::kraken::{ProviderSettings, KRAKEN_BASE_URL};
use sniper_core::{FormingBarPolicy, IndicatorParams, Timeframe, TradingPair, PULLBACK_THRESHOLD_PCT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub min_request_interval_ms: u64,
    pub user_agent: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        let settings = ProviderSettings::default();
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            timeout_secs: settings.timeout.as_secs(),
            min_request_interval_ms: settings.min_request_interval.as_millis() as u64,
            user_agent: settings.user_agent,
        }
    }
}

impl ExchangeConfig {
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            min_request_interval: Duration::from_millis(self.min_request_interval_ms),
        }
    }
}

/// Fetch and EMA settings for one leg of the setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegConfig {
    pub limit: usize,
    pub ema_period: usize,
}

impl LegConfig {
    pub fn daily_default() -> Self {
        Self {
            limit: 100,
            ema_period: 50,
        }
    }

    pub fn intraday_default() -> Self {
        Self {
            limit: 100,
            ema_period: 20,
        }
    }
}

/// A `[daily]` / `[intraday]` table as written; missing keys fall back to the
/// leg's own default.
#[derive(Deserialize)]
struct PartialLeg {
    limit: Option<usize>,
    ema_period: Option<usize>,
}

impl PartialLeg {
    fn or(self, default: LegConfig) -> LegConfig {
        LegConfig {
            limit: self.limit.unwrap_or(default.limit),
            ema_period: self.ema_period.unwrap_or(default.ema_period),
        }
    }
}

fn daily_leg<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LegConfig, D::Error> {
    PartialLeg::deserialize(deserializer).map(|leg| leg.or(LegConfig::daily_default()))
}

fn intraday_leg<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LegConfig, D::Error> {
    PartialLeg::deserialize(deserializer).map(|leg| leg.or(LegConfig::intraday_default()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub atr_period: usize,
    pub pullback_threshold_pct: f64,
    pub forming_bar: FormingBarPolicy,
    pub watchlist: Vec<TradingPair>,
    pub exchange: ExchangeConfig,
    #[serde(deserialize_with = "daily_leg")]
    pub daily: LegConfig,
    #[serde(deserialize_with = "intraday_leg")]
    pub intraday: LegConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            atr_period: sniper_core::annotate::DEFAULT_ATR_PERIOD,
            pullback_threshold_pct: PULLBACK_THRESHOLD_PCT,
            forming_bar: FormingBarPolicy::Include,
            watchlist: TradingPair::default_watchlist(),
            exchange: ExchangeConfig::default(),
            daily: LegConfig::daily_default(),
            intraday: LegConfig::intraday_default(),
        }
    }
}

impl DashboardConfig {
    /// Default location: `<config dir>/sniper/config.toml`.
    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join("sniper").join("config.toml")
    }

    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.atr_period == 0 {
            return invalid("atr_period must be >= 1".into());
        }
        if !(self.pullback_threshold_pct.is_finite() && self.pullback_threshold_pct > 0.0) {
            return invalid(format!(
                "pullback_threshold_pct must be a positive number, got {}",
                self.pullback_threshold_pct
            ));
        }
        if self.watchlist.is_empty() {
            return invalid("watchlist must contain at least one pair".into());
        }
        for (name, leg) in [("daily", self.daily), ("intraday", self.intraday)] {
            if leg.limit == 0 {
                return invalid(format!("{name}.limit must be >= 1"));
            }
            if leg.ema_period == 0 {
                return invalid(format!("{name}.ema_period must be >= 1"));
            }
        }
        if self.exchange.base_url.trim().is_empty() {
            return invalid("exchange.base_url must not be empty".into());
        }
        Ok(())
    }

    pub fn leg(&self, timeframe: Timeframe) -> LegConfig {
        match timeframe {
            Timeframe::OneDay => self.daily,
            Timeframe::FourHours => self.intraday,
        }
    }

    pub fn indicator_params(&self, timeframe: Timeframe) -> IndicatorParams {
        IndicatorParams {
            ema_period: self.leg(timeframe).ema_period,
            atr_period: self.atr_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.daily.ema_period, 50);
        assert_eq!(config.intraday.ema_period, 20);
        assert_eq!(config.atr_period, 14);
        assert_eq!(config.pullback_threshold_pct, 2.5);
        assert_eq!(config.watchlist.len(), 3);
    }

    #[test]
    fn partial_override() {
        let config = DashboardConfig::from_toml(
            r#"
            pullback_threshold_pct = 1.5
            forming_bar = "exclude"
            watchlist = ["ADA/EUR"]

            [intraday]
            limit = 200
            ema_period = 34

            [exchange]
            min_request_interval_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.pullback_threshold_pct, 1.5);
        assert_eq!(config.forming_bar, FormingBarPolicy::Exclude);
        assert_eq!(config.watchlist[0].to_string(), "ADA/EUR");
        assert_eq!(config.intraday, LegConfig { limit: 200, ema_period: 34 });
        assert_eq!(config.daily, LegConfig::daily_default());
        assert_eq!(config.exchange.base_url, KRAKEN_BASE_URL);
        assert_eq!(config.exchange.provider_settings().min_request_interval, Duration::ZERO);
    }

    #[test]
    fn indicator_params_per_leg() {
        let config = DashboardConfig::default();
        assert_eq!(config.indicator_params(Timeframe::OneDay), IndicatorParams::with_ema(50));
        assert_eq!(config.indicator_params(Timeframe::FourHours), IndicatorParams::with_ema(20));
    }

    #[test]
    fn rejects_zero_limit() {
        let err = DashboardConfig::from_toml("[daily]\nlimit = 0\n").unwrap_err();
        assert!(err.to_string().contains("daily.limit"));
    }

    #[test]
    fn leg_table_with_one_key_keeps_the_other_default() {
        let config = DashboardConfig::from_toml("[daily]\nlimit = 60\n").unwrap();
        assert_eq!(config.daily, LegConfig { limit: 60, ema_period: 50 });
        assert_eq!(config.intraday, LegConfig::intraday_default());

        let config = DashboardConfig::from_toml("[intraday]\nema_period = 9\n").unwrap();
        assert_eq!(config.intraday, LegConfig { limit: 100, ema_period: 9 });
        assert_eq!(config.daily, LegConfig::daily_default());
    }

    #[test]
    fn empty_leg_table_is_that_legs_default() {
        let config = DashboardConfig::from_toml("[daily]\n[intraday]\n").unwrap();
        assert_eq!(config.daily, LegConfig::daily_default());
        assert_eq!(config.intraday, LegConfig::intraday_default());
    }

    #[test]
    fn rejects_bad_threshold_and_empty_watchlist() {
        assert!(DashboardConfig::from_toml("pullback_threshold_pct = -1.0").is_err());
        assert!(DashboardConfig::from_toml("watchlist = []").is_err());
    }

    #[test]
    fn rejects_malformed_pair() {
        let err = DashboardConfig::from_toml(r#"watchlist = ["ETHUSD"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip_preserves_config() {
        let config = DashboardConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = DashboardConfig::default_path(dir.path());
        assert_eq!(DashboardConfig::load_or_default(&path).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "atr_period = 7\n").unwrap();
        assert_eq!(DashboardConfig::from_file(&path).unwrap().atr_period, 7);
        let missing = DashboardConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
