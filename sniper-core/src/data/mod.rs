//! Candle fetching: provider trait, Kraken REST provider, request throttle.

pub mod kraken;
pub mod provider;
pub mod static_provider;
pub mod throttle;

pub use kraken::{KrakenProvider, ProviderSettings};
pub use provider::{DataProvider, FetchError, FormingBarPolicy};
pub use static_provider::StaticProvider;
pub use throttle::Throttle;
