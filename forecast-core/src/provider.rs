use crate::{
    Config,
    error::ProviderError,
    model::{HistorySnapshot, SuggestionEntry, WeatherSnapshot},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Days requested from the forecast endpoint.
pub const FORECAST_DAYS: u8 = 7;

/// The three provider endpoints the viewer consumes.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Forward forecast with air quality. `query` is a city name or `"lat,lon"`.
    async fn forecast(&self, query: &str) -> Result<WeatherSnapshot, ProviderError>;

    /// Autocomplete candidates for a partial location name.
    async fn search(&self, partial: &str) -> Result<Vec<SuggestionEntry>, ProviderError>;

    /// Recorded weather for `location` on `date` (`YYYY-MM-DD`).
    async fn history(&self, location: &str, date: &str) -> Result<HistorySnapshot, ProviderError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    let provider = WeatherApiProvider::with_base_url(api_key, config.base_url());

    Ok(Box::new(provider))
}
