//! View state and the transitions driven by user input.
//!
//! [`ForecastViewController`] owns a [`ViewState`] and a provider handle. Every
//! operation takes `&mut self`, so a controller runs one operation at a time;
//! provider failures are logged and folded into [`ViewState::error`] instead of
//! being returned.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    aqi::AqiResult,
    error::ViewError,
    geolocation::GeolocationSource,
    model::{Coordinates, ForecastDay, HistorySnapshot, HourRecord, SuggestionEntry, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Minimum query length, in characters, before autocomplete hits the provider.
pub const MIN_SUGGESTION_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub query: String,
    pub weather: Option<WeatherSnapshot>,
    pub history: Option<HistorySnapshot>,
    pub error: Option<ViewError>,
    pub loading: bool,
    pub theme: Theme,
    /// Always a valid index into `weather.forecast`, 0 when reset.
    pub selected_day_index: usize,
    /// Belongs to the hour strip currently on display.
    pub selected_hour: Option<HourRecord>,
    pub selected_date: String,
    pub suggestions: Vec<SuggestionEntry>,
}

#[derive(Debug)]
pub struct ForecastViewController {
    provider: Arc<dyn WeatherProvider>,
    state: ViewState,
}

impl ForecastViewController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, state: ViewState::default() }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Forecast for a city typed or picked by the user.
    pub async fn request_by_city(&mut self, name: &str) {
        if name.trim().is_empty() {
            self.state.error = Some(ViewError::Validation);
            return;
        }

        self.begin_forecast();
        tracing::debug!(city = name, "requesting forecast");

        match self.provider.forecast(name).await {
            Ok(snapshot) => {
                self.state.weather = Some(snapshot);
                self.state.suggestions.clear();
            }
            Err(e) => {
                tracing::warn!(city = name, error = %e, "forecast request failed");
                self.state.error = Some(ViewError::CityNotFound);
            }
        }

        self.state.loading = false;
    }

    /// Forecast for a position, usually the one found at startup.
    pub async fn request_by_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.begin_forecast();

        let query = Coordinates::new(latitude, longitude).to_query();
        tracing::debug!(%query, "requesting forecast by position");

        match self.provider.forecast(&query).await {
            Ok(snapshot) => self.state.weather = Some(snapshot),
            Err(e) => {
                tracing::warn!(%query, error = %e, "forecast by position failed");
                self.state.error = Some(ViewError::LocationUnavailable);
            }
        }

        self.state.loading = false;
    }

    /// Ask `source` for a position once and load its forecast. Denial is only logged.
    pub async fn locate_on_startup(&mut self, source: &dyn GeolocationSource) {
        match source.current_position().await {
            Ok(pos) => self.request_by_coordinates(pos.latitude, pos.longitude).await,
            Err(e) => tracing::info!(error = %e, "Location access denied"),
        }
    }

    /// Store the typed text and refresh autocomplete candidates.
    pub async fn update_suggestions(&mut self, partial: &str) {
        self.state.query = partial.to_string();

        if partial.chars().count() < MIN_SUGGESTION_CHARS {
            self.state.suggestions.clear();
            return;
        }

        match self.provider.search(partial).await {
            Ok(entries) => self.state.suggestions = entries,
            Err(e) => {
                tracing::debug!(partial, error = %e, "suggestion lookup failed");
                self.state.suggestions.clear();
            }
        }
    }

    pub async fn select_suggestion(&mut self, entry: &SuggestionEntry) {
        self.state.query = entry.name.clone();
        self.state.suggestions.clear();
        self.request_by_city(&entry.name).await;
    }

    /// Recorded weather for `date` at the loaded location. No-op before a forecast is loaded.
    pub async fn request_history(&mut self, date: &str) {
        let Some(location) = self.state.weather.as_ref().map(|w| w.location.name.clone()) else {
            return;
        };

        self.state.loading = true;
        self.state.error = None;
        self.state.history = None;
        self.state.selected_hour = None;

        match self.provider.history(&location, date).await {
            Ok(history) => self.state.history = Some(history),
            Err(e) => {
                tracing::warn!(%location, date, error = %e, "history request failed");
                self.state.error = Some(ViewError::HistoryUnavailable);
            }
        }

        self.state.loading = false;
    }

    /// A date was picked. Dates inside the forecast window select that day,
    /// anything else goes to the history endpoint. An in-window date with no
    /// forecast day leaves the selection alone and `selected_date` follows it.
    pub async fn on_date_change(&mut self, date: &str) {
        self.state.selected_date = date.to_string();
        self.state.selected_hour = None;

        let Some(weather) = self.state.weather.as_ref() else {
            return;
        };
        let (Some(first), Some(last)) = (weather.forecast.first(), weather.forecast.last()) else {
            return;
        };

        // Zero-padded ISO dates order correctly as strings.
        if first.date.as_str() <= date && date <= last.date.as_str() {
            let found = weather.forecast.iter().position(|d| d.date == date);
            match found {
                Some(index) => self.state.selected_day_index = index,
                None => {
                    // Keep the displayed day and make the picked date agree with it.
                    tracing::warn!(date, "date inside forecast window has no matching day");
                    if let Some(shown) = weather.forecast.get(self.state.selected_day_index) {
                        self.state.selected_date = shown.date.clone();
                    }
                }
            }
            self.state.history = None;
        } else {
            self.request_history(date).await;
        }
    }

    /// Select a forecast day. Out-of-range indices are ignored.
    pub fn select_day(&mut self, index: usize) {
        let Some(day) = self.state.weather.as_ref().and_then(|w| w.forecast.get(index)) else {
            tracing::debug!(index, "ignoring selection of unknown day");
            return;
        };

        self.state.selected_date = day.date.clone();
        self.state.selected_day_index = index;
        self.state.selected_hour = None;
        self.state.history = None;
    }

    /// Open the detail for an hour of the strip on display; other hours are ignored.
    pub fn select_hour(&mut self, hour: HourRecord) {
        if !self.active_hours().contains(&hour) {
            tracing::debug!(time = %hour.time, "ignoring hour outside the displayed day");
            return;
        }
        self.state.selected_hour = Some(hour);
    }

    pub fn close_hour_detail(&mut self) {
        self.state.selected_hour = None;
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }

    pub fn selected_day(&self) -> Option<&ForecastDay> {
        self.state.weather.as_ref()?.forecast.get(self.state.selected_day_index)
    }

    pub fn showing_history(&self) -> bool {
        self.state.history.is_some()
    }

    /// Hours of the history day when one is shown, else of the selected forecast day.
    pub fn active_hours(&self) -> &[HourRecord] {
        match &self.state.history {
            Some(history) => &history.day.hours,
            None => self.selected_day().map(|d| d.hours.as_slice()).unwrap_or_default(),
        }
    }

    pub fn current_aqi(&self) -> Option<AqiResult> {
        self.state.weather.as_ref()?.current.aqi()
    }

    fn begin_forecast(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.state.weather = None;
        self.state.history = None;
        self.state.selected_hour = None;
        self.state.selected_date.clear();
        self.state.selected_day_index = 0;
    }
}
