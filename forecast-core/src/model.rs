use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aqi::{AqiResult, compute_aqi};

/// A latitude/longitude pair, e.g. from a geolocation source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Provider query form: `"<lat>,<lon>"`.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned by the provider (protocol-relative URL).
    pub icon: String,
}

/// Pollutant concentrations in μg/m³. Only `pm2_5` drives the AQI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AirQuality {
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub visibility_km: f64,
    pub pressure_mb: f64,
    pub uv_index: f64,
    pub condition: Condition,
    pub air_quality: Option<AirQuality>,
}

impl CurrentConditions {
    /// AQI derived from the pm2.5 reading, if air-quality data came back.
    pub fn aqi(&self) -> Option<AqiResult> {
        self.air_quality.as_ref()?.pm2_5.map(compute_aqi)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Local timestamp, `"YYYY-MM-DD HH:MM"`.
    pub time: String,
    pub temperature_c: f64,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub visibility_km: f64,
    pub pressure_mb: f64,
    pub uv_index: f64,
    pub chance_of_rain_pct: u8,
}

impl HourRecord {
    /// The `HH:MM` part of the timestamp.
    pub fn clock(&self) -> &str {
        self.time.split_once(' ').map_or(self.time.as_str(), |(_, clock)| clock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Zero-padded ISO date (`YYYY-MM-DD`); compared lexically.
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: Condition,
    pub hours: Vec<HourRecord>,
}

impl ForecastDay {
    /// Short weekday name such as `"Mon"`, or `None` for a malformed date.
    pub fn weekday(&self) -> Option<String> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%a").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

/// Recorded weather for one past date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub location: Location,
    pub day: ForecastDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
}

impl std::fmt::Display for SuggestionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.region, self.country)
    }
}
