use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_BASE_URL,
    error::ProviderError,
    model::{
        AirQuality, Condition, CurrentConditions, ForecastDay, HistorySnapshot, HourRecord,
        Location, SuggestionEntry, WeatherSnapshot,
    },
};

use super::{FORECAST_DAYS, WeatherProvider};

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, endpoint, "weatherapi request failed");
            return Err(ProviderError::NotFound { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, query: &str) -> Result<WeatherSnapshot, ProviderError> {
        let days = FORECAST_DAYS.to_string();
        let parsed: WaForecastResponse = self
            .get_json("forecast.json", &[("q", query), ("days", days.as_str()), ("aqi", "yes")])
            .await?;

        Ok(WeatherSnapshot {
            location: parsed.location.into(),
            current: parsed.current.into(),
            forecast: parsed.forecast.forecastday.into_iter().map(Into::into).collect(),
        })
    }

    async fn search(&self, partial: &str) -> Result<Vec<SuggestionEntry>, ProviderError> {
        let parsed: Vec<WaSearchEntry> = self.get_json("search.json", &[("q", partial)]).await?;

        Ok(parsed
            .into_iter()
            .map(|e| SuggestionEntry { id: e.id, name: e.name, region: e.region, country: e.country })
            .collect())
    }

    async fn history(&self, location: &str, date: &str) -> Result<HistorySnapshot, ProviderError> {
        let parsed: WaHistoryResponse =
            self.get_json("history.json", &[("q", location), ("dt", date)]).await?;

        let day = parsed
            .forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyHistory)?;

        Ok(HistorySnapshot { location: parsed.location.into(), day: day.into() })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    country: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaAirQuality {
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    co: Option<f64>,
    no2: Option<f64>,
    o3: Option<f64>,
    so2: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    vis_km: f64,
    pressure_mb: f64,
    uv: f64,
    condition: WaCondition,
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time: String,
    temp_c: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
    vis_km: f64,
    pressure_mb: f64,
    #[serde(default)]
    uv: f64,
    #[serde(default)]
    chance_of_rain: u8,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    hour: Vec<WaHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaHistoryResponse {
    location: WaLocation,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaSearchEntry {
    id: i64,
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

impl From<WaLocation> for Location {
    fn from(l: WaLocation) -> Self {
        Location {
            name: l.name,
            region: l.region,
            country: l.country,
            latitude: l.lat,
            longitude: l.lon,
        }
    }
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

impl From<WaCurrent> for CurrentConditions {
    fn from(c: WaCurrent) -> Self {
        CurrentConditions {
            temperature_c: c.temp_c,
            feels_like_c: c.feelslike_c,
            humidity_pct: c.humidity,
            wind_kph: c.wind_kph,
            visibility_km: c.vis_km,
            pressure_mb: c.pressure_mb,
            uv_index: c.uv,
            condition: c.condition.into(),
            air_quality: c.air_quality.map(|aq| AirQuality {
                pm2_5: aq.pm2_5,
                pm10: aq.pm10,
                co: aq.co,
                no2: aq.no2,
                o3: aq.o3,
                so2: aq.so2,
            }),
        }
    }
}

impl From<WaHour> for HourRecord {
    fn from(h: WaHour) -> Self {
        HourRecord {
            time: h.time,
            temperature_c: h.temp_c,
            condition: h.condition.into(),
            humidity_pct: h.humidity,
            wind_kph: h.wind_kph,
            visibility_km: h.vis_km,
            pressure_mb: h.pressure_mb,
            uv_index: h.uv,
            chance_of_rain_pct: h.chance_of_rain,
        }
    }
}

impl From<WaForecastDay> for ForecastDay {
    fn from(d: WaForecastDay) -> Self {
        ForecastDay {
            date: d.date,
            max_temp_c: d.day.maxtemp_c,
            min_temp_c: d.day.mintemp_c,
            condition: d.day.condition.into(),
            hours: d.hour.into_iter().map(Into::into).collect(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
