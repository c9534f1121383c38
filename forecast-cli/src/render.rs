//! Plain-text rendering of controller state.

use std::fmt::Write;

use forecast_core::{ForecastViewController, HourRecord, Theme, WeatherSnapshot};

/// Full view, error line included. Used between interactive prompts.
pub fn render(ctl: &ForecastViewController) -> String {
    render_view(ctl, true)
}

/// One-shot output for `show`; the caller reports the error itself.
pub fn render_report(ctl: &ForecastViewController) -> String {
    render_view(ctl, false)
}

fn render_view(ctl: &ForecastViewController, with_error: bool) -> String {
    let state = ctl.state();
    let mut out = String::new();

    let mode = match state.theme {
        Theme::Light => "Light mode",
        Theme::Dark => "Dark mode",
    };
    let _ = writeln!(out, "Weather ({mode})");

    if let Some(err) = state.error.filter(|_| with_error) {
        let _ = writeln!(out, "Error: {err}");
    }

    if state.loading {
        let _ = writeln!(out, "Loading weather...");
        return out;
    }

    let Some(weather) = &state.weather else {
        return out;
    };

    render_current(&mut out, ctl, weather);

    match &state.history {
        Some(history) => {
            let _ = writeln!(out, "\nHourly history ({})", history.day.date);
            render_hour_strip(&mut out, &history.day.hours);
        }
        None => {
            if let Some(day) = ctl.selected_day() {
                let _ = writeln!(out, "\nHourly forecast ({})", day.date);
                render_hour_strip(&mut out, &day.hours);
            }
        }
    }

    let _ = writeln!(out, "\n7-day forecast");
    for (index, day) in weather.forecast.iter().enumerate() {
        let marker = if index == state.selected_day_index && state.history.is_none() {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {} {}  max {:.1}°C / min {:.1}°C  {}",
            day.weekday().unwrap_or_default(),
            day.date,
            day.max_temp_c,
            day.min_temp_c,
            day.condition.text,
        );
    }

    if let Some(hour) = &state.selected_hour {
        out.push('\n');
        out.push_str(&render_hour_detail(hour));
    }

    out
}

fn render_current(out: &mut String, ctl: &ForecastViewController, weather: &WeatherSnapshot) {
    let current = &weather.current;

    let _ = writeln!(out, "\n{}, {}", weather.location.name, weather.location.country);
    let _ = writeln!(out, "{:.1}°C  feels like {:.1}°C", current.temperature_c, current.feels_like_c);
    let _ = writeln!(out, "{}", current.condition.text);

    if let Some(aqi) = ctl.current_aqi() {
        let _ = writeln!(out, "AQI: {} ({})", aqi.index, aqi.category);
    }

    let _ = writeln!(out, "Humidity: {}%", current.humidity_pct);
    let _ = writeln!(out, "Wind: {} km/h", current.wind_kph);
    let _ = writeln!(out, "Visibility: {} km", current.visibility_km);
    let _ = writeln!(out, "Pressure: {} mb", current.pressure_mb);
    let _ = writeln!(out, "UV index: {}", current.uv_index);
}

fn render_hour_strip(out: &mut String, hours: &[HourRecord]) {
    for chunk in hours.chunks(6) {
        let line: Vec<String> = chunk
            .iter()
            .map(|h| format!("{} {:>5.1}°C", h.clock(), h.temperature_c))
            .collect();
        let _ = writeln!(out, "  {}", line.join("  "));
    }
}

pub fn render_hour_detail(hour: &HourRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {:.1}°C {}", hour.clock(), hour.temperature_c, hour.condition.text);
    let _ = writeln!(out, "  Humidity: {}%", hour.humidity_pct);
    let _ = writeln!(out, "  Wind: {} km/h", hour.wind_kph);
    let _ = writeln!(out, "  Visibility: {} km", hour.visibility_km);
    let _ = writeln!(out, "  Pressure: {} mb", hour.pressure_mb);
    let _ = writeln!(out, "  UV index: {}", hour.uv_index);
    let _ = writeln!(out, "  Chance of rain: {}%", hour.chance_of_rain_pct);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use forecast_core::{
        Condition, HistorySnapshot, ProviderError, SuggestionEntry, WeatherProvider,
    };
    use std::sync::Arc;

    #[derive(Debug)]
    struct UnknownCities;

    #[async_trait]
    impl WeatherProvider for UnknownCities {
        async fn forecast(&self, _query: &str) -> Result<WeatherSnapshot, ProviderError> {
            Err(ProviderError::EmptyHistory)
        }

        async fn search(&self, _partial: &str) -> Result<Vec<SuggestionEntry>, ProviderError> {
            Ok(Vec::new())
        }

        async fn history(
            &self,
            _location: &str,
            _date: &str,
        ) -> Result<HistorySnapshot, ProviderError> {
            Err(ProviderError::EmptyHistory)
        }
    }

    #[tokio::test]
    async fn report_leaves_error_to_the_caller() {
        let mut ctl = ForecastViewController::new(Arc::new(UnknownCities));
        ctl.request_by_city("InvalidXYZ").await;

        assert!(render(&ctl).contains("City not found. Please try again."));
        assert!(!render_report(&ctl).contains("City not found"));
    }

    #[test]
    fn hour_detail_lists_all_fields() {
        let hour = HourRecord {
            time: "2025-03-01 06:00".into(),
            temperature_c: 4.25,
            condition: Condition { text: "Mist".into(), icon: String::new() },
            humidity_pct: 93,
            wind_kph: 7.2,
            visibility_km: 2.0,
            pressure_mb: 1022.0,
            uv_index: 0.0,
            chance_of_rain_pct: 40,
        };

        let text = render_hour_detail(&hour);

        assert!(text.starts_with("[06:00]"));
        assert!(text.contains("Mist"));
        assert!(text.contains("Humidity: 93%"));
        assert!(text.contains("Chance of rain: 40%"));
    }
}
