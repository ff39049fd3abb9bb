//! Weather provider client.
//!
//! Two read-only calls keyed by a fixed place name: current conditions
//! and the 5-day/3-hour forecast. Provider payloads are deserialized into
//! explicit typed structs (every field optional, with a defined fallback)
//! and mapped into display-oriented shapes: whole-degree temperatures,
//! humidity/wind/visibility/pressure as display strings, and one forecast
//! sample per day (the sample closest to midday).

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use krishi_core::config::WeatherConfig;
use krishi_core::{KrishiError, Result};

/// Display value substituted when the provider omits a field.
const MISSING: &str = "--";

// -- Provider payloads --

#[derive(Debug, Default, Deserialize)]
struct ConditionsPayload {
    #[serde(default)]
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
    #[serde(default)]
    wind: Option<WindBlock>,
    /// Visibility in metres.
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct MainBlock {
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherBlock {
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    /// Wind speed in m/s (metric units).
    #[serde(default)]
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastPayload {
    #[serde(default)]
    list: Vec<ForecastSample>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastSample {
    #[serde(default)]
    dt_txt: Option<String>,
    #[serde(default)]
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
}

// -- Display shapes --

/// Current conditions mapped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature rounded to whole degrees Celsius.
    pub temperature_c: i32,
    pub condition: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
}

/// One forecast entry per day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub temperature_c: i32,
    pub condition: String,
}

/// Farm advisory derived from the current condition.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherAdvisory {
    pub title: String,
    pub message: String,
}

/// Map a condition string to the fixed farm advisory, if any.
pub fn advisory_for(condition: &str) -> Option<WeatherAdvisory> {
    let cond = condition.to_lowercase();
    if cond.contains("rain") {
        Some(WeatherAdvisory {
            title: "Rain Alert".to_string(),
            message: "Ensure proper drainage and cover harvested produce.".to_string(),
        })
    } else if cond.contains("wind") {
        Some(WeatherAdvisory {
            title: "High Wind Alert".to_string(),
            message: "Secure loose equipment and crop supports.".to_string(),
        })
    } else if cond.contains("heat") || cond.contains("clear") {
        Some(WeatherAdvisory {
            title: "Heat Alert".to_string(),
            message: "Irrigate crops adequately and provide shade where possible.".to_string(),
        })
    } else if cond.contains("cloud") {
        Some(WeatherAdvisory {
            title: "Cloudy Weather".to_string(),
            message: "Monitor humidity, possible risk of fungal diseases.".to_string(),
        })
    } else {
        None
    }
}

/// Read-only weather provider client.
pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch current conditions for the configured place.
    pub async fn current(&self) -> Result<CurrentWeather> {
        let payload: ConditionsPayload = self.fetch("weather").await?;
        Ok(map_current(payload))
    }

    /// Fetch the 5-day/3-hour forecast, reduced to one sample per day.
    pub async fn forecast(&self) -> Result<Vec<DailyForecast>> {
        let payload: ForecastPayload = self.fetch("forecast").await?;
        Ok(map_forecast(payload))
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let api_key = self
            .config
            .resolved_api_key()
            .ok_or_else(|| KrishiError::Weather("no API key configured".to_string()))?;

        let url = format!(
            "{}/{}?q={}&appid={}&units=metric",
            self.config.endpoint, path, self.config.place, api_key
        );
        debug!(place = %self.config.place, path, "Fetching weather data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KrishiError::Weather(e.to_string()))?;

        if !response.status().is_success() {
            return Err(KrishiError::Weather(format!(
                "request failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| KrishiError::Weather(e.to_string()))
    }
}

fn map_current(payload: ConditionsPayload) -> CurrentWeather {
    let main = payload.main.unwrap_or_default();
    let weather = payload.weather.into_iter().next().unwrap_or_default();

    CurrentWeather {
        temperature_c: main.temp.map(|t| t.round() as i32).unwrap_or(0),
        condition: weather.main.unwrap_or_else(|| MISSING.to_string()),
        description: weather.description.unwrap_or_else(|| MISSING.to_string()),
        humidity: main
            .humidity
            .map(|h| format!("{}%", h.round() as i64))
            .unwrap_or_else(|| MISSING.to_string()),
        wind: payload
            .wind
            .and_then(|w| w.speed)
            .map(|mps| format!("{} km/h", (mps * 3.6).round() as i64))
            .unwrap_or_else(|| MISSING.to_string()),
        visibility: payload
            .visibility
            .map(|m| format!("{} km", (m / 1000.0).round() as i64))
            .unwrap_or_else(|| MISSING.to_string()),
        pressure: main
            .pressure
            .map(|p| format!("{} hPa", p.round() as i64))
            .unwrap_or_else(|| MISSING.to_string()),
    }
}

fn map_forecast(payload: ForecastPayload) -> Vec<DailyForecast> {
    // Group 3-hourly samples by date, keeping the one closest to midday.
    let mut by_date: BTreeMap<String, (u32, DailyForecast)> = BTreeMap::new();

    for sample in payload.list {
        let Some(dt_txt) = sample.dt_txt else { continue };
        let Ok(stamp) = NaiveDateTime::parse_from_str(&dt_txt, "%Y-%m-%d %H:%M:%S") else {
            continue;
        };

        let date = stamp.date().to_string();
        let distance = stamp.hour().abs_diff(12);
        let main = sample.main.unwrap_or_default();
        let weather = sample.weather.into_iter().next().unwrap_or_default();

        let entry = DailyForecast {
            date: date.clone(),
            temperature_c: main.temp.map(|t| t.round() as i32).unwrap_or(0),
            condition: weather.main.unwrap_or_else(|| MISSING.to_string()),
        };

        let closer = match by_date.get(&date) {
            Some((best, _)) => distance < *best,
            None => true,
        };
        if closer {
            by_date.insert(date, (distance, entry));
        }
    }

    by_date.into_values().map(|(_, entry)| entry).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(json: &str) -> ConditionsPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_current_full_payload() {
        let payload = conditions(
            r#"{
                "main": {"temp": 27.6, "humidity": 65, "pressure": 1013.2},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 3.4},
                "visibility": 10000
            }"#,
        );
        let current = map_current(payload);
        assert_eq!(current.temperature_c, 28);
        assert_eq!(current.condition, "Clear");
        assert_eq!(current.description, "clear sky");
        assert_eq!(current.humidity, "65%");
        assert_eq!(current.wind, "12 km/h");
        assert_eq!(current.visibility, "10 km");
        assert_eq!(current.pressure, "1013 hPa");
    }

    #[test]
    fn test_map_current_missing_fields_use_fallbacks() {
        let current = map_current(conditions("{}"));
        assert_eq!(current.temperature_c, 0);
        assert_eq!(current.condition, "--");
        assert_eq!(current.humidity, "--");
        assert_eq!(current.wind, "--");
        assert_eq!(current.visibility, "--");
        assert_eq!(current.pressure, "--");
    }

    #[test]
    fn test_map_current_rounds_toward_nearest_degree() {
        let payload = conditions(r#"{"main": {"temp": 24.4}, "weather": []}"#);
        assert_eq!(map_current(payload).temperature_c, 24);
    }

    #[test]
    fn test_map_forecast_one_sample_per_day_closest_to_midday() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{"list": [
                {"dt_txt": "2026-03-02 06:00:00", "main": {"temp": 21.0}, "weather": [{"main": "Clouds"}]},
                {"dt_txt": "2026-03-02 12:00:00", "main": {"temp": 26.2}, "weather": [{"main": "Clear"}]},
                {"dt_txt": "2026-03-02 18:00:00", "main": {"temp": 23.0}, "weather": [{"main": "Clouds"}]},
                {"dt_txt": "2026-03-03 09:00:00", "main": {"temp": 22.7}, "weather": [{"main": "Rain"}]},
                {"dt_txt": "2026-03-03 15:00:00", "main": {"temp": 24.9}, "weather": [{"main": "Rain"}]}
            ]}"#,
        )
        .unwrap();

        let daily = map_forecast(payload);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2026-03-02");
        assert_eq!(daily[0].temperature_c, 26);
        assert_eq!(daily[0].condition, "Clear");
        // 09:00 and 15:00 are equidistant from midday; the first seen wins.
        assert_eq!(daily[1].date, "2026-03-03");
        assert_eq!(daily[1].temperature_c, 23);
    }

    #[test]
    fn test_map_forecast_skips_malformed_timestamps() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{"list": [
                {"dt_txt": "not a date", "main": {"temp": 20.0}, "weather": []},
                {"main": {"temp": 21.0}, "weather": []},
                {"dt_txt": "2026-03-04 12:00:00", "main": {"temp": 25.0}, "weather": [{"main": "Clear"}]}
            ]}"#,
        )
        .unwrap();

        let daily = map_forecast(payload);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, "2026-03-04");
    }

    #[test]
    fn test_map_forecast_empty_list() {
        let daily = map_forecast(ForecastPayload::default());
        assert!(daily.is_empty());
    }

    #[test]
    fn test_advisory_rain() {
        let advisory = advisory_for("Light Rain").unwrap();
        assert_eq!(advisory.title, "Rain Alert");
        assert!(advisory.message.contains("drainage"));
    }

    #[test]
    fn test_advisory_wind() {
        assert_eq!(advisory_for("Windy").unwrap().title, "High Wind Alert");
    }

    #[test]
    fn test_advisory_clear_maps_to_heat() {
        assert_eq!(advisory_for("Clear").unwrap().title, "Heat Alert");
        assert_eq!(advisory_for("heat wave").unwrap().title, "Heat Alert");
    }

    #[test]
    fn test_advisory_clouds() {
        let advisory = advisory_for("Clouds").unwrap();
        assert_eq!(advisory.title, "Cloudy Weather");
        assert!(advisory.message.contains("fungal"));
    }

    #[test]
    fn test_advisory_none_for_other_conditions() {
        assert!(advisory_for("Mist").is_none());
        assert!(advisory_for("").is_none());
    }

    #[tokio::test]
    async fn test_current_without_api_key_fails_locally() {
        let client = WeatherClient::new(WeatherConfig::default());
        if std::env::var("KRISHI_WEATHER_API_KEY").is_err() {
            let result = client.current().await;
            assert!(matches!(result, Err(KrishiError::Weather(_))));
        }
    }
}
