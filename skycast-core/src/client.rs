use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config::Config, model::WeatherRecord};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Why a query could not produce a [`WeatherRecord`].
///
/// Exactly one of the two classes reaches the caller per query, and both are
/// terminal for that query: there is no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The network round trip failed or the body was not usable JSON.
    /// The display text is fixed; the underlying cause stays on `source()`.
    #[error("An error occurred while fetching the weather data")]
    Transport(#[source] TransportCause),

    /// The service answered with its own error envelope (unknown location,
    /// bad key, quota). Its message is surfaced verbatim.
    #[error("{0}")]
    Service(String),
}

#[derive(Debug, Error)]
pub enum TransportCause {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("response body was not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("response contained no forecast day")]
    MissingForecast,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportCause::Http(err))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(TransportCause::Json(err))
    }
}

/// Client for the WeatherAPI.com one-day forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: base_url.into(), http: Client::new() }
    }

    /// Build a client from stored configuration. Fails with a hint to run
    /// `skycast configure` when no API key is available.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolved_api_key()?;

        Ok(match &config.base_url {
            Some(url) => Self::with_base_url(api_key, url.clone()),
            None => Self::new(api_key),
        })
    }

    /// Fetch current conditions plus the one-day forecast for `query`.
    ///
    /// One outbound call per invocation, no retries. Every failure mode is
    /// folded into [`FetchError`]; nothing propagates as a panic.
    pub async fn fetch(&self, query: &str) -> Result<WeatherRecord, FetchError> {
        match self.fetch_inner(query).await {
            Ok(record) => {
                debug!(location = %record.location, "fetched weather");
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, query, "weather fetch failed");
                Err(err)
            }
        }
    }

    async fn fetch_inner(&self, query: &str) -> Result<WeatherRecord, FetchError> {
        let url = format!("{}/forecast.json", self.base_url);
        debug!(query, "requesting one-day forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query), ("days", "1")])
            .send()
            .await?;

        // WeatherAPI reports problems as an error envelope in the body, with
        // a non-2xx status. The body decides the outcome, not the status.
        let body = res.text().await?;

        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
            return Err(FetchError::Service(envelope.error.message));
        }

        let parsed: ApiForecastResponse = serde_json::from_str(&body)?;
        into_record(parsed)
    }
}

/// Flatten the nested provider response into a [`WeatherRecord`], dropping
/// everything the record does not list.
fn into_record(res: ApiForecastResponse) -> Result<WeatherRecord, FetchError> {
    let astro = res
        .forecast
        .forecastday
        .into_iter()
        .next()
        .ok_or(FetchError::Transport(TransportCause::MissingForecast))?
        .astro;

    let current = res.current;
    let location = res.location;

    Ok(WeatherRecord {
        location: location.name,
        region: location.region.filter(|r| !r.is_empty()),
        country: location.country,
        is_day: current.is_day == 1,
        icon: current.condition.icon,
        temperature: current.temp_c,
        apparent_temperature: current.feelslike_c,
        condition: current.condition.text,
        uv_index: current.uv,
        sunrise: astro.sunrise,
        wind_speed: current.wind_kph,
        precipitation: current.precip_mm,
        humidity: current.humidity,
        visibility: current.vis_km,
        pressure: current.pressure_mb,
    })
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
    region: Option<String>,
    country: String,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    is_day: u8,
    temp_c: f64,
    feelslike_c: f64,
    condition: ApiCondition,
    uv: f64,
    wind_kph: f64,
    precip_mm: f64,
    humidity: u8,
    vis_km: f64,
    pressure_mb: f64,
}

#[derive(Debug, Deserialize)]
struct ApiAstro {
    sunrise: String,
}

#[derive(Debug, Deserialize)]
struct ApiForecastDay {
    astro: ApiAstro,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastResponse {
    location: ApiLocation,
    current: ApiCurrent,
    forecast: ApiForecast,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "location": {
                "name": "Paris",
                "region": "Ile-de-France",
                "country": "France",
                "lat": 48.87,
                "lon": 2.33,
                "localtime": "2026-08-30 10:00"
            },
            "current": {
                "is_day": 1,
                "temp_c": 21.0,
                "feelslike_c": 19.5,
                "condition": {
                    "text": "Sunny",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png",
                    "code": 1000
                },
                "uv": 5.0,
                "wind_kph": 13.5,
                "precip_mm": 0.2,
                "humidity": 48,
                "vis_km": 10.0,
                "pressure_mb": 1014.0,
                "cloud": 10,
                "gust_kph": 20.2
            },
            "forecast": {
                "forecastday": [{
                    "date": "2026-08-30",
                    "astro": {
                        "sunrise": "06:15 AM",
                        "sunset": "08:31 PM",
                        "moon_phase": "Waxing Gibbous"
                    }
                }]
            }
        })
    }

    #[tokio::test]
    async fn maps_success_response_into_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("key", "KEY"))
            .and(query_param("q", "Paris"))
            .and(query_param("days", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = WeatherApiClient::with_base_url("KEY", server.uri());
        let record = client.fetch("Paris").await.expect("fetch should succeed");

        assert_eq!(record.location, "Paris");
        assert_eq!(record.region.as_deref(), Some("Ile-de-France"));
        assert_eq!(record.country, "France");
        assert!(record.is_day);
        assert_eq!(record.icon, "//cdn.weatherapi.com/weather/64x64/day/113.png");
        assert!((record.temperature - 21.0).abs() < f64::EPSILON);
        assert!((record.apparent_temperature - 19.5).abs() < f64::EPSILON);
        assert_eq!(record.condition, "Sunny");
        assert!((record.uv_index - 5.0).abs() < f64::EPSILON);
        assert_eq!(record.sunrise, "06:15 AM");
        assert!((record.wind_speed - 13.5).abs() < f64::EPSILON);
        assert!((record.precipitation - 0.2).abs() < f64::EPSILON);
        assert_eq!(record.humidity, 48);
        assert!((record.visibility - 10.0).abs() < f64::EPSILON);
        assert!((record.pressure - 1014.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn surfaces_service_error_message_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&server)
            .await;

        let client = WeatherApiClient::with_base_url("KEY", server.uri());
        let err = client.fetch("nowhere").await.unwrap_err();

        match err {
            FetchError::Service(msg) => assert_eq!(msg, "No matching location found."),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error_with_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = WeatherApiClient::with_base_url("KEY", server.uri());
        let err = client.fetch("Paris").await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.to_string(), "An error occurred while fetching the weather data");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Nothing listens on port 1.
        let client = WeatherApiClient::with_base_url("KEY", "http://127.0.0.1:1");
        let err = client.fetch("Paris").await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.to_string(), "An error occurred while fetching the weather data");
    }

    #[tokio::test]
    async fn missing_forecast_day_is_a_transport_error() {
        let mut body = success_body();
        body["forecast"]["forecastday"] = serde_json::json!([]);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = WeatherApiClient::with_base_url("KEY", server.uri());
        let err = client.fetch("Paris").await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Transport(TransportCause::MissingForecast)
        ));
    }

    #[tokio::test]
    async fn empty_region_is_normalized_to_none() {
        let mut body = success_body();
        body["location"]["region"] = serde_json::json!("");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = WeatherApiClient::with_base_url("KEY", server.uri());
        let record = client.fetch("Paris").await.expect("fetch should succeed");

        assert_eq!(record.region, None);
    }
}
