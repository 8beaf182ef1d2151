use serde::{Deserialize, Serialize};

/// Query sentinel asking WeatherAPI.com to resolve the caller's own location
/// from the requesting IP address.
pub const AUTO_LOCATION: &str = "auto:ip";

/// Flat, display-ready weather data for one location at one point in time.
///
/// Built fresh per query from the provider response and discarded once
/// rendered; nothing here is cached or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    /// Administrative region, `None` when the provider reports none.
    pub region: Option<String>,
    pub country: String,
    pub is_day: bool,
    /// Provider reference to a condition image, e.g.
    /// `//cdn.weatherapi.com/weather/64x64/day/113.png`.
    pub icon: String,
    /// Air temperature, °C.
    pub temperature: f64,
    /// Perceived temperature, °C.
    pub apparent_temperature: f64,
    pub condition: String,
    pub uv_index: f64,
    /// Time of day as reported by the provider, e.g. `"06:15 AM"`.
    /// The leading zero is kept here; stripping it is a display concern.
    pub sunrise: String,
    /// km/h
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
    /// percent
    pub humidity: u8,
    /// km
    pub visibility: f64,
    /// mb
    pub pressure: f64,
}
