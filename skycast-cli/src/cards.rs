//! Lookup table driving the detail-card grid.
//!
//! Each card knows its title, its glyph, and how to format its value from a
//! [`WeatherRecord`]. Grid order is the table order and never depends on the
//! input; looking up an unknown title is an explicit table miss.

use skycast_core::WeatherRecord;

pub struct CardSpec {
    pub title: &'static str,
    pub icon: &'static str,
    pub value: fn(&WeatherRecord) -> String,
}

pub const CARDS: [CardSpec; 8] = [
    CardSpec { title: "UV Index", icon: "☀", value: uv_value },
    CardSpec { title: "Sunrise", icon: "🌅", value: sunrise_value },
    CardSpec { title: "Wind", icon: "💨", value: wind_value },
    CardSpec { title: "Precipitation", icon: "💧", value: precipitation_value },
    CardSpec { title: "Feels Like", icon: "🌡", value: feels_like_value },
    CardSpec { title: "Humidity", icon: "〰", value: humidity_value },
    CardSpec { title: "Visibility", icon: "👁", value: visibility_value },
    CardSpec { title: "Pressure", icon: "⏲", value: pressure_value },
];

/// Glyph and formatted value for a card title; a miss yields empty text and
/// no glyph. Not reachable from [`CARDS`] itself, which is the only normal
/// source of titles.
pub fn card_body(title: &str, record: &WeatherRecord) -> (&'static str, String) {
    match CARDS.iter().find(|card| card.title == title) {
        Some(card) => (card.icon, (card.value)(record)),
        None => ("", String::new()),
    }
}

fn uv_value(record: &WeatherRecord) -> String {
    record.uv_index.to_string()
}

fn sunrise_value(record: &WeatherRecord) -> String {
    strip_leading_zero(&record.sunrise).to_string()
}

fn wind_value(record: &WeatherRecord) -> String {
    format!("{} km/h", record.wind_speed)
}

fn precipitation_value(record: &WeatherRecord) -> String {
    format!("{} mm", record.precipitation)
}

fn feels_like_value(record: &WeatherRecord) -> String {
    format!("{}°C", record.apparent_temperature)
}

fn humidity_value(record: &WeatherRecord) -> String {
    format!("{}%", record.humidity)
}

fn visibility_value(record: &WeatherRecord) -> String {
    format!("{} km", record.visibility)
}

fn pressure_value(record: &WeatherRecord) -> String {
    format!("{} mb", record.pressure)
}

/// The provider zero-pads times ("06:15 AM"); drop the pad for display.
pub fn strip_leading_zero(time: &str) -> &str {
    time.strip_prefix('0').unwrap_or(time)
}

/// Glyph for the hero card, keyed on the condition code embedded in the
/// provider's icon reference (e.g. `.../day/113.png`).
pub fn condition_glyph(icon: &str, is_day: bool) -> &'static str {
    let code = icon
        .rsplit('/')
        .next()
        .and_then(|file| file.strip_suffix(".png"))
        .unwrap_or("");

    match code {
        "113" if is_day => "☀",
        "113" => "🌙",
        "116" => "⛅",
        "119" | "122" => "☁",
        "143" | "248" | "260" => "🌫",
        "176" | "263" | "266" | "293" | "296" | "299" | "302" | "305" | "308" | "353" | "356"
        | "359" => "🌧",
        "179" | "182" | "185" | "227" | "230" | "323" | "326" | "329" | "332" | "335" | "338"
        | "368" | "371" => "🌨",
        "200" | "386" | "389" | "392" | "395" => "⛈",
        _ => "🌡",
    }
}
