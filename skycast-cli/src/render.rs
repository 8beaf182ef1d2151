//! Renders a weather record or an error message into a [`DisplayRegion`].
//!
//! Both entry points are synchronous and idempotent: every call clears the
//! region and rebuilds it, so repeated renders never accumulate. The region
//! is passed in explicitly, which keeps the renderer testable without a
//! terminal.

use std::io::{self, Write};

use skycast_core::WeatherRecord;

use crate::cards::{CARDS, card_body, condition_glyph};

/// Inner width of one detail card.
const CARD_WIDTH: usize = 30;
/// Two cards plus the gap between them; also the hero and header width.
const REGION_WIDTH: usize = 2 * (CARD_WIDTH + 2) + 2;

/// Visual theme, keyed on whether the observation was taken in daylight.
/// Exactly one is active on the region at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    Night,
}

/// The one display surface this program owns. The renderer clears and
/// rebuilds it per call; nothing else writes to it.
#[derive(Debug)]
pub struct DisplayRegion {
    theme: Theme,
    lines: Vec<String>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self { theme: Theme::Day, lines: Vec::new() }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl Default for DisplayRegion {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the region with a centered warning glyph and message.
pub fn render_error(region: &mut DisplayRegion, message: &str) {
    region.clear();
    region.push("");
    region.push(centered(&format!("⚠  {message}")));
    region.push("");
}

/// Replace the region with the full weather view: theme switch, header,
/// hero card, then the fixed grid of detail cards.
pub fn render_weather(region: &mut DisplayRegion, record: &WeatherRecord) {
    region.clear();
    region.theme = if record.is_day { Theme::Day } else { Theme::Night };

    region.push(header_line(record));
    region.push("");
    for line in hero_card(record) {
        region.push(line);
    }
    region.push("");
    for line in card_grid(record) {
        region.push(line);
    }
}

/// `"{location}, {region, }{country}"`, with the region segment omitted
/// entirely when the provider reported none.
fn header_line(record: &WeatherRecord) -> String {
    let region_part = match record.region.as_deref() {
        Some(region) if !region.is_empty() => format!("{region}, "),
        _ => String::new(),
    };

    format!("⌂ {}, {}{}", record.location, region_part, record.country)
}

fn hero_card(record: &WeatherRecord) -> Vec<String> {
    let glyph = condition_glyph(&record.icon, record.is_day);

    boxed(
        REGION_WIDTH - 2,
        &[
            " Current Weather".to_string(),
            format!(" {glyph}  {}°C", record.temperature),
            format!(" {}", record.condition),
        ],
    )
}

/// The eight detail cards, two per row, in table order.
fn card_grid(record: &WeatherRecord) -> Vec<String> {
    let mut out = Vec::new();

    for pair in CARDS.chunks(2) {
        let boxes: Vec<Vec<String>> = pair
            .iter()
            .map(|card| {
                let (icon, value) = card_body(card.title, record);
                let title = if icon.is_empty() {
                    format!(" {}", card.title)
                } else {
                    format!(" {icon} {}", card.title)
                };
                boxed(CARD_WIDTH, &[title, format!(" {value}")])
            })
            .collect();

        match boxes.as_slice() {
            [left, right] => {
                for (l, r) in left.iter().zip(right) {
                    out.push(format!("{l}  {r}"));
                }
            }
            [single] => out.extend(single.iter().cloned()),
            _ => {}
        }
    }

    out
}

fn boxed(width: usize, body: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(width)));
    for line in body {
        out.push(format!("│{}│", fit(line, width)));
    }
    out.push(format!("└{}┘", "─".repeat(width)));
    out
}

/// Pad or truncate to `width` characters. Counts chars, not columns, which
/// is close enough for the glyphs in use.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let pad = width.saturating_sub(out.chars().count());
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

fn centered(text: &str) -> String {
    let pad = REGION_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{:pad$}{text}", "")
}
