use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use tracing::warn;

use skycast_core::{AUTO_LOCATION, Config, WeatherApiClient};

use crate::render::{DisplayRegion, render_error, render_weather};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the platform config file.
    Configure,

    /// Look up weather for a location once and exit.
    Show {
        /// Place name, coordinates, or "auto:ip" for your own location.
        #[arg(default_value = AUTO_LOCATION)]
        location: String,

        /// Print the raw weather record as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { location, json }) => show(&location, json).await,
            // No subcommand: interactive session, like opening the page.
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("WeatherAPI.com key:")
        .with_help_message("Get one at https://www.weatherapi.com")
        .prompt()
        .context("Failed to read API key")?;
    let key = key.trim();
    anyhow::ensure!(!key.is_empty(), "API key must not be empty");

    config.set_api_key(key.to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(location: &str, json: bool) -> anyhow::Result<()> {
    let client = WeatherApiClient::from_config(&Config::load()?)?;

    if json {
        let record = client.fetch(location).await?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let mut region = DisplayRegion::new();
    let mut out = io::stdout();
    render_info(&client, &mut region, location, &mut out).await
}

/// Interactive session: an automatic own-location lookup first, then a
/// location prompt loop. Empty input (or Esc) ends the session.
async fn interactive() -> anyhow::Result<()> {
    let client = WeatherApiClient::from_config(&Config::load()?)?;
    let mut region = DisplayRegion::new();
    let mut out = io::stdout();

    render_info(&client, &mut region, AUTO_LOCATION, &mut out).await?;

    loop {
        let input = Text::new("Search location:")
            .with_help_message("Empty input quits")
            .prompt_skippable()
            .context("Failed to read location")?;

        let Some(location) = input else { break };
        let location = location.trim().to_string();
        if location.is_empty() {
            break;
        }

        render_info(&client, &mut region, &location, &mut out).await?;
    }

    Ok(())
}

/// One lookup, start to finish: pending indicator on, await the fetch,
/// indicator off, hand the outcome to the renderer, paint the region.
/// Both trigger paths (startup lookup and prompt submission) come through
/// here, strictly one at a time.
async fn render_info(
    client: &WeatherApiClient,
    region: &mut DisplayRegion,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    indicator_on(out, query)?;
    let outcome = client.fetch(query).await;
    indicator_off(out)?;

    match outcome {
        Ok(record) => render_weather(region, &record),
        Err(err) => {
            warn!(%err, query, "weather lookup failed");
            render_error(region, &err.to_string());
        }
    }

    region.write_to(out).context("Failed to write to terminal")?;
    Ok(())
}

fn indicator_on(out: &mut impl Write, query: &str) -> anyhow::Result<()> {
    write!(out, "Looking up {query} …").context("Failed to write to terminal")?;
    out.flush().context("Failed to flush terminal")?;
    Ok(())
}

fn indicator_off(out: &mut impl Write) -> anyhow::Result<()> {
    // Erase the indicator line before the region is painted over it.
    write!(out, "\r\x1b[2K").context("Failed to write to terminal")?;
    Ok(())
}
