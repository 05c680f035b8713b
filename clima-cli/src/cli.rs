use std::{sync::Arc, sync::Mutex, time::Duration};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use clima_core::{Config, FetchError, WeatherClient, WeatherDelegate, WeatherQuery, WeatherResult};
use inquire::{CustomType, Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Current weather from OpenWeather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and request timeout.
    Configure,

    /// Show current weather for a city or a coordinate pair.
    Show {
        /// City name, e.g. "London" or "New York".
        #[arg(conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        /// Latitude in decimal degrees.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Give up after this many seconds; overrides the configured timeout.
        #[arg(long)]
        timeout: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lat, lon, timeout } => {
                let query = query_from_args(city, lat, lon)?;
                show(query, timeout).await
            }
        }
    }
}

fn query_from_args(
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<WeatherQuery> {
    match (city, lat, lon) {
        (Some(city), None, None) => {
            let city = city.trim();
            if city.is_empty() {
                return Err(anyhow!("City name must not be empty."));
            }
            Ok(WeatherQuery::city(city))
        }
        (None, Some(lat), Some(lon)) => Ok(WeatherQuery::coordinates(lat, lon)),
        _ => Err(anyhow!(
            "Specify either a city or both --lat and --lon.\n\
             Example: `clima show London` or `clima show --lat 51.5 --lon -0.12`."
        )),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(&api_key);

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 = wait indefinitely):")
        .with_default(cfg.timeout_secs.unwrap_or(0))
        .prompt()
        .context("Failed to read timeout")?;
    cfg.timeout_secs = (timeout > 0).then_some(timeout);

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(query: WeatherQuery, timeout: Option<u64>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let mut client = WeatherClient::from_config(&cfg)?;
    if let Some(secs) = timeout {
        client = client.with_timeout((secs > 0).then_some(Duration::from_secs(secs)));
    }

    let view = Arc::new(TerminalView::default());
    client
        .spawn_fetch(query, view.clone())
        .await
        .context("Weather fetch task failed")?;

    match view.take_failure() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

/// Renders fetch outcomes to the terminal.
#[derive(Debug, Default)]
struct TerminalView {
    failure: Mutex<Option<String>>,
}

impl TerminalView {
    fn take_failure(&self) -> Option<String> {
        self.failure.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl WeatherDelegate for TerminalView {
    fn on_weather_updated(&self, result: WeatherResult) {
        println!("{}", render(&result));
    }

    fn on_fetch_failed(&self, error: FetchError) {
        tracing::debug!(?error, "fetch failed");
        if let Ok(mut slot) = self.failure.lock() {
            *slot = Some(format!("{} ({})", error.user_message(), error_chain(&error)));
        }
    }
}

/// `error: cause: cause ...`, each level printed once.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn render(result: &WeatherResult) -> String {
    let condition = result.condition();
    format!(
        "{}: {}°C, {} [{}]",
        result.city_name,
        result.temperature_string(),
        condition.description(),
        condition.symbol_name(),
    )
}
