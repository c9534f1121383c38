use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use forecast_core::{Config, Coordinates, ForecastViewController, geolocation, provider_from_config};
use inquire::{Password, Text};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast viewer")]
pub struct Cli {
    /// Log provider traffic and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Startup position, standing in for device geolocation.
#[derive(Debug, Clone, Copy, Args)]
pub struct PositionArgs {
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl PositionArgs {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lon?))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key.
    Configure,

    /// Show current conditions and the 7-day forecast.
    Show {
        /// City name; when absent the startup position is used.
        city: Option<String>,

        /// Date to show, YYYY-MM-DD. Dates outside the forecast load history.
        #[arg(long)]
        date: Option<String>,

        /// Forecast day to select, 0 = today.
        #[arg(long)]
        day: Option<usize>,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// List autocomplete suggestions for partial input.
    Suggest {
        text: String,
    },

    /// Browse forecasts interactively.
    Interactive {
        #[command(flatten)]
        position: PositionArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, date, day, position } => {
                let config = Config::load()?;
                let mut ctl = controller_from_config(&config)?;

                match city {
                    Some(city) => ctl.request_by_city(&city).await,
                    None => {
                        let source = geolocation::source_for(position.coordinates(), config.home);
                        ctl.locate_on_startup(source.as_ref()).await;
                    }
                }

                if ctl.state().weather.is_none() && ctl.state().error.is_none() {
                    bail!(
                        "No location to show.\n\
                         Hint: pass a city, use --lat/--lon, or set [home] in {}.",
                        Config::config_file_path()?.display()
                    );
                }

                if let Some(day) = day {
                    ctl.select_day(day);
                }
                if let Some(date) = date {
                    let date = parse_date(&date)?;
                    ctl.on_date_change(&date).await;
                }

                print!("{}", render::render_report(&ctl));

                match ctl.state().error {
                    Some(err) => Err(err.into()),
                    None => Ok(()),
                }
            }
            Command::Suggest { text } => {
                let config = Config::load()?;
                let mut ctl = controller_from_config(&config)?;

                ctl.update_suggestions(&text).await;

                if ctl.state().suggestions.is_empty() {
                    println!("No matches.");
                }
                for entry in &ctl.state().suggestions {
                    println!("{entry}");
                }
                Ok(())
            }
            Command::Interactive { position } => {
                let config = Config::load()?;
                let ctl = controller_from_config(&config)?;
                let source = geolocation::source_for(position.coordinates(), config.home);

                interactive::run(ctl, source.as_ref()).await
            }
        }
    }
}

fn controller_from_config(config: &Config) -> Result<ForecastViewController> {
    let provider = provider_from_config(config)?;
    tracing::debug!(base_url = config.base_url(), "using weatherapi.com provider");
    Ok(ForecastViewController::new(Arc::from(provider)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = Some(base_url.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Validate a user-entered date and normalize it to zero-padded `YYYY-MM-DD`,
/// which the controller compares lexically.
pub fn parse_date(input: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{input}', expected YYYY-MM-DD"))?;

    Ok(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_pads_components() {
        assert_eq!(parse_date("2025-3-7").unwrap(), "2025-03-07");
        assert_eq!(parse_date(" 2025-03-07 ").unwrap(), "2025-03-07");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("tomorrow").unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["forecast", "show", "--lat", "-33.87", "--lon", "151.21"])
            .unwrap();

        match cli.command {
            Command::Show { city, position, .. } => {
                assert!(city.is_none());
                assert_eq!(position.coordinates(), Some(Coordinates::new(-33.87, 151.21)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["forecast", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["forecast", "suggest", "lon", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
