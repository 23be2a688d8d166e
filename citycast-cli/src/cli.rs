use anyhow::Context;
use chrono::{Local, NaiveDate};
use citycast_core::{Config, Dashboard, Locale, WeatherProvider, provider_from_config};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather dashboard (OpenWeatherMap)")]
pub struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Display language, "korean" or "english"; overrides the config file.
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Render the dashboard once for a city and exit.
    Show {
        /// City name, e.g. "Seoul".
        city: String,
    },

    /// Prompt for cities repeatedly, like the input box of a dashboard.
    Interactive,
}

/// One submission of the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    City(String),
    ZoomIn,
    ZoomOut,
    Quit,
}

impl Input {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "+" => Input::ZoomIn,
            "-" => Input::ZoomOut,
            "q" | ":q" => Input::Quit,
            city => Input::City(city.to_string()),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = load_config(self.locale)?;
                let mut dashboard = Dashboard::new(provider_from_config(&config), &config);
                let view = dashboard.render(&city, today()).await;
                print!("{}", render::view(&view, &dashboard.texts(), dashboard.locale()));
                Ok(())
            }
            Command::Interactive => {
                let config = load_config(self.locale)?;
                let dashboard = Dashboard::new(provider_from_config(&config), &config);
                interactive(dashboard).await
            }
        }
    }
}

fn load_config(locale: Option<Locale>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(locale) = locale {
        config.display.locale = locale;
    }
    tracing::debug!(
        locale = ?config.display.locale,
        base_url = %config.api.base_url,
        "configuration loaded"
    );
    Ok(config)
}

fn configure() -> anyhow::Result<()> {
    // Load the file alone so an API key from the environment is not written out.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save_to(&path)?;

    tracing::info!(path = %path.display(), "API key saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn interactive<P: WeatherProvider>(mut dashboard: Dashboard<P>) -> anyhow::Result<()> {
    let texts = dashboard.texts();
    println!("{}\n", texts.title);

    let view = dashboard.render("", today()).await;
    print!("{}", render::view(&view, &texts, dashboard.locale()));

    loop {
        let raw = match Text::new(texts.input_label)
            .with_help_message("+/- zoom the map, q or Esc to quit")
            .prompt()
        {
            Ok(raw) => raw,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        let city = match Input::parse(&raw) {
            Input::Quit => break,
            Input::ZoomIn => {
                dashboard.session_mut().zoom_in();
                dashboard.session().previous_city().to_string()
            }
            Input::ZoomOut => {
                dashboard.session_mut().zoom_out();
                dashboard.session().previous_city().to_string()
            }
            Input::City(city) => city,
        };

        let view = dashboard.render(&city, today()).await;
        print!("{}", render::view(&view, &texts, dashboard.locale()));
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_parses_zoom_and_quit() {
        assert_eq!(Input::parse(" + "), Input::ZoomIn);
        assert_eq!(Input::parse("-"), Input::ZoomOut);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse(" Seoul "), Input::City("Seoul".into()));
        assert_eq!(Input::parse(""), Input::City(String::new()));
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["citycast"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn show_parses_city_and_global_flags() {
        let cli = Cli::try_parse_from(["citycast", "show", "Busan", "--locale", "english", "-vv"])
            .unwrap();

        assert_eq!(cli.locale, Some(Locale::English));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Show { city }) if city == "Busan"));
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(Cli::try_parse_from(["citycast", "--locale", "klingon", "show", "Seoul"]).is_err());
    }
}
