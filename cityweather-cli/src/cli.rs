use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, check_partial_country_code};
use inquire::{InquireError, Password, PasswordDisplayMode, Text, validator::Validation};

use crate::{
    render::{render_lookup, render_state, user_message},
    session::{QueryState, lookup},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Optional 2-letter ISO country code, e.g. "GB".
        #[arg(long, short)]
        country: Option<String>,

        /// Print the validated reading as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until Esc or Ctrl-C.
    Search,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, country, json } => {
                let config = Config::load()?.with_env_overrides();
                show(&config, &city, country.as_deref(), json).await
            }
            Command::Search => {
                let config = Config::load()?.with_env_overrides();
                search(&config).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("API key must not be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(config: &Config, city: &str, country: Option<&str>, json: bool) -> anyhow::Result<()> {
    let result = lookup(config, city, country, print_loading).await;

    match result.state {
        QueryState::Ready(reading) if json => {
            println!("{}", serde_json::to_string_pretty(&reading)?);
            Ok(())
        }
        QueryState::Failed(err) => {
            let msg = user_message(&err);
            Err(anyhow::Error::new(err).context(msg))
        }
        _ => {
            print!("{}", render_lookup(&result, Utc::now()));
            Ok(())
        }
    }
}

async fn search(config: &Config) -> anyhow::Result<()> {
    loop {
        let city = match Text::new("City:")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("Please enter a city name".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt_skippable()
        {
            Ok(Some(city)) => city,
            Ok(None) | Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read city"),
        };

        let country = match Text::new("Country code:")
            .with_help_message(
                "Optional 2-letter code (e.g., US, GB, CA). Without one, the most populous city with that name is used.",
            )
            .with_validator(|input: &str| {
                if check_partial_country_code(input).allows_submit() {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        "Please enter a valid country code (e.g., US, GB, CA)".into(),
                    ))
                }
            })
            .prompt_skippable()
        {
            Ok(country) => country.filter(|cc| !cc.trim().is_empty()),
            Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read country code"),
        };

        let result = lookup(config, &city, country.as_deref(), print_loading).await;
        println!("{}", render_lookup(&result, Utc::now()));
    }
}

fn print_loading() {
    eprintln!("{}", render_state(&QueryState::Loading, None, Utc::now()));
}
