use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use skycast_core::{Config, OpenWeatherClient, SearchSession, SearchState};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Weather lookup with temperature charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show weather for a location and exit.
    Show {
        /// Location name, e.g. "Paris" or "Paris,FR".
        location: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { location }) => {
                let session = session_from_config()?;
                run_search(&session, &location).await;
                Ok(())
            }
            None => {
                let session = session_from_config()?;
                interactive(&session).await
            }
        }
    }
}

fn session_from_config() -> Result<SearchSession> {
    let config = Config::load()?;
    let client = OpenWeatherClient::new(config.resolved_api_key());
    Ok(SearchSession::new(Box::new(client)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:").prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        println!("No key entered, nothing changed.");
        return Ok(());
    }

    config.set_api_key(api_key.to_string());
    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Prompt-search-render loop. An empty submission re-prompts without
/// touching any state; Esc or Ctrl-C leaves the loop. The prompt stays
/// usable after every error so the user can try again immediately.
async fn interactive(session: &SearchSession) -> Result<()> {
    println!("Weather Forecast");
    println!("Enter a location to get detailed weather information.\n");

    loop {
        let input = match Text::new("Search for a city:").prompt() {
            Ok(value) => value,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if input.trim().is_empty() {
            continue;
        }

        run_search(session, &input).await;
    }

    Ok(())
}

async fn run_search(session: &SearchSession, query: &str) {
    let query = query.trim();
    if query.is_empty() {
        return;
    }

    render::loading(query);
    session.search(query).await;

    match session.state() {
        SearchState::Ready(bundle) => render::weather(&bundle),
        SearchState::Failed(message) => render::error(&message),
        // search() always lands in Ready or Failed for non-empty input.
        SearchState::Idle | SearchState::Loading => {}
    }
}
