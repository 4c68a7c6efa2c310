//! CLI commands
//!
//! Each command builds the application, bootstraps the session, then acts.

pub mod auth;
pub mod requests;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use conecta_core::{App, Config};

#[derive(Debug, Parser)]
#[command(name = "conecta", version, about = "Conecta con tu Ayuntamiento")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, env = "CONECTA_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current session
    Status,
    /// Sign in with a username and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "CONECTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored credentials
    Logout,
    /// Create a new account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "CONECTA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        birth_date: String,
    },
    /// Authenticated GET against an API path, printed as JSON
    Get {
        /// Path relative to the API root, e.g. `eventos/`
        path: String,
    },
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.api_url)?;
    let app = App::new(config).context("Failed to open application state")?;

    match cli.command {
        Command::Status => auth::status(&app).await,
        Command::Login { username, password } => auth::login(&app, &username, &password).await,
        Command::Logout => auth::logout(&app).await,
        Command::Register {
            username,
            password,
            birth_date,
        } => auth::register(&app, username, password, &birth_date).await,
        Command::Get { path } => requests::get(&app, &path).await,
    }
}

fn load_config(path: Option<&std::path::Path>, api_url: Option<String>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let mut config = config.with_env_overrides();
    if let Some(url) = api_url {
        config.api_base_url = url;
    }

    Ok(config)
}
