//! CLI command definitions and dispatch.

pub mod console;
pub mod migrate;
pub mod session;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use pharmacy_client::Console;
use pharmacy_core::config::AppConfig;
use pharmacy_core::error::AppError;

/// Pharmacy console command-line client
#[derive(Debug, Parser)]
#[command(name = "pharmacy", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and per-environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment
    #[arg(short, long, env = "PHARMACY_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in to the console API
    Login(session::LoginArgs),
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the navigation menu for a location
    Menu(console::MenuArgs),
    /// Open a console location through its route guard
    Open(console::OpenArgs),
    /// Database migration management
    Migrate,
    /// Account management (direct database access)
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Login(args) => session::login(args, &config).await,
            Commands::Logout => session::logout(&config).await,
            Commands::Whoami => session::whoami(&config, self.format).await,
            Commands::Menu(args) => console::menu(args, &config, self.format).await,
            Commands::Open(args) => console::open(args, &config, self.format).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: a console with its session resolved
pub async fn resolved_console(config: &AppConfig) -> Result<Console, AppError> {
    let console = Console::connect(&config.client)?;
    console.session().initialize().await;
    Ok(console)
}
