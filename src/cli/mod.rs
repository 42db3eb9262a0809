//! CLI module for the user registry
//!
//! Provides subcommands for working with the configured user store:
//! - `list`: print all users
//! - `create`: register a new user
//! - `update`: replace a user's name and email

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::UserId;
use crate::infrastructure::logging;

/// User registry - validated user creation and updates
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Storage backend (overrides config)
    #[arg(long, global = true, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Path of the JSON user file (overrides config)
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Log filter, e.g. "debug" or "user_registry=trace" (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all users
    List,

    /// Register a new user
    Create(CreateArgs),

    /// Replace the name and email of an existing user
    Update(UpdateArgs),
}

/// Arguments for the create command
#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Capitalized name, e.g. "Anna-Maria"
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,
}

/// Arguments for the update command
#[derive(Args, Clone)]
pub struct UpdateArgs {
    /// ID of the user to update
    #[arg(long)]
    pub id: u64,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,
}

/// Load configuration, apply CLI overrides and execute the command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    apply_overrides(&mut config, &cli);
    logging::init_logging(&config.logging)?;

    let service = crate::create_user_service(&config.storage).await?;

    match cli.command {
        Command::List => print_json(&service.get_all_users().await?),
        Command::Create(args) => print_json(&service.create_user(&args.name, &args.email).await?),
        Command::Update(args) => print_json(
            &service
                .update_user(UserId::new(args.id), &args.name, &args.email)
                .await?,
        ),
    }
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(backend) = cli.storage {
        config.storage.backend = backend;
    }

    if let Some(path) = &cli.path {
        config.storage.path = path.clone();
    }

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
