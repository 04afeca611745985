pub mod catalog_config;

pub use catalog_config::CatalogConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Parser)]
#[command(name = "cloudsim")]
#[command(about = "Offline AWS-style command simulator with mock responses")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Catalog TOML file overriding the builtin catalog")]
    pub catalog: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[cfg(feature = "cli")]
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the simulated services
    List,
    /// Show the commands offered by one service
    Commands { service: String },
    /// Open a service and execute a single command
    Exec { service: String, command: String },
    /// Interactive session: open panels and run commands
    Shell,
}
