//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "laps", version)]
#[command(about = "Read LAPS local administrator passwords from Active Directory.")]
pub struct CommandLine {
    /// Config file (default: <config dir>/laps/config.json)
    #[arg(long, global = true, env = "LAPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer lookups from a JSON fixture instead of a directory server
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the LAPS password of one computer
    #[command(alias = "g")]
    Get {
        /// Computer name, as stored in the `name` attribute
        #[arg(value_parser = non_empty)]
        computer_name: String,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// List every computer that has a LAPS password
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Where to search and how to authenticate.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// DNS domain name, e.g. example.com
    #[arg(short, long, env = "LAPS_DOMAIN", value_parser = non_empty)]
    pub domain: Option<String>,

    /// Domain controller to query instead of the domain itself
    #[arg(short, long, env = "LAPS_SERVER")]
    pub server: Option<String>,

    /// Bind name, e.g. admin@example.com
    #[arg(short, long, env = "LAPS_USERNAME", value_parser = non_empty)]
    pub username: Option<String>,

    /// Bind password
    #[arg(short, long, env = "LAPS_PASSWORD", hide_env_values = true, value_parser = non_empty)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Property list or table
    Text,
    /// JSON document
    Json,
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

impl CommandLine {
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
