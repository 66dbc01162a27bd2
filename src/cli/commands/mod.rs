//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod archive;
mod init;
mod migrate;
mod review;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};
use crate::models::ArchivePeriod;

#[derive(Parser)]
#[command(name = "lekh")]
#[command(about = "Import a Blogspot archive into the lekh post store")]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Show the archive months imported by default
    Months,

    /// List candidate post URLs for one archive month
    List {
        /// Archive month as YYYY/MM
        period: ArchivePeriod,
    },

    /// Fetch and parse posts of one month without saving them
    Preview {
        /// Archive month as YYYY/MM
        period: ArchivePeriod,
        /// Maximum number of posts to fetch
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how title and content were extracted from one post page
    Inspect {
        /// Post URL
        url: String,
    },

    /// Import posts into the store (defaults to the configured months)
    Migrate {
        /// Archive months as YYYY/MM
        periods: Vec<ArchivePeriod>,
        /// Maximum number of posts per month (defaults to config)
        #[arg(short, long)]
        max_per_month: Option<usize>,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored posts and flag those with little content
    Verify,

    /// Mark the newest stored posts as featured
    Feature {
        /// Number of posts to feature
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Months => archive::cmd_months(&settings),
        Commands::List { period } => archive::cmd_list(&settings, period).await,
        Commands::Preview {
            period,
            limit,
            json,
        } => archive::cmd_preview(&settings, period, limit, json).await,
        Commands::Inspect { url } => archive::cmd_inspect(&settings, &url).await,
        Commands::Migrate {
            periods,
            max_per_month,
            json,
        } => migrate::cmd_migrate(&settings, periods, max_per_month, json).await,
        Commands::Verify => review::cmd_verify(&settings).await,
        Commands::Feature { count } => review::cmd_feature(&settings, count).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_migrate_periods() {
        let cli = Cli::try_parse_from([
            "lekh",
            "migrate",
            "2025/01",
            "2024-12",
            "--max-per-month",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Migrate {
                periods,
                max_per_month,
                json,
            } => {
                assert_eq!(periods.len(), 2);
                assert_eq!(periods[1].to_string(), "2024/12");
                assert_eq!(max_per_month, Some(5));
                assert!(!json);
            }
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_rejects_bad_period() {
        assert!(Cli::try_parse_from(["lekh", "list", "2025/13"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lekh", "verify", "-v", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
