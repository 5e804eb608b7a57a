//! CLI Adapter.

mod inspect;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::Term;

use crate::adapters::{LoggingConfig, init_logging};
use crate::domain::{AppError, ConfigOverrides, LoadedConfig};
use crate::domain::configuration::load_config;
use crate::domain::identifiers::validation::split_repository_list;

#[derive(Parser)]
#[command(name = "starbatch")]
#[command(version)]
#[command(
    about = "Star, unstar or check the starred status of a list of GitHub repositories",
    long_about = None
)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Disable colored output (also disabled by NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,
    /// Enable debug output (also enabled by DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(flatten)]
    settings: SettingsArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the configured mode to every repository (default)
    #[clap(visible_alias = "r")]
    Run,
    /// Validate configuration and probe authentication
    #[clap(visible_alias = "c")]
    Check,
    /// Show metadata for one repository
    Info {
        /// owner/name or repository URL
        repository: String,
    },
    /// Show the current API rate limit
    Limits,
    /// Show the token owner and whether its scopes allow starring
    Diagnose,
}

/// Settings that override the environment and the settings file.
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,
    /// Expected login of the token owner (overrides GITHUB_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,
    /// Comma-separated owner/name list (overrides REPOSITORIES)
    #[arg(short = 'r', long = "repos", global = true, value_name = "LIST")]
    repos: Option<String>,
    /// Seconds between repositories (overrides STAR_INTERVAL)
    #[arg(short, long, global = true, value_name = "SECONDS")]
    interval: Option<u64>,
    /// star, unstar or check (overrides MODE)
    #[arg(short, long, global = true)]
    mode: Option<String>,
    /// Process in rate-limit gated batches
    #[arg(long, global = true)]
    batch: bool,
    /// Repositories per batch (implies --batch)
    #[arg(long, global = true, value_name = "N")]
    batch_size: Option<usize>,
    /// Seconds to pause between batches (implies --batch)
    #[arg(long, global = true, value_name = "SECONDS")]
    batch_pause: Option<u64>,
    /// REST API base URL (overrides GITHUB_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

impl SettingsArgs {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            credential: self.token,
            username: self.username,
            repositories: self.repos.as_deref().map(split_repository_list),
            interval_seconds: self.interval,
            mode: self.mode,
            batch: self.batch,
            batch_size: self.batch_size,
            batch_pause_seconds: self.batch_pause,
            api_url: self.api_url,
        }
    }
}

pub fn run() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let logging = LoggingConfig {
        verbose: cli.verbose || env_flag("DEBUG"),
        use_color: !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && Term::stdout().is_term(),
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let overrides = cli.settings.into_overrides();
    let loaded = load_config(cli.config.as_deref(), &overrides)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_repositories(loaded),
        Commands::Check => inspect::run_check(&loaded),
        Commands::Info { repository } => inspect::run_info(&loaded.config, &repository),
        Commands::Limits => inspect::run_limits(&loaded.config),
        Commands::Diagnose => inspect::run_diagnose(&loaded.config),
    }
}

fn run_repositories(loaded: LoadedConfig) -> Result<(), AppError> {
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(config = ?loaded.config, "Resolved configuration");

    crate::app::api::run(&loaded.config)?;
    Ok(())
}

/// Truthy unless unset, empty, `0` or `false`.
fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|value| {
            let value = value.trim();
            !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
        })
        .unwrap_or(false)
}
