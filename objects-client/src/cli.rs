use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use tracing::{debug, warn};

use crate::config::{Config, ConfigSource};
use crate::fixtures::load_fixtures;
use crate::suite::Suite;
use crate::util::logging::init_logging;

#[derive(Parser)]
#[command(name = "objects")]
#[command(version, about = "Spreadsheet-driven CRUD checks for the objects REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the create/read/update/delete sequence
    Run(SourceArgs),

    /// Print the rows loaded from the fixture sheet as JSON
    Fixtures(SourceArgs),

    /// Inspect or reset the saved configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Delete the saved config file
    Reset,
    /// Write the effective configuration, including any overrides, to the
    /// config file
    Init(SourceArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Config file to use instead of the user config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spreadsheet holding the fixture rows
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Worksheet name inside the fixture spreadsheet
    #[arg(long)]
    sheet: Option<String>,

    /// Objects collection URL
    #[arg(long)]
    api_url: Option<String>,

    /// Malformed URL prefix expected to return 404
    #[arg(long)]
    wrong_url: Option<String>,
}

impl SourceArgs {
    fn resolve(self) -> anyhow::Result<(Config, ConfigSource)> {
        let (mut config, source) = match &self.config {
            Some(path) => {
                let mut config = Config::load_from(path)?;
                config.apply_env(|key| std::env::var(key).ok());
                (config, ConfigSource::File(path.clone()))
            }
            None => Config::load_with_source()?,
        };
        if let Some(fixture) = self.fixture {
            config.fixture_path = fixture;
        }
        if let Some(sheet) = self.sheet {
            config.sheet_name = sheet;
        }
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }
        if let Some(wrong_url) = self.wrong_url {
            config.wrong_url = wrong_url;
        }
        Ok((config, source))
    }

    /// Resolve the config, then start logging at its level and say where it
    /// came from.
    fn resolve_and_init_logging(self) -> anyhow::Result<Config> {
        let (config, source) = self.resolve()?;
        init_logging(&config.log_level);
        match source {
            ConfigSource::File(path) => debug!("Using config file {}", path.display()),
            ConfigSource::Defaults => warn!("Config file not found, using defaults"),
        }
        Ok(config)
    }
}

pub async fn cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = args.resolve_and_init_logging()?;

            let suite = Suite::from_config(config)?;
            let report = suite.run().await;
            println!("{}", report);
            if !report.is_success() {
                bail!(
                    "{} of {} cases failed",
                    report.failed(),
                    report.outcomes.len()
                );
            }
        }
        Commands::Fixtures(args) => {
            let config = args.resolve_and_init_logging()?;

            let fixtures = load_fixtures(&config.fixture_path, &config.sheet_name)?;
            let json = serde_json::to_string_pretty(fixtures.rows())
                .context("Failed to serialize rows")?;
            println!("{}", json);
        }
        Commands::Config(ConfigCommands::Init(args)) => {
            let config = args.resolve_and_init_logging()?;
            config.save()?;
        }
        Commands::Config(ConfigCommands::Show) => {
            init_logging("info");
            let config = Config::load()?;
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", json);
        }
        Commands::Config(ConfigCommands::Path) => {
            println!("{}", Config::config_file_path()?.display());
        }
        Commands::Config(ConfigCommands::Reset) => {
            init_logging("info");
            Config::clear()?;
        }
    }

    Ok(())
}
