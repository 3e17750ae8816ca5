use crate::commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::log_debug;
use crate::providers::Provider;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum, crate_version};
use colored::Colorize;
use std::path::PathBuf;

const LOG_FILE: &str = "story-mapper-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "story-mapper: turn a product description into a story map",
    long_about = "story-mapper builds an epic, feature and task story map from a free-text product description, using DeepSeek, Gemini or built-in templates.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, summaries, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Output format for generated story maps
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented outline
    #[default]
    Text,
    /// Pretty JSON
    Json,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Generate a story map from a product description
    #[command(
        about = "Generate a story map from a product description",
        long_about = "Generate epics, features and tasks for a product description. If the selected provider is not configured or fails, built-in templates are used instead."
    )]
    Generate {
        #[command(flatten)]
        common: CommonParams,

        /// Free-text product description
        #[arg(help = "Free-text product description")]
        description: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
        format: OutputFormat,

        /// Write the JSON export to a file instead of printing
        #[arg(short, long, help = "Write the JSON export to a file instead of printing")]
        output: Option<PathBuf>,
    },

    /// List providers and whether they are configured
    #[command(about = "List providers and whether they are configured")]
    Providers,

    /// Configure providers and defaults
    #[command(
        about = "Configure providers and defaults",
        long_about = "Configure story-mapper with provider settings. Settings apply to the provider given with --provider, which also becomes the default."
    )]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Set API key for the specified provider
        #[arg(long, help = "Set API key for the specified provider")]
        api_key: Option<String>,

        /// Set model for the specified provider
        #[arg(long, help = "Set model for the specified provider")]
        model: Option<String>,

        /// Set endpoint root for the specified provider
        #[arg(long, help = "Set endpoint root for the specified provider")]
        base_url: Option<String>,

        /// Set output token budget for the specified provider
        #[arg(long, help = "Set output token budget for the specified provider")]
        max_tokens: Option<u32>,

        /// Set additional parameters for the specified provider
        #[arg(
            long,
            help = "Set additional parameters for the specified provider (key=value)"
        )]
        param: Option<Vec<String>>,

        /// Set the mock provider's artificial delay in milliseconds
        #[arg(long, help = "Set the mock provider's artificial delay in milliseconds")]
        mock_delay_ms: Option<u64>,
    },
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including available providers
fn get_dynamic_help() -> String {
    let providers_list = Provider::all_names()
        .iter()
        .map(|p| format!("{}", p.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nAvailable Providers: {providers_list}")
}

/// Load configuration, degrading to defaults plus environment on error
fn load_config() -> Config {
    let lookup = |key: &str| std::env::var(key).ok();
    let (config, error) = match Config::get_config_path() {
        Ok(path) => Config::load_or_default(&path, lookup),
        Err(e) => {
            let mut config = Config::default();
            config.apply_env_overrides(lookup);
            (config, Some(e))
        }
    };

    if let Some(e) = error {
        ui::print_warning(&format!("Ignoring configuration file: {e}"));
    }
    config
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if let Err(e) = crate::logger::init() {
        eprintln!("Warning: {e}");
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    let config = load_config();

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
        crate::logger::set_verbose_logging(config.verbose_logging);
        if config.verbose_logging {
            log_debug!("Verbose logging enabled - will show HTTP client logs");
        }
    } else {
        crate::logger::disable_logging();
    }

    if let Some(command) = cli.command {
        handle_command(command, config).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["story-mapper", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand
pub async fn handle_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            common,
            description,
            format,
            output,
        } => {
            let provider = common.resolve_provider(&config);
            commands::handle_generate_command(&config, provider, &description, format, output)
                .await
        }
        Commands::Providers => {
            commands::handle_providers_command(&config);
            Ok(())
        }
        Commands::Config {
            common,
            api_key,
            model,
            base_url,
            max_tokens,
            param,
            mock_delay_ms,
        } => {
            log_debug!(
                "Handling 'config' command with provider: {:?}, model: {:?}, base_url: {:?}, max_tokens: {:?}, param: {:?}",
                common.provider,
                model,
                base_url,
                max_tokens,
                param
            );
            commands::handle_config_command(
                config,
                commands::ConfigChanges {
                    provider: common.provider,
                    api_key,
                    model,
                    base_url,
                    max_tokens,
                    param,
                    mock_delay_ms,
                },
            )
        }
    }
}
