use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, list, show};
use movora_config::PathManager;
use movora_models::{Category, TrendingWindow};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movora")]
#[command(about = "Movora - browse, search and inspect movies from TMDB")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily); `browse` logs to the config dir by default
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: type to search, use :commands to switch lists
    #[command(long_about = "Start an interactive browsing session. Plain lines are treated as search text and dispatched after the debounce window. Lines starting with ':' switch categories, open movie details and so on; type :help for the full list.")]
    Browse,

    /// Show one curated list
    List {
        /// trending, popular, top-rated or upcoming
        category: Category,

        /// Trending window (only used for the trending list)
        #[arg(long, default_value = "day")]
        window: TrendingWindow,
    },

    /// Search movies by title
    Search {
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show details and top-billed cast for a movie
    Show {
        /// TMDB movie id
        id: u64,
    },

    /// Inspect or change configuration
    #[command(long_about = "Manage Movora configuration. Running without a subcommand shows the current configuration with the API key masked.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (API key masked)
    Show,

    /// Store the TMDB API key in the credentials file
    SetKey {
        /// API key (prompted without echo when omitted)
        #[arg(long)]
        key: Option<String>,
    },

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// The interactive session owns the terminal, so its logs go to a file unless told otherwise
fn log_file_for(command: &Commands, explicit: Option<PathBuf>, paths: &PathManager) -> Option<PathBuf> {
    match (explicit, command) {
        (Some(path), _) => Some(path),
        (None, Commands::Browse) => Some(paths.default_log_file()),
        (None, _) => None,
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = log_file_for(&cli.command, cli.log_file, &PathManager::default());
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse => browse::run_browse(&output).await,
        Commands::List { category, window } => list::run_list(category, window, &output).await,
        Commands::Search { query } => list::run_search(query.join(" "), &output).await,
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output).await
        }
    }
}
