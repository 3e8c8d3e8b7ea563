use clap::{Parser, Subcommand};
use otto_core::CoreError;

mod commands;

#[derive(Parser)]
#[command(name = "otto", version, about = "Otto daily training planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's challenge, progress and rating
    Today {
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Short diagnostic summary of today
    Status,
    /// Weekly plan editing
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Generate today's challenge
    Generate {
        /// Discard an existing challenge for today and generate a new one
        #[arg(long)]
        force: bool,
    },
    /// Try today's generation again after a failure
    Retry,
    /// Rating dial
    Dial {
        #[command(subcommand)]
        action: commands::dial::DialAction,
    },
    /// Submit the committed rating for today
    Submit,
    /// Rebuild the progress metric from stored results
    Recompute,
    /// Resolve an address such as "#/profile/day/2026-10-16"
    Route {
        address: String,
        /// Print the resolved screen as JSON
        #[arg(long)]
        json: bool,
    },
    /// Weekly profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete all stored data and start over
    Reset,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { json } => commands::today::run(json),
        Commands::Status => commands::today::status(),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Generate { force } => commands::generate::run(force),
        Commands::Retry => commands::generate::retry(),
        Commands::Dial { action } => commands::dial::run(action),
        Commands::Submit => commands::score::submit(),
        Commands::Recompute => commands::score::recompute(),
        Commands::Route { address, json } => commands::route::run(&address, json),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset => commands::reset::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if e.downcast_ref::<CoreError>().is_some_and(CoreError::is_retryable) {
            eprintln!("Run `otto retry` to try again.");
        }
        std::process::exit(1);
    }
}
