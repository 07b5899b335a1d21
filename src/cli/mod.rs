pub mod activity;
pub mod boards;
pub mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::utils::{
    dir::state_dir,
    logging::{enable_logging, CLI_PREFIX},
};

use activity::ActivityCommand;
use config::ConfigCommand;

#[derive(Parser, Debug)]
#[command(name = "Boardtally", version, long_about = None)]
#[command(about = "Summaries of recent activity on your Trello boards", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show a board's lists with their most active cards first")]
    Activity {
        #[command(flatten)]
        command: ActivityCommand,
    },
    #[command(about = "List the boards your credentials can see")]
    Boards {},
    #[command(about = "Show or update the stored credentials and default board")]
    Config {
        #[command(flatten)]
        command: ConfigCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &state_dir()?, logging_level, args.log)?;

    match args.commands {
        Commands::Activity { command } => activity::run(command).await,
        Commands::Boards {} => boards::run().await,
        Commands::Config { command } => config::run(command),
    }
}
