use std::{io::IsTerminal, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use crate::{
    config::StoredConfig,
    tally::{Board, Palette, RenderOptions},
    trello::{ActionWindow, TrelloClient},
};

#[derive(Debug, Parser)]
pub struct ActivityCommand {
    #[arg(help = "Board id. Defaults to the configured board")]
    board: Option<String>,
    #[arg(long, help = "Only show cards with recorded activity")]
    active: bool,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Drop lists that have not answered within this many seconds"
    )]
    timeout: Option<u64>,
}

/// Runs the `activity` command: fetch the board, populate and map every
/// list, print the ranked summary.
pub async fn run(
    ActivityCommand {
        board,
        active,
        timeout,
    }: ActivityCommand,
) -> Result<()> {
    let stored = StoredConfig::load(&crate::config::default_path()?)?;
    let credentials = stored.credentials()?;
    let board_id = stored.board_or(board)?;

    let api = Arc::new(
        TrelloClient::new(credentials).context("could not construct the Trello client")?,
    );
    let window = ActionWindow::recent();

    let mut tallied = Board::fetch(api, &board_id)
        .await?
        .with_deadline(timeout.map(Duration::from_secs));
    tallied.populate_lists().await?;
    tallied.map_actions(&window).await;

    let palette = if std::io::stdout().is_terminal() {
        Palette::colored()
    } else {
        Palette::plain()
    };

    println!(
        "Activity on \"{}\" since {}:",
        tallied.name(),
        window.since.format("%a %b %e %H:%M:%S %Y")
    );
    print!(
        "{}",
        tallied.render(&RenderOptions {
            palette,
            active_only: active,
        })
    );

    report_problems(&tallied);
    Ok(())
}

/// Failures and dropped actions go to stderr so a piped summary stays
/// machine friendly. A partial summary still exits zero.
fn report_problems(board: &Board) {
    for failure in board.failures() {
        warn!(%failure, "list excluded or incomplete");
        eprintln!("warning: {failure}");
    }
    let skipped = board.skipped_actions();
    if skipped > 0 {
        eprintln!("note: {skipped} action(s) referenced cards that are no longer on the board");
    }
}
