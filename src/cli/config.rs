use anyhow::Result;
use clap::Parser;

use crate::config::{default_path, StoredConfig};

#[derive(Debug, Parser)]
pub struct ConfigCommand {
    #[arg(long, value_name = "KEY", help = "Trello application key")]
    key: Option<String>,
    #[arg(long, value_name = "TOKEN", help = "Trello API token")]
    token: Option<String>,
    #[arg(
        long,
        value_name = "BOARD",
        help = "Board used when `activity` gets no id"
    )]
    board: Option<String>,
}

/// Runs the `config` command. Without flags the stored values are printed;
/// with flags they are updated and written back.
pub fn run(ConfigCommand { key, token, board }: ConfigCommand) -> Result<()> {
    let path = default_path()?;
    let mut stored = StoredConfig::load(&path)?;

    if key.is_none() && token.is_none() && board.is_none() {
        println!("config file: {}", path.display());
        println!("app key: {}", stored.app_key.as_deref().unwrap_or("(unset)"));
        println!("token:   {}", mask(stored.token.as_deref()));
        println!("board:   {}", stored.board.as_deref().unwrap_or("(unset)"));
        return Ok(());
    }

    if let Some(key) = key {
        stored.app_key = Some(key);
    }
    if let Some(token) = token {
        stored.token = Some(token);
    }
    if let Some(board) = board {
        stored.board = Some(board);
    }
    stored.save(&path)?;
    println!("Saved {}", path.display());
    Ok(())
}

/// The token never gets echoed back in full.
fn mask(token: Option<&str>) -> String {
    match token {
        None => "(unset)".to_string(),
        Some(token) if token.len() <= 8 => "********".to_string(),
        Some(token) => {
            let head: String = token.chars().take(4).collect();
            format!("{head}…")
        }
    }
}
