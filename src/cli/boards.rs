use anyhow::{Context, Result};

use crate::{
    config::StoredConfig,
    trello::{TrelloApi, TrelloClient},
};

/// Runs the `boards` command: every board the credentials can see, sorted
/// by name, one `id  name` line each.
pub async fn run() -> Result<()> {
    let stored = StoredConfig::load(&crate::config::default_path()?)?;
    let credentials = stored.credentials()?;
    let api =
        TrelloClient::new(credentials).context("could not construct the Trello client")?;

    let mut boards = api
        .member_boards()
        .await
        .context("could not fetch your boards")?;
    boards.sort_by(|a, b| a.name.cmp(&b.name));
    for board in boards {
        println!("{}  {}", board.id, board.name);
    }
    Ok(())
}
