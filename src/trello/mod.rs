//! The read-only slice of the Trello REST API this tool talks to.
//!
//! [TrelloApi] is the seam the aggregation engine works against. The real
//! [TrelloClient] speaks HTTPS; the engine's tests drive the generated mock
//! instead.

pub mod client;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

pub use client::TrelloClient;
pub use types::{Action, BoardSummary, CardSummary, ListSummary};

/// Date format Trello accepts for the `since` query parameter.
pub const SINCE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

const ACTION_WINDOW_DAYS: i64 = 14;
const ACTION_LIMIT: u32 = 500;

/// Bounds of an action history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionWindow {
    pub since: DateTime<Utc>,
    pub limit: u32,
}

impl ActionWindow {
    /// The window every aggregation run uses: the last two weeks, capped at
    /// 500 actions per list.
    pub fn recent() -> Self {
        Self {
            since: Utc::now() - Duration::days(ACTION_WINDOW_DAYS),
            limit: ACTION_LIMIT,
        }
    }

    pub(crate) fn since_param(&self) -> String {
        self.since.format(SINCE_LAYOUT).to_string()
    }
}

/// A failed call against the Trello API. The reported URL never includes
/// the query string, which is where the credentials travel.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Trello answered {url} with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode the response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Read operations the aggregation engine needs from Trello.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// Metadata of a single board.
    async fn board(&self, board_id: &str) -> Result<BoardSummary, ApiError>;

    /// Every board the authenticated member can see.
    async fn member_boards(&self) -> Result<Vec<BoardSummary>, ApiError>;

    /// The lists of a board.
    async fn board_lists(&self, board_id: &str) -> Result<Vec<ListSummary>, ApiError>;

    /// The cards currently on a list.
    async fn list_cards(&self, list_id: &str) -> Result<Vec<CardSummary>, ApiError>;

    /// A list's action history, newest first, bounded by `window`.
    async fn list_actions(
        &self,
        list_id: &str,
        window: &ActionWindow,
    ) -> Result<Vec<Action>, ApiError>;
}
