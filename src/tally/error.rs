use std::time::Duration;

use thiserror::Error;

use crate::trello::ApiError;

/// A collaborator call that failed, tagged with the entity it was fetched
/// for. The list scoped variants are recorded and reported without aborting
/// the rest of the board.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not fetch board {board}")]
    Board {
        board: String,
        #[source]
        source: ApiError,
    },
    #[error("could not fetch the lists of board \"{board}\"")]
    Lists {
        board: String,
        #[source]
        source: ApiError,
    },
    #[error("could not fetch the cards of list \"{list}\"")]
    Cards {
        list: String,
        #[source]
        source: ApiError,
    },
    #[error("could not fetch recent actions of list \"{list}\"")]
    Actions {
        list: String,
        #[source]
        source: ApiError,
    },
    #[error("list \"{list}\" did not answer within the {}s deadline", .limit.as_secs())]
    Deadline { list: String, limit: Duration },
    #[error("a list worker failed: {reason}")]
    Worker { reason: String },
}
