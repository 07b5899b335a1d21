//! Command line summary of what recently happened on a Trello board.
//! Fetches the board's lists, cards, and the last two weeks of actions
//! concurrently, tallies every action onto its card, and prints each list
//! with its most active cards first.
//!

pub mod cli;
pub mod config;
pub mod tally;
pub mod trello;
pub mod utils;
