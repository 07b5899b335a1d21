//! The aggregation engine: discovers a board's lists and cards, folds the
//! recent action history into per-card statistics, and renders the ranked
//! summary.
//!
//! Network bound work fans out into one task per list and joins before the
//! next phase starts. Workers own their list while they run; the board
//! mutates shared state only at the join, so no lock is ever held across a
//! network call. A failing list only ever takes itself out of the result.

pub mod error;
pub mod list;
pub mod registry;
pub mod statistics;

use std::{mem, sync::Arc, time::Duration};

use futures::future::join_all;
use tracing::{info_span, warn, Instrument};

use crate::trello::{ActionWindow, TrelloApi};

pub use error::FetchError;
pub use list::List;
pub use registry::{ApplyOutcome, Card, CardRegistry};
pub use statistics::{ActionCategory, Palette, Statistics};

/// How a rendered board summary should look.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub palette: Palette,
    /// Leave out cards, and then lists, without any recorded activity.
    pub active_only: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: Palette::plain(),
            active_only: false,
        }
    }
}

/// One board's aggregation run.
pub struct Board {
    id: String,
    name: String,
    lists: Vec<List>,
    failures: Vec<FetchError>,
    deadline: Option<Duration>,
    api: Arc<dyn TrelloApi>,
}

impl Board {
    /// Fetches the board metadata. Without it there is nothing to
    /// aggregate, so this failing fails the run.
    pub async fn fetch(api: Arc<dyn TrelloApi>, board_id: &str) -> Result<Self, FetchError> {
        let summary = api
            .board(board_id)
            .await
            .map_err(|source| FetchError::Board {
                board: board_id.to_string(),
                source,
            })?;
        Ok(Self {
            id: summary.id,
            name: summary.name,
            lists: Vec::new(),
            failures: Vec::new(),
            deadline: None,
            api,
        })
    }

    /// Bounds every per-list worker. A list that has not answered in time
    /// is dropped from the summary and surfaced as timed out.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Fetches the board's list set and populates every list concurrently.
    /// A list that fails to populate is excluded; the failure is recorded
    /// and its siblings keep going.
    pub async fn populate_lists(&mut self) -> Result<(), FetchError> {
        let summaries = self
            .api
            .board_lists(&self.id)
            .await
            .map_err(|source| FetchError::Lists {
                board: self.name.clone(),
                source,
            })?;

        let deadline = self.deadline;
        let mut workers = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let api = Arc::clone(&self.api);
            let name = summary.name.clone();
            let span = info_span!("populate_list", list = %summary.name);
            workers.push(tokio::spawn(
                async move {
                    let work = List::populate(summary, api.as_ref());
                    match deadline {
                        None => work.await,
                        Some(limit) => match tokio::time::timeout(limit, work).await {
                            Ok(outcome) => outcome,
                            Err(_) => Err(FetchError::Deadline { list: name, limit }),
                        },
                    }
                }
                .instrument(span),
            ));
        }

        for joined in join_all(workers).await {
            match joined {
                Ok(Ok(list)) => self.lists.push(list),
                Ok(Err(failure)) => self.record_failure(failure),
                Err(join_error) => self.record_failure(FetchError::Worker {
                    reason: join_error.to_string(),
                }),
            }
        }
        Ok(())
    }

    /// Maps the recent action history onto every populated list
    /// concurrently. Each worker owns its list for the duration and hands
    /// it back through the join. A list whose action fetch fails keeps the
    /// tallies it already has and stays in the summary; a list that hits
    /// the deadline is dropped.
    pub async fn map_actions(&mut self, window: &ActionWindow) {
        let deadline = self.deadline;
        let mut workers = Vec::with_capacity(self.lists.len());
        for mut list in mem::take(&mut self.lists) {
            let api = Arc::clone(&self.api);
            let window = window.clone();
            let span = info_span!("map_actions", list = %list.name());
            workers.push(tokio::spawn(
                async move {
                    let name = list.name().to_string();
                    let work = async {
                        let outcome = list.map_actions(api.as_ref(), &window).await;
                        (list, outcome)
                    };
                    match deadline {
                        None => Ok(work.await),
                        Some(limit) => tokio::time::timeout(limit, work)
                            .await
                            .map_err(|_| FetchError::Deadline { list: name, limit }),
                    }
                }
                .instrument(span),
            ));
        }

        for joined in join_all(workers).await {
            match joined {
                Ok(Ok((list, Ok(())))) => self.lists.push(list),
                Ok(Ok((list, Err(failure)))) => {
                    self.lists.push(list);
                    self.record_failure(failure);
                }
                Ok(Err(timed_out)) => self.record_failure(timed_out),
                Err(join_error) => self.record_failure(FetchError::Worker {
                    reason: join_error.to_string(),
                }),
            }
        }
    }

    fn record_failure(&mut self, failure: FetchError) {
        warn!("{failure}");
        self.failures.push(failure);
    }

    /// Renders every surviving list, sorted by name, each with its ranked
    /// cards.
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut lists: Vec<&List> = self.lists.iter().collect();
        lists.sort_by(|a, b| a.name().cmp(b.name()));
        let mut out = String::new();
        for list in lists {
            list.render_into(&mut out, options);
        }
        out
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Populated lists in join order. Rendering sorts by name.
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    /// Every per-list failure recorded during the run.
    pub fn failures(&self) -> &[FetchError] {
        &self.failures
    }

    /// Actions dropped across all lists because their card was gone.
    pub fn skipped_actions(&self) -> u64 {
        self.lists.iter().map(List::skipped_actions).sum()
    }
}
