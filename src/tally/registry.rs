//! Card bookkeeping for a single list: which cards the list currently
//! holds, and how the list's action history lands on their counters.

use std::collections::HashMap;

use tracing::warn;

use crate::trello::{Action, ApiError, TrelloApi};

use super::statistics::{ActionCategory, Statistics};

/// A card together with its tallied activity.
#[derive(Debug, Clone)]
pub struct Card {
    id: String,
    name: String,
    stats: Statistics,
}

impl Card {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            stats: Statistics::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn total(&self) -> u32 {
        self.stats.total()
    }
}

/// What [CardRegistry::apply] did with one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The action resolved to a card and was counted.
    Tallied,
    /// A list level event with no card to attribute it to.
    ListEvent,
    /// The action carries no card reference at all.
    NoCardRef,
    /// The referenced card is no longer on this list; the action was
    /// dropped.
    MissingCard,
}

/// The cards belonging to one list, keyed by card id.
#[derive(Debug, Default)]
pub struct CardRegistry {
    list_name: String,
    cards: HashMap<String, Card>,
    skipped: u64,
}

impl CardRegistry {
    pub fn new(list_name: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
            cards: HashMap::new(),
            skipped: 0,
        }
    }

    /// Fetches the list's current cards and adds an entry for each. Nothing
    /// is added when the fetch fails.
    pub async fn populate(&mut self, api: &dyn TrelloApi, list_id: &str) -> Result<(), ApiError> {
        for card in api.list_cards(list_id).await? {
            self.cards.insert(card.id.clone(), Card::new(card.id, card.name));
        }
        Ok(())
    }

    /// Resolves an action to its card and tallies it. An action whose card
    /// has left the list since it happened (moved or archived) is dropped
    /// with a diagnostic; that is an ordinary occurrence between the two
    /// fetches, not a failure.
    pub fn apply(&mut self, action: &Action) -> ApplyOutcome {
        let card_id = action.card_id();

        if let Some(card) = card_id.and_then(|id| self.cards.get_mut(id)) {
            let category = match ActionCategory::classify(&action.action_type) {
                Some(category) => category,
                None => {
                    warn!(
                        action_type = %action.action_type,
                        "unmapped action type, counting it as an update"
                    );
                    ActionCategory::Update
                }
            };
            card.stats.tally(category);
            return ApplyOutcome::Tallied;
        }

        if matches!(action.action_type.as_str(), "updateList" | "createList") {
            return ApplyOutcome::ListEvent;
        }
        let Some(card_id) = card_id else {
            return ApplyOutcome::NoCardRef;
        };

        warn!(
            card = card_id,
            action_type = %action.action_type,
            list = %self.list_name,
            "dropping an action whose card is no longer on this list"
        );
        self.skipped += 1;
        ApplyOutcome::MissingCard
    }

    /// Cards ordered by activity, highest total first. Ties fall back to
    /// the card id so the output is stable between runs.
    pub fn ranked(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.id().cmp(b.id())));
        cards
    }

    /// Number of actions dropped because their card could not be resolved.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
