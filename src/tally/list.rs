use crate::trello::{ActionWindow, ListSummary, TrelloApi};

use super::{
    error::FetchError,
    registry::{Card, CardRegistry},
    RenderOptions,
};

/// One list of the board, holding its current cards and their tallies.
///
/// A value of this type always carries a populated card set: construction
/// and the card fetch are one step, so a half-built list cannot leak out.
#[derive(Debug)]
pub struct List {
    id: String,
    name: String,
    registry: CardRegistry,
}

impl List {
    /// Builds the list by fetching its current cards. When the fetch fails
    /// the caller gets the error and no list.
    pub async fn populate(summary: ListSummary, api: &dyn TrelloApi) -> Result<Self, FetchError> {
        let mut registry = CardRegistry::new(summary.name.clone());
        registry
            .populate(api, &summary.id)
            .await
            .map_err(|source| FetchError::Cards {
                list: summary.name.clone(),
                source,
            })?;
        Ok(Self {
            id: summary.id,
            name: summary.name,
            registry,
        })
    }

    /// Fetches the list's recent actions and applies them to the cards, in
    /// the order the API returned them. Tallies applied before a failure
    /// are kept.
    pub async fn map_actions(
        &mut self,
        api: &dyn TrelloApi,
        window: &ActionWindow,
    ) -> Result<(), FetchError> {
        let actions = api
            .list_actions(&self.id, window)
            .await
            .map_err(|source| FetchError::Actions {
                list: self.name.clone(),
                source,
            })?;
        for action in &actions {
            self.registry.apply(action);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards of this list, most active first.
    pub fn ranked_cards(&self) -> Vec<&Card> {
        self.registry.ranked()
    }

    pub fn skipped_actions(&self) -> u64 {
        self.registry.skipped()
    }

    /// Appends the list name and one bullet per card to `out`.
    pub(crate) fn render_into(&self, out: &mut String, options: &RenderOptions) {
        let mut cards = self.registry.ranked();
        if options.active_only {
            cards.retain(|card| card.total() > 0);
            if cards.is_empty() {
                return;
            }
        }
        out.push_str(&self.name);
        out.push('\n');
        for card in cards {
            out.push_str(&format!(
                "  * {} {}\n",
                card.name(),
                card.statistics().format(&options.palette)
            ));
        }
    }
}
