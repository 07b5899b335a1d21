//! Classification of raw actions into the categories the summary counts,
//! and the per-card counter those categories accumulate into.

use ansi_term::{Colour, Style};

/// Category of a single board action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Comment,
    Update,
    Create,
    CheckItemUpdate,
}

impl ActionCategory {
    /// Maps an action type tag to its category. Returns `None` for tags the
    /// table does not know; callers count those as plain updates, so a new
    /// Trello action type can never fail a run.
    pub fn classify(action_type: &str) -> Option<Self> {
        match action_type {
            "commentCard" => Some(Self::Comment),
            "updateCard" => Some(Self::Update),
            "createCard" | "addChecklistToCard" | "addAttachmentToCard" => Some(Self::Create),
            "updateCheckItemStateOnCard" => Some(Self::CheckItemUpdate),
            _ => None,
        }
    }
}

/// Running tally of one card's recent actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    comments: u32,
    updates: u32,
    creates: u32,
    check_item_updates: u32,
}

impl Statistics {
    /// Counts one action of the given category.
    pub fn tally(&mut self, category: ActionCategory) {
        match category {
            ActionCategory::Comment => self.comments += 1,
            ActionCategory::Update => self.updates += 1,
            ActionCategory::Create => self.creates += 1,
            ActionCategory::CheckItemUpdate => self.check_item_updates += 1,
        }
    }

    /// Total number of tallied actions across all four counters.
    pub fn total(&self) -> u32 {
        self.comments + self.updates + self.creates + self.check_item_updates
    }

    /// Renders the `[3 + 2 ≡ 0 ✓ 1 …]` summary segment: updates, then
    /// comments, then check item updates, then creates.
    pub fn format(&self, palette: &Palette) -> String {
        format!(
            "[{} {} {} {}]",
            palette.updates.paint(format!("{} +", self.updates)),
            palette.comments.paint(format!("{} ≡", self.comments)),
            palette
                .check_items
                .paint(format!("{} ✓", self.check_item_updates)),
            palette.creates.paint(format!("{} …", self.creates)),
        )
    }
}

/// Styling of the four statistics segments.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    updates: Style,
    comments: Style,
    check_items: Style,
    creates: Style,
}

impl Palette {
    /// The colors the summary uses on a terminal.
    pub fn colored() -> Self {
        Self {
            updates: Colour::Cyan.normal(),
            comments: Colour::Red.normal(),
            check_items: Colour::Green.normal(),
            creates: Colour::Purple.normal(),
        }
    }

    /// No escape codes at all, for pipes and tests.
    pub fn plain() -> Self {
        Self {
            updates: Style::default(),
            comments: Style::default(),
            check_items: Style::default(),
            creates: Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_known_action_types() {
        assert_eq!(
            ActionCategory::classify("commentCard"),
            Some(ActionCategory::Comment)
        );
        assert_eq!(
            ActionCategory::classify("updateCard"),
            Some(ActionCategory::Update)
        );
        assert_eq!(
            ActionCategory::classify("createCard"),
            Some(ActionCategory::Create)
        );
        assert_eq!(
            ActionCategory::classify("addChecklistToCard"),
            Some(ActionCategory::Create)
        );
        assert_eq!(
            ActionCategory::classify("addAttachmentToCard"),
            Some(ActionCategory::Create)
        );
        assert_eq!(
            ActionCategory::classify("updateCheckItemStateOnCard"),
            Some(ActionCategory::CheckItemUpdate)
        );
        assert_eq!(ActionCategory::classify("deleteCard"), None);
        assert_eq!(ActionCategory::classify(""), None);
    }

    #[test]
    fn total_matches_the_number_of_tallied_actions() {
        let mut stats = Statistics::default();
        let run = [
            ActionCategory::Comment,
            ActionCategory::Update,
            ActionCategory::Update,
            ActionCategory::Create,
            ActionCategory::CheckItemUpdate,
        ];
        for category in run {
            stats.tally(category);
        }
        assert_eq!(stats.total(), run.len() as u32);
    }

    #[test]
    fn tallying_order_does_not_matter() {
        let run = [
            ActionCategory::Create,
            ActionCategory::Comment,
            ActionCategory::Update,
            ActionCategory::Comment,
            ActionCategory::CheckItemUpdate,
            ActionCategory::Update,
        ];

        let mut forward = Statistics::default();
        for category in run {
            forward.tally(category);
        }
        let mut backward = Statistics::default();
        for category in run.into_iter().rev() {
            backward.tally(category);
        }

        assert_eq!(forward, backward);
    }

    #[test]
    fn fresh_counter_renders_all_zeros() {
        let stats = Statistics::default();
        assert_eq!(stats.format(&Palette::plain()), "[0 + 0 ≡ 0 ✓ 0 …]");
    }

    #[test]
    fn segments_keep_their_fixed_order() {
        let mut stats = Statistics::default();
        for _ in 0..3 {
            stats.tally(ActionCategory::Update);
        }
        for _ in 0..2 {
            stats.tally(ActionCategory::Comment);
        }
        stats.tally(ActionCategory::Create);

        assert_eq!(stats.format(&Palette::plain()), "[3 + 2 ≡ 0 ✓ 1 …]");
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn colored_output_still_contains_every_count() {
        let mut stats = Statistics::default();
        stats.tally(ActionCategory::Comment);
        let rendered = stats.format(&Palette::colored());
        assert!(rendered.contains("1 ≡"));
        assert!(rendered.contains("0 +"));
    }
}
