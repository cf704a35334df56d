//! Card filtering for the board view.
//!
//! Filters narrow what is displayed; they never move or hide cards in the
//! underlying board state.

use serde::Serialize;

use crate::{Board, Card, CardPriority, ColumnKey};

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;
}

/// Filter settings selected in the board toolbar.
///
/// Every set field must match (AND logic); unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilters {
    /// Case-insensitive text matched against title, description and tags.
    pub query: Option<String>,
    pub priority: Option<CardPriority>,
    pub tag: Option<String>,
    pub assignee: Option<String>,
}

impl BoardFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
            || self.priority.is_some()
            || self.tag.is_some()
            || self.assignee.is_some()
    }

    fn matches_query(&self, card: &Card) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();
        card.title.to_lowercase().contains(&query)
            || card.description.to_lowercase().contains(&query)
            || card.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

impl CardFilter for BoardFilters {
    fn matches(&self, card: &Card) -> bool {
        self.matches_query(card)
            && self.priority.map_or(true, |p| card.priority == Some(p))
            && self
                .tag
                .as_deref()
                .map_or(true, |tag| card.tags.contains(tag))
            && self.assignee.as_deref().map_or(true, |assignee| {
                card.assignee
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case(assignee))
            })
    }
}

/// One column as the board view displays it.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView<'a> {
    pub key: ColumnKey,
    pub title: &'a str,
    pub total: usize,
    pub cards: Vec<&'a Card>,
}

/// Columns in board order with only the cards that pass `filter`.
pub fn visible_columns<'a>(board: &'a Board, filter: &dyn CardFilter) -> Vec<ColumnView<'a>> {
    board
        .columns
        .iter()
        .map(|column| ColumnView {
            key: column.key,
            title: &column.title,
            total: column.len(),
            cards: column.cards.iter().filter(|c| filter.matches(c)).collect(),
        })
        .collect()
}
