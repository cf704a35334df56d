//! Storage key naming.

use std::fmt;

use taskboard_domain::CardId;

const COMMENTS_PREFIX: &str = "boardComments_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageKey {
    /// Elapsed seconds per card
    Timers,
    /// Card whose timer was running at the last save
    ActiveTimer,
    Checklists,
    /// One thread per card
    Comments(CardId),
    History,
    /// Column placement and card fields
    BoardState,
}

impl StorageKey {
    pub fn as_key(&self) -> String {
        match self {
            Self::Timers => "boardTimers".to_string(),
            Self::ActiveTimer => "boardActiveTimer".to_string(),
            Self::Checklists => "boardChecklists".to_string(),
            Self::Comments(card_id) => format!("{}{}", COMMENTS_PREFIX, card_id),
            Self::History => "boardHistory".to_string(),
            Self::BoardState => "boardState".to_string(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
