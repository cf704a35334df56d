use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use taskboard_core::TaskboardError;

use crate::card::{Card, CardId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKey {
    Backlog,
    Todo,
    Doing,
    Waiting,
    Done,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 5] = [
        ColumnKey::Backlog,
        ColumnKey::Todo,
        ColumnKey::Doing,
        ColumnKey::Waiting,
        ColumnKey::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "A Fazer",
            Self::Doing => "Em Andamento",
            Self::Waiting => "Aguardando",
            Self::Done => "Concluído",
        }
    }

    pub fn is_completion(self) -> bool {
        self == Self::Done
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TaskboardError::NotFound(format!("column '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: ColumnKey,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(key: ColumnKey) -> Self {
        Self {
            key,
            title: key.default_title().to_string(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
