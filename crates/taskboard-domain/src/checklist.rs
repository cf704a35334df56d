use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::card::CardId;

const DEFAULT_ITEMS: [&str; 3] = [
    "Entender a demanda do cliente",
    "Executar a tarefa",
    "Validar com o cliente",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub text: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
        }
    }
}

pub fn default_checklist() -> Vec<ChecklistItem> {
    DEFAULT_ITEMS
        .iter()
        .zip(1..)
        .map(|(text, id)| ChecklistItem::new(id, *text))
        .collect()
}

/// `round(100 * done / total)`, or 0 for an empty list.
pub fn completion_percent(items: &[ChecklistItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let done = items.iter().filter(|item| item.done).count() as f64;
    (100.0 * done / items.len() as f64).round() as u8
}

/// Checklists for every card that has needed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklists {
    lists: BTreeMap<CardId, Vec<ChecklistItem>>,
}

impl Checklists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card_id: CardId) -> Option<&[ChecklistItem]> {
        self.lists.get(&card_id).map(Vec::as_slice)
    }

    /// Returns the card's checklist, seeding the default items on first use.
    pub fn ensure(&mut self, card_id: CardId) -> &mut Vec<ChecklistItem> {
        self.lists.entry(card_id).or_insert_with(default_checklist)
    }

    /// Flips one item. Returns false when the id is unknown.
    pub fn toggle_item(&mut self, card_id: CardId, item_id: u32) -> bool {
        if !self.lists.contains_key(&card_id)
            && !default_checklist().iter().any(|item| item.id == item_id)
        {
            return false;
        }
        match self.ensure(card_id).iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.done = !item.done;
                true
            }
            None => false,
        }
    }

    pub fn add_item(&mut self, card_id: CardId, text: &str) -> Option<&ChecklistItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let items = self.ensure(card_id);
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        items.push(ChecklistItem::new(next_id, text));
        items.last()
    }

    pub fn completion(&self, card_id: CardId) -> u8 {
        self.get(card_id).map(completion_percent).unwrap_or(0)
    }
}
