use serde::{Deserialize, Serialize};

use taskboard_core::{TaskboardError, TaskboardResult};

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnKey};
use crate::transitions::TransitionGraph;

/// Outcome of validating a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCheck {
    /// Source and target are the same column; nothing to do.
    NoOp,
    Allowed { requires_confirmation: bool },
}

/// Authoritative placement of cards into columns.
///
/// Every card lives in exactly one column. Cards only change columns through
/// [`Board::apply_move`], and only along edges of the transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    #[serde(skip, default = "TransitionGraph::standard")]
    pub transitions: TransitionGraph,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(TransitionGraph::standard())
    }
}

impl Board {
    pub fn new(transitions: TransitionGraph) -> Self {
        Self {
            columns: ColumnKey::ALL.into_iter().map(Column::new).collect(),
            transitions,
        }
    }

    /// Places a card at the end of a column. Card ids must be unique across the board.
    pub fn insert_card(&mut self, key: ColumnKey, card: Card) -> TaskboardResult<()> {
        if self.column_of(card.id).is_some() {
            return Err(TaskboardError::Validation(format!(
                "card {} is already on the board",
                card.id
            )));
        }
        self.column_mut(key)?.cards.push(card);
        Ok(())
    }

    /// True when the board has each column exactly once, in workflow order,
    /// and no card id appears twice.
    pub fn is_well_formed(&self) -> bool {
        let keys: Vec<_> = self.columns.iter().map(|c| c.key).collect();
        if keys != ColumnKey::ALL {
            return false;
        }
        let ids = self.card_ids();
        let unique: std::collections::BTreeSet<_> = ids.iter().collect();
        unique.len() == ids.len()
    }

    pub fn column(&self, key: ColumnKey) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn column_mut(&mut self, key: ColumnKey) -> TaskboardResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| TaskboardError::NotFound(format!("column '{}'", key)))
    }

    pub fn column_of(&self, card_id: CardId) -> Option<ColumnKey> {
        self.columns
            .iter()
            .find(|c| c.contains(card_id))
            .map(|c| c.key)
    }

    pub fn find_card(&self, card_id: CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|card| card.id == card_id)
    }

    pub fn find_card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.cards.iter_mut())
            .find(|card| card.id == card_id)
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter().map(|card| card.id))
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Validates a move without touching state.
    pub fn check_move(
        &self,
        card_id: CardId,
        from: ColumnKey,
        to: ColumnKey,
    ) -> TaskboardResult<MoveCheck> {
        let source = self
            .column(from)
            .ok_or_else(|| TaskboardError::NotFound(format!("column '{}'", from)))?;
        if self.column(to).is_none() {
            return Err(TaskboardError::NotFound(format!("column '{}'", to)));
        }
        if !source.contains(card_id) {
            return Err(TaskboardError::NotFound(format!(
                "card {} in column '{}'",
                card_id, from
            )));
        }
        if from == to {
            return Ok(MoveCheck::NoOp);
        }
        if !self.transitions.allows(from, to) {
            return Err(TaskboardError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(MoveCheck::Allowed {
            requires_confirmation: to.is_completion(),
        })
    }

    /// Removes the card from `from` and appends it to the end of `to`.
    ///
    /// Validation runs first, so a failed call leaves the board untouched.
    pub fn apply_move(
        &mut self,
        card_id: CardId,
        from: ColumnKey,
        to: ColumnKey,
    ) -> TaskboardResult<MoveCheck> {
        let check = self.check_move(card_id, from, to)?;
        if check == MoveCheck::NoOp {
            return Ok(check);
        }

        let source = self.column_mut(from)?;
        let index = source
            .position_of(card_id)
            .ok_or_else(|| TaskboardError::Internal(format!("card {} vanished", card_id)))?;
        let card = source.cards.remove(index);
        self.column_mut(to)?.cards.push(card);
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColumnKey::*;

    fn board_with(cards: &[(ColumnKey, CardId)]) -> Board {
        let mut board = Board::default();
        for (key, id) in cards {
            board
                .insert_card(*key, Card::new(*id, format!("Card {}", id)))
                .unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_has_five_ordered_columns() {
        let board = Board::default();
        let keys: Vec<_> = board.columns.iter().map(|c| c.key).collect();
        assert_eq!(keys, ColumnKey::ALL.to_vec());
        assert_eq!(board.card_count(), 0);
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut board = board_with(&[(Backlog, 1)]);
        assert!(board.insert_card(Todo, Card::new(1, "Dup")).is_err());
        assert_eq!(board.card_count(), 1);
    }

    #[test]
    fn test_legal_move_appends_to_target() {
        let mut board = board_with(&[(Backlog, 1), (Todo, 2), (Todo, 3)]);
        let check = board.apply_move(1, Backlog, Todo).unwrap();
        assert_eq!(
            check,
            MoveCheck::Allowed {
                requires_confirmation: false
            }
        );
        let todo: Vec<_> = board.column(Todo).unwrap().cards.iter().map(|c| c.id).collect();
        assert_eq!(todo, vec![2, 3, 1]);
        assert!(board.column(Backlog).unwrap().is_empty());
    }

    #[test]
    fn test_illegal_move_leaves_board_unchanged() {
        let mut board = board_with(&[(Backlog, 1), (Doing, 2)]);
        let before = board.clone();

        let err = board.apply_move(1, Backlog, Doing).unwrap_err();
        assert!(matches!(err, TaskboardError::InvalidTransition { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_card_must_be_in_source_column() {
        let mut board = board_with(&[(Todo, 1)]);
        let before = board.clone();
        assert!(board.apply_move(1, Backlog, Todo).is_err());
        assert!(board.apply_move(99, Todo, Doing).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_column_is_noop() {
        let mut board = board_with(&[(Doing, 1), (Doing, 2)]);
        let before = board.clone();
        assert_eq!(board.apply_move(1, Doing, Doing).unwrap(), MoveCheck::NoOp);
        assert_eq!(board, before);
    }

    #[test]
    fn test_entering_done_requires_confirmation() {
        let board = board_with(&[(Waiting, 5)]);
        assert_eq!(
            board.check_move(5, Waiting, Done).unwrap(),
            MoveCheck::Allowed {
                requires_confirmation: true
            }
        );
    }

    #[test]
    fn test_move_succeeds_iff_edge_exists() {
        let graph = TransitionGraph::standard();
        for from in ColumnKey::ALL {
            for to in ColumnKey::ALL {
                if from == to {
                    continue;
                }
                let mut board = board_with(&[(from, 1)]);
                let before = board.clone();
                let result = board.apply_move(1, from, to);
                if graph.allows(from, to) {
                    assert!(result.is_ok(), "{} -> {} should be allowed", from, to);
                    assert_eq!(board.column_of(1), Some(to));
                } else {
                    assert!(result.is_err(), "{} -> {} should be rejected", from, to);
                    assert_eq!(board, before);
                }
            }
        }
    }

    #[test]
    fn test_restricted_graph_rejects_skip() {
        let mut board = Board::new(TransitionGraph::new().with_edge(Backlog, Todo));
        board.insert_card(Backlog, Card::new(1, "Card 1")).unwrap();
        assert!(board.apply_move(1, Backlog, Doing).is_err());
        assert_eq!(board.column_of(1), Some(Backlog));
    }

    #[test]
    fn test_is_well_formed() {
        let board = board_with(&[(Todo, 1), (Doing, 2)]);
        assert!(board.is_well_formed());

        let mut missing_column = board.clone();
        missing_column.columns.pop();
        assert!(!missing_column.is_well_formed());

        let mut duplicate = board.clone();
        duplicate.columns[0].cards.push(Card::new(2, "Copy"));
        assert!(!duplicate.is_well_formed());
    }

    #[test]
    fn test_serialized_board_restores_standard_graph() {
        let board = board_with(&[(Todo, 1)]);
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
        assert!(restored.transitions.allows(Todo, Doing));
    }
}
