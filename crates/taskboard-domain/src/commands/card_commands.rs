use super::{Command, CommandContext};
use crate::{BoardEvent, CardId, CardPriority, ColumnKey, MoveCheck};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Move a card between columns along the transition graph.
///
/// The card is appended to the end of the target column. Entering the
/// completion column must already have been confirmed by the caller.
pub struct MoveCard {
    pub card_id: CardId,
    pub from: ColumnKey,
    pub to: ColumnKey,
}

impl Command for MoveCard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        if context.board.apply_move(self.card_id, self.from, self.to)? == MoveCheck::NoOp {
            return Ok(Vec::new());
        }

        let mut events = vec![BoardEvent::CardMoved {
            card_id: self.card_id,
            from: self.from,
            to: self.to,
        }];
        events.push(context.log(
            self.card_id,
            format!("moved from {} to {}", self.from, self.to),
        ));
        if self.to.is_completion() {
            events.push(BoardEvent::CardCompleted {
                card_id: self.card_id,
            });
            events.push(context.log(self.card_id, "completed task"));
        }
        Ok(events)
    }

    fn description(&self) -> String {
        format!(
            "Move card {} from {} to {}",
            self.card_id, self.from, self.to
        )
    }
}

/// Add a tag to a card
pub struct AddTag {
    pub card_id: CardId,
    pub tag: String,
}

impl Command for AddTag {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        let tag = self.tag.trim().to_string();
        let card = context
            .board
            .find_card_mut(self.card_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("card {}", self.card_id)))?;
        if !card.add_tag(&tag) {
            return Err(TaskboardError::Validation(format!(
                "tag '{}' is blank or already present",
                self.tag
            )));
        }
        Ok(vec![
            BoardEvent::CardUpdated {
                card_id: self.card_id,
            },
            context.log(self.card_id, format!("added tag {}", tag)),
        ])
    }

    fn description(&self) -> String {
        format!("Add tag '{}' to card {}", self.tag, self.card_id)
    }
}

/// Remove a tag from a card
pub struct RemoveTag {
    pub card_id: CardId,
    pub tag: String,
}

impl Command for RemoveTag {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        let card = context
            .board
            .find_card_mut(self.card_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("card {}", self.card_id)))?;
        if !card.remove_tag(&self.tag) {
            return Err(TaskboardError::NotFound(format!("tag '{}'", self.tag)));
        }
        Ok(vec![
            BoardEvent::CardUpdated {
                card_id: self.card_id,
            },
            context.log(self.card_id, format!("removed tag {}", self.tag.trim())),
        ])
    }

    fn description(&self) -> String {
        format!("Remove tag '{}' from card {}", self.tag, self.card_id)
    }
}

/// Set or clear a card's priority
pub struct SetPriority {
    pub card_id: CardId,
    pub priority: Option<CardPriority>,
}

impl Command for SetPriority {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        let card = context
            .board
            .find_card_mut(self.card_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("card {}", self.card_id)))?;
        if card.priority == self.priority {
            return Ok(Vec::new());
        }
        card.set_priority(self.priority);

        let action = match self.priority {
            Some(priority) => format!("priority set to {}", priority),
            None => "priority cleared".to_string(),
        };
        Ok(vec![
            BoardEvent::CardUpdated {
                card_id: self.card_id,
            },
            context.log(self.card_id, action),
        ])
    }

    fn description(&self) -> String {
        format!("Set priority of card {}", self.card_id)
    }
}
