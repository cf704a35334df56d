use super::{Command, CommandContext};
use crate::{BoardEvent, CardId};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Flip the done flag of one checklist item
pub struct ToggleChecklistItem {
    pub card_id: CardId,
    pub item_id: u32,
}

impl Command for ToggleChecklistItem {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        context.require_card(self.card_id)?;
        if !context.checklists.toggle_item(self.card_id, self.item_id) {
            return Err(TaskboardError::NotFound(format!(
                "checklist item {} on card {}",
                self.item_id, self.card_id
            )));
        }
        Ok(vec![BoardEvent::ChecklistChanged {
            card_id: self.card_id,
        }])
    }

    fn description(&self) -> String {
        format!(
            "Toggle checklist item {} on card {}",
            self.item_id, self.card_id
        )
    }
}

/// Append an item to a card's checklist
pub struct AddChecklistItem {
    pub card_id: CardId,
    pub text: String,
}

impl Command for AddChecklistItem {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        context.require_card(self.card_id)?;
        if self.text.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "checklist item text is empty".to_string(),
            ));
        }
        context.checklists.add_item(self.card_id, &self.text);
        Ok(vec![BoardEvent::ChecklistChanged {
            card_id: self.card_id,
        }])
    }

    fn description(&self) -> String {
        format!("Add checklist item to card {}", self.card_id)
    }
}
