use super::{Command, CommandContext};
use crate::{BoardEvent, CardId, TimerTransition};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Start, pause, or switch the active timer to a card
pub struct ToggleTimer {
    pub card_id: CardId,
}

impl Command for ToggleTimer {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        context.require_card(self.card_id)?;

        let mut events = Vec::new();
        for transition in context.timers.toggle(self.card_id) {
            match transition {
                TimerTransition::Paused(card_id) => {
                    events.push(BoardEvent::TimerPaused { card_id });
                    events.push(context.log(card_id, "paused"));
                }
                TimerTransition::Started(card_id) => {
                    events.push(BoardEvent::TimerStarted { card_id });
                    events.push(context.log(card_id, "started"));
                }
            }
        }
        Ok(events)
    }

    fn description(&self) -> String {
        format!("Toggle timer for card {}", self.card_id)
    }
}

/// Account one elapsed second to the active card
pub struct TickTimer {
    pub card_id: CardId,
}

impl Command for TickTimer {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        if !context.timers.tick(self.card_id) {
            return Err(TaskboardError::Validation(format!(
                "timer for card {} is not running",
                self.card_id
            )));
        }
        Ok(vec![BoardEvent::TimerTicked {
            card_id: self.card_id,
            elapsed: context.timers.elapsed(self.card_id),
        }])
    }

    fn description(&self) -> String {
        format!("Tick timer for card {}", self.card_id)
    }
}
