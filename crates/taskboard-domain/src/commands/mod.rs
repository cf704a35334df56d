use chrono::{DateTime, Utc};
use taskboard_core::{TaskboardError, TaskboardResult};

pub mod card_commands;
pub mod checklist_commands;
pub mod comment_commands;
pub mod timer_commands;

pub use card_commands::*;
pub use checklist_commands::*;
pub use comment_commands::*;
pub use timer_commands::*;

use crate::{
    Board, BoardEvent, Card, CardId, Checklists, CommentStore, HistoryLog, Identity, TimerState,
};

/// Trait for domain commands that mutate board state.
///
/// A command either applies fully and reports the resulting events, or
/// returns an error having changed nothing.
pub trait Command: Send + Sync {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub board: &'a mut Board,
    pub timers: &'a mut TimerState,
    pub checklists: &'a mut Checklists,
    pub comments: &'a mut CommentStore,
    pub history: &'a mut HistoryLog,
    pub identity: &'a Identity,
    pub now: DateTime<Utc>,
}

impl CommandContext<'_> {
    pub fn require_card(&self, card_id: CardId) -> TaskboardResult<&Card> {
        self.board
            .find_card(card_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("card {}", card_id)))
    }

    /// Appends a history entry and returns the matching event.
    pub fn log(&mut self, card_id: CardId, action: impl Into<String>) -> BoardEvent {
        let entry = self.history.append(card_id, action, self.now);
        BoardEvent::HistoryAppended {
            card_id,
            entry_id: entry.id.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ColumnKey;
    use chrono::TimeZone;

    /// Owns every store so a command can be run against a fresh context.
    pub struct TestState {
        pub board: Board,
        pub timers: TimerState,
        pub checklists: Checklists,
        pub comments: CommentStore,
        pub history: HistoryLog,
        pub identity: Identity,
        pub now: DateTime<Utc>,
    }

    impl TestState {
        pub fn with_cards(cards: &[(ColumnKey, CardId)]) -> Self {
            let mut board = Board::default();
            for (key, id) in cards {
                board
                    .insert_card(*key, Card::new(*id, format!("Card {}", id)))
                    .unwrap();
            }
            Self {
                board,
                timers: TimerState::new(),
                checklists: Checklists::new(),
                comments: CommentStore::new(),
                history: HistoryLog::new(),
                identity: Identity::new("Você"),
                now: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            }
        }

        pub fn run(&mut self, command: &dyn Command) -> TaskboardResult<Vec<BoardEvent>> {
            let mut context = CommandContext {
                board: &mut self.board,
                timers: &mut self.timers,
                checklists: &mut self.checklists,
                comments: &mut self.comments,
                history: &mut self.history,
                identity: &self.identity,
                now: self.now,
            };
            command.execute(&mut context)
        }
    }
}
