use serde::Serialize;

use crate::card::CardId;
use crate::column::ColumnKey;

/// State changes produced by executing a command.
///
/// Persistence uses these to decide which snapshots to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    CardMoved {
        card_id: CardId,
        from: ColumnKey,
        to: ColumnKey,
    },
    CardCompleted {
        card_id: CardId,
    },
    CardUpdated {
        card_id: CardId,
    },
    TimerStarted {
        card_id: CardId,
    },
    TimerPaused {
        card_id: CardId,
    },
    TimerTicked {
        card_id: CardId,
        elapsed: u64,
    },
    ChecklistChanged {
        card_id: CardId,
    },
    CommentsChanged {
        card_id: CardId,
    },
    HistoryAppended {
        card_id: CardId,
        entry_id: String,
    },
}
