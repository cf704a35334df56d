//! Read model for the card detail view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::checklist::{completion_percent, default_checklist};
use crate::timer::format_elapsed;
use crate::{BoardSession, Card, CardId, ChecklistItem, ColumnKey, Comment, HistoryEntry};

#[derive(Debug, Clone, Serialize)]
pub struct CardDetail<'a> {
    pub card: &'a Card,
    pub column: ColumnKey,
    /// Deadline already passed as of the day the view was built.
    pub overdue: bool,
    pub elapsed_seconds: u64,
    pub elapsed: String,
    pub timer_running: bool,
    /// The stored checklist, or the default items the card would be seeded with.
    pub checklist: Vec<ChecklistItem>,
    pub completion: u8,
    pub comments: &'a [Comment],
    pub editing_comment: Option<&'a str>,
    /// Newest first.
    pub history: Vec<&'a HistoryEntry>,
}

impl<'a> CardDetail<'a> {
    pub fn build(session: &'a BoardSession, card_id: CardId, today: NaiveDate) -> Option<Self> {
        let board = session.board();
        let card = board.find_card(card_id)?;
        let column = board.column_of(card_id)?;
        let elapsed_seconds = session.timers().elapsed(card_id);
        let checklist = session
            .checklists()
            .get(card_id)
            .map(<[ChecklistItem]>::to_vec)
            .unwrap_or_else(default_checklist);

        Some(Self {
            card,
            column,
            overdue: card.is_overdue(today),
            elapsed_seconds,
            elapsed: format_elapsed(elapsed_seconds),
            timer_running: session.timers().is_running(card_id),
            completion: completion_percent(&checklist),
            checklist,
            comments: session.comments().comments(card_id),
            editing_comment: session
                .comments()
                .thread(card_id)
                .and_then(|thread| thread.editing()),
            history: session.history().newest_first(card_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{MoveCard, ToggleChecklistItem};
    use crate::{Board, Identity};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    #[test]
    fn test_detail_for_fresh_card_previews_default_checklist() {
        let mut board = Board::default();
        board.insert_card(ColumnKey::Todo, Card::new(1, "Kickoff")).unwrap();
        let session = BoardSession::new(board, Identity::new("Você"));

        let detail = CardDetail::build(&session, 1, today()).unwrap();
        assert_eq!(detail.column, ColumnKey::Todo);
        assert_eq!(detail.checklist.len(), 3);
        assert_eq!(detail.completion, 0);
        assert_eq!(detail.elapsed, "00:00:00");
        assert!(!detail.overdue);
        assert!(session.checklists().get(1).is_none());
        assert!(CardDetail::build(&session, 2, today()).is_none());
    }

    #[test]
    fn test_detail_reflects_session_state() {
        let mut board = Board::default();
        board.insert_card(ColumnKey::Todo, Card::new(1, "Kickoff")).unwrap();
        let mut session = BoardSession::new(board, Identity::new("Você"));
        session.execute(&ToggleChecklistItem {
            card_id: 1,
            item_id: 3,
        });
        session.execute(&MoveCard {
            card_id: 1,
            from: ColumnKey::Todo,
            to: ColumnKey::Doing,
        });

        let detail = CardDetail::build(&session, 1, today()).unwrap();
        assert_eq!(detail.column, ColumnKey::Doing);
        assert_eq!(detail.completion, 33);
        assert_eq!(detail.history[0].action, "moved from todo to doing");
    }

    #[test]
    fn test_detail_flags_passed_deadline() {
        let deadline = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let mut board = Board::default();
        board
            .insert_card(ColumnKey::Doing, Card::new(5, "Churn plan").with_deadline(deadline))
            .unwrap();
        let session = BoardSession::new(board, Identity::new("Você"));

        assert!(CardDetail::build(&session, 5, today()).unwrap().overdue);
        assert!(!CardDetail::build(&session, 5, deadline).unwrap().overdue);
    }
}
