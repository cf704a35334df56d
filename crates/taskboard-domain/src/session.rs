//! Board session: the single owner of all mutable board state.
//!
//! Views and front ends hold a `BoardSession` and feed it commands one at a
//! time. Each command produces the events it caused; a rejected command
//! produces none and leaves every store as it was. Rejections are never
//! surfaced to the caller, only traced.

use chrono::{DateTime, Utc};

use crate::commands::{Command, CommandContext, MoveCard};
use crate::{
    Board, BoardEvent, Card, CardId, Checklists, ColumnKey, CommentStore, DragPayload,
    HistoryLog, Identity, MoveCheck, TimerState,
};

/// Asks the user whether a card may enter the completion column.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionPrompt {
    fn confirm_completion(&self, card: &Card) -> bool;
}

/// A prompt whose answer is known up front (a `--yes` flag, a config switch).
#[derive(Debug, Clone, Copy)]
pub struct Preconfirmed(pub bool);

impl CompletionPrompt for Preconfirmed {
    fn confirm_completion(&self, _card: &Card) -> bool {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct BoardSession {
    board: Board,
    timers: TimerState,
    checklists: Checklists,
    comments: CommentStore,
    history: HistoryLog,
    identity: Identity,
}

impl BoardSession {
    pub fn new(board: Board, identity: Identity) -> Self {
        Self {
            board,
            timers: TimerState::new(),
            checklists: Checklists::new(),
            comments: CommentStore::new(),
            history: HistoryLog::new(),
            identity,
        }
    }

    pub fn with_timers(mut self, timers: TimerState) -> Self {
        self.timers = timers;
        self
    }

    pub fn with_checklists(mut self, checklists: Checklists) -> Self {
        self.checklists = checklists;
        self
    }

    pub fn with_comments(mut self, comments: CommentStore) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_history(mut self, history: HistoryLog) -> Self {
        self.history = history;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timers(&self) -> &TimerState {
        &self.timers
    }

    pub fn checklists(&self) -> &Checklists {
        &self.checklists
    }

    pub fn comments(&self) -> &CommentStore {
        &self.comments
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn execute(&mut self, command: &dyn Command) -> Vec<BoardEvent> {
        self.execute_at(command, Utc::now())
    }

    /// Runs one command with an explicit clock reading.
    pub fn execute_at(&mut self, command: &dyn Command, now: DateTime<Utc>) -> Vec<BoardEvent> {
        let description = command.description();
        tracing::debug!("Executing: {}", description);

        let mut context = CommandContext {
            board: &mut self.board,
            timers: &mut self.timers,
            checklists: &mut self.checklists,
            comments: &mut self.comments,
            history: &mut self.history,
            identity: &self.identity,
            now,
        };

        match command.execute(&mut context) {
            Ok(events) => events,
            Err(e) => {
                tracing::debug!("Rejected '{}': {}", description, e);
                Vec::new()
            }
        }
    }

    /// Validates and commits a move, asking for confirmation when the
    /// target is the completion column. Declining leaves the board as is.
    pub fn request_move(
        &mut self,
        card_id: CardId,
        from: ColumnKey,
        to: ColumnKey,
        prompt: &dyn CompletionPrompt,
    ) -> Vec<BoardEvent> {
        self.request_move_at(card_id, from, to, prompt, Utc::now())
    }

    pub fn request_move_at(
        &mut self,
        card_id: CardId,
        from: ColumnKey,
        to: ColumnKey,
        prompt: &dyn CompletionPrompt,
        now: DateTime<Utc>,
    ) -> Vec<BoardEvent> {
        let requires_confirmation = match self.board.check_move(card_id, from, to) {
            Ok(MoveCheck::NoOp) => return Vec::new(),
            Ok(MoveCheck::Allowed {
                requires_confirmation,
            }) => requires_confirmation,
            Err(e) => {
                tracing::debug!("Move of card {} rejected: {}", card_id, e);
                return Vec::new();
            }
        };

        if requires_confirmation {
            let confirmed = self
                .board
                .find_card(card_id)
                .is_some_and(|card| prompt.confirm_completion(card));
            if !confirmed {
                tracing::debug!("Completion of card {} declined", card_id);
                return Vec::new();
            }
        }

        self.execute_at(&MoveCard { card_id, from, to }, now)
    }

    /// Handles a drop gesture: the raw drag payload plus the key of the
    /// column it landed on. Malformed input is ignored.
    pub fn drop_payload(
        &mut self,
        raw_payload: &str,
        target_column: &str,
        prompt: &dyn CompletionPrompt,
    ) -> Vec<BoardEvent> {
        let payload = match DragPayload::parse(raw_payload) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("Ignoring drop: {}", e);
                return Vec::new();
            }
        };
        let Ok(to) = target_column.parse::<ColumnKey>() else {
            tracing::debug!("Ignoring drop on unknown column '{}'", target_column);
            return Vec::new();
        };
        self.request_move(payload.card_id, payload.from_column_key, to, prompt)
    }
}
