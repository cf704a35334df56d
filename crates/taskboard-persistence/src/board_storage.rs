//! Best-effort loading and saving of a board session.
//!
//! Each storage key is decoded on its own: a missing or corrupt value falls
//! back to that key's default without affecting the others. Saves never
//! fail the caller; write errors are logged and the in-memory state stays
//! authoritative.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    Board, BoardEvent, BoardSession, CardId, Checklists, Comment, CommentStore, HistoryLog,
    Identity, TimerState,
};

use crate::keys::StorageKey;
use crate::traits::KeyValueStore;

pub struct BoardStorage<S> {
    store: S,
}

impl<S: KeyValueStore> BoardStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rebuilds a session from storage, using `seed` when no usable board
    /// was saved.
    pub async fn load(&self, seed: Board, identity: Identity) -> BoardSession {
        let board = self.load_board(seed).await;
        let timers = self.load_timers(&board).await;
        let checklists = self
            .read_decoded::<Checklists>(StorageKey::Checklists)
            .await
            .unwrap_or_default();
        let history = self
            .read_decoded::<HistoryLog>(StorageKey::History)
            .await
            .unwrap_or_default();

        let mut comments = CommentStore::new();
        for card_id in board.card_ids() {
            if let Some(thread) = self
                .read_decoded::<Vec<Comment>>(StorageKey::Comments(card_id))
                .await
            {
                comments.load_thread(card_id, thread);
            }
        }

        tracing::debug!("Loaded board with {} cards", board.card_count());
        BoardSession::new(board, identity)
            .with_timers(timers)
            .with_checklists(checklists)
            .with_comments(comments)
            .with_history(history)
    }

    /// Writes the snapshots dirtied by `events`. Returns how many keys were
    /// written successfully.
    pub async fn persist(&self, session: &BoardSession, events: &[BoardEvent]) -> usize {
        let keys = dirty_keys(events);
        self.write_keys(session, keys).await
    }

    /// Writes every snapshot the session holds.
    pub async fn persist_all(&self, session: &BoardSession) -> usize {
        let mut keys: BTreeSet<StorageKey> = [
            StorageKey::BoardState,
            StorageKey::Timers,
            StorageKey::ActiveTimer,
            StorageKey::Checklists,
            StorageKey::History,
        ]
        .into_iter()
        .collect();
        keys.extend(
            session
                .board()
                .card_ids()
                .into_iter()
                .filter(|id| session.comments().thread(*id).is_some())
                .map(StorageKey::Comments),
        );
        self.write_keys(session, keys).await
    }

    async fn write_keys(&self, session: &BoardSession, keys: BTreeSet<StorageKey>) -> usize {
        let mut written = 0;
        for key in keys {
            let result = match encode(session, key) {
                Ok(value) => self.store.set(&key.as_key(), value).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => written += 1,
                Err(e) => tracing::warn!("Failed to save {}: {}", key, e),
            }
        }
        written
    }

    async fn read(&self, key: StorageKey) -> Option<String> {
        match self.store.get(&key.as_key()).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    async fn read_decoded<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = self.read(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupt {}: {}", key, e);
                None
            }
        }
    }

    async fn load_board(&self, seed: Board) -> Board {
        match self.read_decoded::<Board>(StorageKey::BoardState).await {
            Some(mut board) if board.is_well_formed() => {
                board.transitions = seed.transitions;
                board
            }
            Some(_) => {
                tracing::warn!("Saved board is inconsistent, starting from seed");
                seed
            }
            None => seed,
        }
    }

    async fn load_timers(&self, board: &Board) -> TimerState {
        let elapsed = self
            .read_decoded::<serde_json::Map<String, Value>>(StorageKey::Timers)
            .await
            .map(|raw| decode_elapsed(&raw))
            .unwrap_or_default();

        let active = self
            .read_decoded::<Option<CardId>>(StorageKey::ActiveTimer)
            .await
            .flatten()
            .filter(|id| board.find_card(*id).is_some());

        TimerState::from_parts(active, elapsed)
    }
}

/// Per-card seconds; values that are not whole non-negative numbers count as zero.
fn decode_elapsed(raw: &serde_json::Map<String, Value>) -> BTreeMap<CardId, u64> {
    raw.iter()
        .filter_map(|(key, value)| {
            let card_id = key.parse::<CardId>().ok()?;
            let seconds = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            Some((card_id, seconds.unwrap_or(0)))
        })
        .collect()
}

fn dirty_keys(events: &[BoardEvent]) -> BTreeSet<StorageKey> {
    let mut keys = BTreeSet::new();
    for event in events {
        match event {
            BoardEvent::CardMoved { .. }
            | BoardEvent::CardCompleted { .. }
            | BoardEvent::CardUpdated { .. } => {
                keys.insert(StorageKey::BoardState);
            }
            BoardEvent::TimerStarted { .. } | BoardEvent::TimerPaused { .. } => {
                keys.insert(StorageKey::Timers);
                keys.insert(StorageKey::ActiveTimer);
            }
            BoardEvent::TimerTicked { .. } => {
                keys.insert(StorageKey::Timers);
            }
            BoardEvent::ChecklistChanged { .. } => {
                keys.insert(StorageKey::Checklists);
            }
            BoardEvent::CommentsChanged { card_id } => {
                keys.insert(StorageKey::Comments(*card_id));
            }
            BoardEvent::HistoryAppended { .. } => {
                keys.insert(StorageKey::History);
            }
        }
    }
    keys
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> TaskboardResult<String> {
    serde_json::to_string(value).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

fn encode(session: &BoardSession, key: StorageKey) -> TaskboardResult<String> {
    match key {
        StorageKey::Timers => to_json(session.timers().elapsed_map()),
        StorageKey::ActiveTimer => to_json(&session.timers().active()),
        StorageKey::Checklists => to_json(session.checklists()),
        StorageKey::Comments(card_id) => to_json(session.comments().comments(card_id)),
        StorageKey::History => to_json(session.history()),
        StorageKey::BoardState => to_json(session.board()),
    }
}
