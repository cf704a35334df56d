pub mod board;
pub mod card;
pub mod checklist;
pub mod column;
pub mod commands;
pub mod comment;
pub mod detail;
pub mod drag;
pub mod events;
pub mod filter;
pub mod history;
pub mod identity;
pub mod search;
pub mod seed;
pub mod session;
pub mod timer;
pub mod transitions;

pub use board::{Board, MoveCheck};
pub use card::{Card, CardId, CardPriority};
pub use checklist::{completion_percent, default_checklist, ChecklistItem, Checklists};
pub use column::{Column, ColumnKey};
pub use comment::{Comment, CommentStore, CommentThread, SubmitOutcome};
pub use detail::CardDetail;
pub use drag::DragPayload;
pub use events::BoardEvent;
pub use filter::{visible_columns, BoardFilters, CardFilter, ColumnView};
pub use history::{HistoryEntry, HistoryLog};
pub use identity::Identity;
pub use search::SearchDebounce;
pub use session::{BoardSession, CompletionPrompt, Preconfirmed};
pub use timer::{format_elapsed, TimerState, TimerTransition};
pub use transitions::TransitionGraph;
