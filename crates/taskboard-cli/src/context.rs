use std::path::PathBuf;

use taskboard_core::AppConfig;
use taskboard_domain::commands::Command;
use taskboard_domain::{
    seed, BoardEvent, BoardSession, CardId, CompletionPrompt, Identity, Preconfirmed,
};
use taskboard_persistence::{BoardStorage, JsonFileStore};

use crate::prompt::TerminalPrompt;

/// One CLI invocation's view of the board: loaded from disk on start,
/// saved after each command that changed something.
pub struct CliContext {
    pub session: BoardSession,
    pub config: AppConfig,
    storage: BoardStorage<JsonFileStore>,
}

impl CliContext {
    pub async fn load(file: Option<String>, user: Option<String>) -> anyhow::Result<Self> {
        let config = AppConfig::load();
        let path = match file {
            Some(file) => PathBuf::from(file),
            None => AppConfig::default_data_path().ok_or_else(|| {
                anyhow::anyhow!("--file is required: no data directory on this platform")
            })?,
        };

        let name = user
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| config.effective_current_user().to_string());

        let storage = BoardStorage::new(JsonFileStore::new(&path));
        let session = storage
            .load(seed::initial_board(), Identity::new(name))
            .await;

        if !storage.store().exists().await {
            storage.persist_all(&session).await;
            tracing::info!("Created new board file: {}", path.display());
        }

        Ok(Self {
            session,
            config,
            storage,
        })
    }

    pub fn execute(&mut self, command: &dyn Command) -> Vec<BoardEvent> {
        self.session.execute(command)
    }

    /// Persists whatever `events` touched. Storage failures are logged, not returned.
    pub async fn save(&self, events: &[BoardEvent]) -> usize {
        if events.is_empty() {
            return 0;
        }
        self.storage.persist(&self.session, events).await
    }

    pub fn has_card(&self, card_id: CardId) -> bool {
        self.session.board().find_card(card_id).is_some()
    }

    /// Prompt used when a move targets the completion column.
    pub fn completion_prompt(&self, yes: bool) -> Box<dyn CompletionPrompt> {
        if yes || !self.config.effective_confirm_completion() {
            Box::new(Preconfirmed(true))
        } else {
            Box::new(TerminalPrompt)
        }
    }
}
