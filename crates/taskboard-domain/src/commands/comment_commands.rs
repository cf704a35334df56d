use super::{Command, CommandContext};
use crate::{BoardEvent, CardId};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Post a new comment, or finish the edit in progress
pub struct SubmitComment {
    pub card_id: CardId,
    pub text: String,
}

impl Command for SubmitComment {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        context.require_card(self.card_id)?;
        if self.text.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "comment text is empty".to_string(),
            ));
        }
        let author = context.identity;
        context
            .comments
            .thread_mut(self.card_id)
            .submit(self.card_id, &self.text, author, context.now);
        Ok(vec![BoardEvent::CommentsChanged {
            card_id: self.card_id,
        }])
    }

    fn description(&self) -> String {
        format!("Submit comment on card {}", self.card_id)
    }
}

/// Put one of the current user's comments into edit mode
pub struct BeginCommentEdit {
    pub card_id: CardId,
    pub comment_id: String,
}

impl Command for BeginCommentEdit {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        let user = context.identity;
        let allowed = context
            .comments
            .existing_mut(self.card_id)
            .is_some_and(|thread| thread.begin_edit(&self.comment_id, user));
        if !allowed {
            return Err(TaskboardError::Validation(format!(
                "comment {} cannot be edited by {}",
                self.comment_id, user
            )));
        }
        Ok(Vec::new())
    }

    fn description(&self) -> String {
        format!("Edit comment {} on card {}", self.comment_id, self.card_id)
    }
}

/// Leave edit mode without changing anything
pub struct CancelCommentEdit {
    pub card_id: CardId,
}

impl Command for CancelCommentEdit {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        if let Some(thread) = context.comments.existing_mut(self.card_id) {
            thread.cancel_edit();
        }
        Ok(Vec::new())
    }

    fn description(&self) -> String {
        format!("Cancel comment edit on card {}", self.card_id)
    }
}

/// Delete one of the current user's comments
pub struct RemoveComment {
    pub card_id: CardId,
    pub comment_id: String,
}

impl Command for RemoveComment {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Vec<BoardEvent>> {
        let user = context.identity;
        let removed = context
            .comments
            .existing_mut(self.card_id)
            .is_some_and(|thread| thread.remove(&self.comment_id, user));
        if !removed {
            return Err(TaskboardError::NotFound(format!(
                "comment {} by {}",
                self.comment_id, user
            )));
        }
        Ok(vec![BoardEvent::CommentsChanged {
            card_id: self.card_id,
        }])
    }

    fn description(&self) -> String {
        format!("Remove comment {} from card {}", self.comment_id, self.card_id)
    }
}
