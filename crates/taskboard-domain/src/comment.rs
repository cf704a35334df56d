//! Per-card comment threads.
//!
//! New comments are prepended (most recent first). Only the author may edit
//! or remove a comment; editing replaces the text in place and keeps the
//! id, author and creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::card::CardId;
use crate::identity::Identity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(String),
    Edited(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    comments: Vec<Comment>,
    editing: Option<String>,
}

impl CommentThread {
    pub fn from_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            editing: None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    fn find(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    fn next_id(&self, card_id: CardId, now: DateTime<Utc>) -> String {
        let base = format!("{}-{}", card_id, now.timestamp_millis());
        if self.find(&base).is_none() {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if self.find(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn submit(
        &mut self,
        card_id: CardId,
        text: &str,
        author: &Identity,
        now: DateTime<Utc>,
    ) -> Option<SubmitOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(editing) = self.editing.take() {
            if let Some(comment) = self.comments.iter_mut().find(|c| c.id == editing) {
                comment.text = text.to_string();
                return Some(SubmitOutcome::Edited(editing));
            }
        }

        let id = self.next_id(card_id, now);
        self.comments.insert(
            0,
            Comment {
                id: id.clone(),
                user: author.name().to_string(),
                text: text.to_string(),
                created_at: now,
            },
        );
        Some(SubmitOutcome::Created(id))
    }

    pub fn begin_edit(&mut self, comment_id: &str, user: &Identity) -> bool {
        match self.find(comment_id) {
            Some(comment) if user.is(&comment.user) => {
                self.editing = Some(comment_id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    pub fn remove(&mut self, comment_id: &str, user: &Identity) -> bool {
        let Some(index) = self
            .comments
            .iter()
            .position(|c| c.id == comment_id && user.is(&c.user))
        else {
            return false;
        };
        self.comments.remove(index);
        if self.editing.as_deref() == Some(comment_id) {
            self.editing = None;
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentStore {
    threads: BTreeMap<CardId, CommentThread>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread(&self, card_id: CardId) -> Option<&CommentThread> {
        self.threads.get(&card_id)
    }

    pub fn thread_mut(&mut self, card_id: CardId) -> &mut CommentThread {
        self.threads.entry(card_id).or_default()
    }

    pub fn existing_mut(&mut self, card_id: CardId) -> Option<&mut CommentThread> {
        self.threads.get_mut(&card_id)
    }

    pub fn comments(&self, card_id: CardId) -> &[Comment] {
        self.thread(card_id)
            .map(CommentThread::comments)
            .unwrap_or_default()
    }

    pub fn load_thread(&mut self, card_id: CardId, comments: Vec<Comment>) {
        self.threads
            .insert(card_id, CommentThread::from_comments(comments));
    }
}
