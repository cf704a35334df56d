use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use taskboard_core::TaskboardError;

pub type CardId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardPriority {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "urgente")]
    Urgent,
}

impl CardPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "baixa",
            Self::Medium => "media",
            Self::High => "alta",
            Self::Urgent => "urgente",
        }
    }
}

impl fmt::Display for CardPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardPriority {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baixa" | "low" => Ok(Self::Low),
            "media" | "média" | "medium" => Ok(Self::Medium),
            "alta" | "high" => Ok(Self::High),
            "urgente" | "urgent" => Ok(Self::Urgent),
            other => Err(TaskboardError::Validation(format!(
                "unknown priority '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Option<CardPriority>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub watchers: Vec<String>,
}

impl Card {
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            assignee: None,
            priority: None,
            tags: BTreeSet::new(),
            labels: BTreeSet::new(),
            deadline: None,
            watchers: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_priority(mut self, priority: CardPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_watchers<I, S>(mut self, watchers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watchers.extend(watchers.into_iter().map(Into::into));
        self
    }

    /// Adds a tag. Returns false for blank or duplicate tags.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag.trim())
    }

    pub fn set_priority(&mut self, priority: Option<CardPriority>) {
        self.priority = priority;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline.is_some_and(|deadline| deadline < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serializes_in_portuguese() {
        let json = serde_json::to_string(&CardPriority::Urgent).unwrap();
        assert_eq!(json, "\"urgente\"");
        let parsed: CardPriority = serde_json::from_str("\"media\"").unwrap();
        assert_eq!(parsed, CardPriority::Medium);
    }

    #[test]
    fn test_priority_from_str_accepts_both_languages() {
        assert_eq!("alta".parse::<CardPriority>().unwrap(), CardPriority::High);
        assert_eq!("High".parse::<CardPriority>().unwrap(), CardPriority::High);
        assert_eq!("média".parse::<CardPriority>().unwrap(), CardPriority::Medium);
        assert!("whenever".parse::<CardPriority>().is_err());
    }

    #[test]
    fn test_add_tag_rejects_blank_and_duplicates() {
        let mut card = Card::new(1, "Onboarding");
        assert!(!card.add_tag("   "));
        assert!(card.add_tag(" vip "));
        assert!(!card.add_tag("vip"));
        assert_eq!(card.tags.len(), 1);
        assert!(card.tags.contains("vip"));
    }

    #[test]
    fn test_remove_tag() {
        let mut card = Card::new(1, "Onboarding").with_tags(["vip", "renewal"]);
        assert!(card.remove_tag("vip"));
        assert!(!card.remove_tag("vip"));
        assert_eq!(card.tags.len(), 1);
    }

    #[test]
    fn test_is_overdue() {
        let deadline = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let card = Card::new(1, "QBR").with_deadline(deadline);
        assert!(card.is_overdue(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert!(!card.is_overdue(deadline));
        assert!(!Card::new(2, "No deadline").is_overdue(deadline));
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let card: Card = serde_json::from_str(r#"{"id": 3, "title": "Renewal call"}"#).unwrap();
        assert_eq!(card.id, 3);
        assert!(card.tags.is_empty());
        assert!(card.priority.is_none());
    }
}
