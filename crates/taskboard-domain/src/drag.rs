//! Drag transfer payload.
//!
//! A drag gesture carries `{cardId, fromColumnKey}` as JSON from the card
//! being dragged to the column it is dropped on. Parsing is strict: anything
//! that does not name a card id and a known column is rejected.

use serde::{Deserialize, Serialize};

use taskboard_core::{TaskboardError, TaskboardResult};

use crate::card::CardId;
use crate::column::ColumnKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub card_id: CardId,
    pub from_column_key: ColumnKey,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    card_id: Option<serde_json::Value>,
    from_column_key: Option<String>,
}

impl DragPayload {
    pub fn new(card_id: CardId, from_column_key: ColumnKey) -> Self {
        Self {
            card_id,
            from_column_key,
        }
    }

    /// Parses a transfer string into a typed payload.
    ///
    /// The card id may arrive as a JSON number or as a numeric string.
    pub fn parse(raw: &str) -> TaskboardResult<Self> {
        let payload: RawPayload = serde_json::from_str(raw)
            .map_err(|e| TaskboardError::MalformedPayload(e.to_string()))?;

        let card_id = match payload.card_id {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
        .and_then(|id| CardId::try_from(id).ok())
        .ok_or_else(|| TaskboardError::MalformedPayload("missing or invalid cardId".into()))?;

        let from_column_key = payload
            .from_column_key
            .ok_or_else(|| TaskboardError::MalformedPayload("missing fromColumnKey".into()))?
            .parse::<ColumnKey>()
            .map_err(|e| TaskboardError::MalformedPayload(e.to_string()))?;

        Ok(Self {
            card_id,
            from_column_key,
        })
    }

    pub fn to_json(&self) -> TaskboardResult<String> {
        serde_json::to_string(self).map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let payload = DragPayload::parse(r#"{"cardId": 12, "fromColumnKey": "doing"}"#).unwrap();
        assert_eq!(payload, DragPayload::new(12, ColumnKey::Doing));
    }

    #[test]
    fn test_parse_accepts_numeric_string_id() {
        let payload = DragPayload::parse(r#"{"cardId": "7", "fromColumnKey": "todo"}"#).unwrap();
        assert_eq!(payload.card_id, 7);
    }

    #[test]
    fn test_to_json_parses_back() {
        let payload = DragPayload::new(3, ColumnKey::Waiting);
        assert_eq!(DragPayload::parse(&payload.to_json().unwrap()).unwrap(), payload);
    }

    #[test]
    fn test_to_json_uses_camel_case_keys() {
        let payload = DragPayload::new(1, ColumnKey::Doing);
        assert_eq!(payload.to_json().unwrap(), r#"{"cardId":1,"fromColumnKey":"doing"}"#);
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        let cases = [
            "",
            "not json",
            "{}",
            r#"{"fromColumnKey": "todo"}"#,
            r#"{"cardId": 1}"#,
            r#"{"cardId": "abc", "fromColumnKey": "todo"}"#,
            r#"{"cardId": -4, "fromColumnKey": "todo"}"#,
            r#"{"cardId": 1.5, "fromColumnKey": "todo"}"#,
            r#"{"cardId": 1, "fromColumnKey": "archive"}"#,
            r#"{"cardId": null, "fromColumnKey": "todo"}"#,
        ];
        for raw in cases {
            let err = DragPayload::parse(raw).unwrap_err();
            assert!(
                matches!(err, TaskboardError::MalformedPayload(_)),
                "expected rejection for {:?}",
                raw
            );
        }
    }
}
