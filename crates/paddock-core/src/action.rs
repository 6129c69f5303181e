//! Social action domain model.
//!
//! Actions are immutable log entries describing a simulated social-media
//! interaction. They are appended to an ordered, append-only history and
//! never mutated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// The kinds of social actions the engine can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Post,
    Reply,
    Like,
    Mention,
}

/// The kinds of messages the text pipeline can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    Post,
    Reply,
    StatusUpdate,
    Mention,
}

/// An immutable record of one performed social action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique action identifier (UUID format)
    pub id: String,
    /// What was performed
    pub kind: ActionKind,
    /// Text content attached to the action
    pub content: String,
    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
    /// Optional target (replied-to comment, liked post, mentioned name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Kind-specific synthesized metadata
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Action {
    /// Creates a new action stamped with the current time.
    pub fn new(kind: ActionKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            target: None,
            metadata: HashMap::new(),
        }
    }

    /// Sets the action target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Adds one metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
