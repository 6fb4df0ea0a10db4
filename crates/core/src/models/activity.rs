//! Activity feed events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    MemberJoined,
    CommitmentSaved,
    HackathonEdited,
    AiSuggestion,
}

/// Append-only feed entry. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Display name of whoever caused the event
    pub actor: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(kind: ActivityKind, actor: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            actor: actor.into(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}
