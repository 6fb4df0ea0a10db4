//! Team, role, notes and live feed rows

use chrono::{DateTime, Utc};
use hackos_core::derived::{claimed_roles, relative_time};
use hackos_core::{ActivityKind, NoteRepository, WorkspaceStore, NO_COMMITMENT_ROLE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub initials: String,
    pub role: String,
    pub status: &'static str,
    pub timezone: String,
    pub committed: bool,
    pub is_you: bool,
}

pub fn member_rows<R: NoteRepository>(store: &WorkspaceStore<R>) -> Vec<MemberRow> {
    store
        .context()
        .members
        .iter()
        .map(|m| MemberRow {
            name: m.name.clone(),
            initials: m.initials.clone(),
            role: m.role.clone().unwrap_or_else(|| "Unclaimed".to_string()),
            status: m.status.label(),
            timezone: m.timezone.clone(),
            committed: m.commitment_complete,
            is_you: m.is_current_user,
        })
        .collect()
}

/// Role workspace card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRow {
    pub member: String,
    pub role: String,
    pub deliverables: Option<String>,
    pub share: Option<u8>,
}

pub fn role_rows<R: NoteRepository>(store: &WorkspaceStore<R>) -> Vec<RoleRow> {
    claimed_roles(store.context())
        .into_iter()
        .filter(|m| m.role.as_deref() != Some(NO_COMMITMENT_ROLE))
        .map(|m| RoleRow {
            member: m.name.clone(),
            role: m.role.clone().unwrap_or_default(),
            deliverables: m.commitment.as_ref().map(|c| c.deliverables.clone()),
            share: m.commitment.as_ref().map(|c| c.responsibility_share),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub text: String,
    pub age: String,
}

pub fn note_rows<R: NoteRepository>(store: &WorkspaceStore<R>, now: DateTime<Utc>) -> Vec<NoteRow> {
    store
        .notes()
        .iter()
        .map(|n| NoteRow {
            text: n.text.clone(),
            age: relative_time(n.created_at, now),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub kind: ActivityKind,
    pub headline: String,
    pub age: String,
}

/// Live feed, newest first
pub fn activity_rows<R: NoteRepository>(
    store: &WorkspaceStore<R>,
    now: DateTime<Utc>,
) -> Vec<ActivityRow> {
    store
        .activity()
        .iter()
        .map(|e| ActivityRow {
            kind: e.kind,
            headline: format!("{} {}", e.actor, e.description),
            age: relative_time(e.timestamp, now),
        })
        .collect()
}
