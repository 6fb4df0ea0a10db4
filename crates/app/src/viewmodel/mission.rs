//! Mission control view model

use chrono::{DateTime, Utc};
use hackos_core::derived::{
    checklist_progress, next_action, onboarding_gate, submission_checklist, team_stats,
    unclaimed_role_count, ChecklistItem, GateDecision, NextAction, TeamStats,
};
use hackos_core::{NoteRepository, WorkspaceStore};

use super::summary::TopSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionView {
    pub summary: TopSummary,
    pub next_action: NextAction,
    pub stats: TeamStats,
    pub unclaimed_roles: usize,
    pub checklist: Vec<ChecklistItem>,
    /// (done, total)
    pub checklist_progress: (usize, usize),
    pub gate: GateDecision,
}

impl MissionView {
    pub fn build<R: NoteRepository>(store: &WorkspaceStore<R>, now: DateTime<Utc>) -> Self {
        let context = store.context();
        let checklist = submission_checklist(context);

        Self {
            summary: TopSummary::build(store, now),
            next_action: next_action(context),
            stats: team_stats(context),
            unclaimed_roles: unclaimed_role_count(context),
            checklist_progress: checklist_progress(&checklist),
            checklist,
            gate: onboarding_gate(context),
        }
    }
}
