//! Workspace state store
//!
//! Single owner of the live hackathon context for a session, plus the
//! session-scoped active zone, quick notes and activity feed. Every mutation
//! runs to completion and then notifies subscribers; views pull whatever
//! derived values they need afterwards.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::invariants::assert_context_invariants;
use crate::models::{
    ActivityEvent, ActivityKind, HackathonContext, Member, OnboardingState, Phase, QuickNote,
    RoleCommitment, RosterChange, WorkspaceZone, NO_COMMITMENT_ROLE,
};
use crate::storage::NoteRepository;

/// Handle returned by [`WorkspaceStore::subscribe`]
pub type SubscriptionId = u64;

/// What changed in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Members, onboarding state, phase or hackathon details changed
    ContextChanged,
    /// The whole context was swapped out
    ContextReplaced,
    ZoneChanged(WorkspaceZone),
    NotesChanged,
    ActivityAppended(ActivityEvent),
}

type Listener = Box<dyn Fn(&StoreEvent) + Send>;

/// Owner-only edit of the hackathon details. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HackathonEdit {
    pub hackathon_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub timezone: Option<String>,
}

pub struct WorkspaceStore<R: NoteRepository> {
    context: HackathonContext,
    active_zone: WorkspaceZone,
    notes: Vec<QuickNote>,
    /// Newest first
    activity: Vec<ActivityEvent>,
    repo: R,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

fn check_current_user(context: &HackathonContext) -> Result<()> {
    let count = context.members.iter().filter(|m| m.is_current_user).count();
    if count != 1 {
        return Err(Error::Invariant(format!(
            "team {} has {} current users, expected exactly 1",
            context.team_id, count
        )));
    }
    Ok(())
}

impl<R: NoteRepository> WorkspaceStore<R> {
    /// Take ownership of a context. Notes are read from the repository once.
    pub fn new(context: HackathonContext, repo: R) -> Result<Self> {
        Self::validate_context(&context)?;
        let notes = repo.load_notes()?;
        Ok(Self::with_notes(context, repo, notes))
    }

    /// Check a context before handing it over. `new` runs the same check.
    pub fn validate_context(context: &HackathonContext) -> Result<()> {
        check_current_user(context)
    }

    /// Build a store from notes the caller already loaded. The context must
    /// have passed [`WorkspaceStore::validate_context`].
    pub fn with_notes(context: HackathonContext, repo: R, notes: Vec<QuickNote>) -> Self {
        assert_context_invariants(&context);
        info!(
            team_id = %context.team_id,
            members = context.members.len(),
            notes = notes.len(),
            "Workspace store ready"
        );

        let mut store = Self {
            context,
            active_zone: WorkspaceZone::default(),
            notes,
            activity: Vec::new(),
            repo,
            listeners: Vec::new(),
            next_subscription: 1,
        };
        store.seed_activity();
        store
    }

    fn seed_activity(&mut self) {
        let actor = self.current_user().name.clone();
        self.activity = vec![ActivityEvent::new(
            ActivityKind::MemberJoined,
            actor,
            "joined the team",
        )];
    }

    pub fn context(&self) -> &HackathonContext {
        &self.context
    }

    pub fn active_zone(&self) -> WorkspaceZone {
        self.active_zone
    }

    pub fn notes(&self) -> &[QuickNote] {
        &self.notes
    }

    /// Activity feed, newest first
    pub fn activity(&self) -> &[ActivityEvent] {
        &self.activity
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The local user. A context without one is a programming error.
    pub fn current_user(&self) -> &Member {
        match self.context.current_user() {
            Some(member) => member,
            None => panic!(
                "workspace for team {} has no current user",
                self.context.team_id
            ),
        }
    }

    pub fn current_user_committed(&self) -> bool {
        self.current_user().commitment_complete
    }

    /// Register a callback run after every mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&self, event: StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }

    fn record(&mut self, kind: ActivityKind, actor: String, description: String) {
        let event = ActivityEvent::new(kind, actor, description);
        self.activity.insert(0, event.clone());
        self.notify(StoreEvent::ActivityAppended(event));
    }

    pub fn set_active_zone(&mut self, zone: WorkspaceZone) {
        if self.active_zone == zone {
            return;
        }
        debug!(zone = zone.id(), "Active zone changed");
        self.active_zone = zone;
        self.notify(StoreEvent::ZoneChanged(zone));
    }

    /// Promote onboarding as far as the roster allows. Never demotes.
    fn refresh_onboarding(&mut self) -> bool {
        let before = self.context.onboarding_state;
        if !self.context.refresh_onboarding_completion()
            && self.context.team_size() > 1
            && self.context.members.iter().any(|m| m.commitment_complete)
        {
            self.context
                .advance_onboarding(OnboardingState::CommitmentsInProgress);
        }

        let after = self.context.onboarding_state;
        if after != before {
            info!(from = %before, to = %after, "Onboarding state advanced");
        }
        after != before
    }

    /// Store an accepted commitment for the current user.
    ///
    /// Calling again overwrites the previous commitment and logs again.
    pub fn save_commitment(&mut self, commitment: RoleCommitment) -> Result<()> {
        if !commitment.accepted {
            return Err(Error::InvalidOperation(
                "commitment must be accepted before it is saved".to_string(),
            ));
        }

        let description = format!(
            "committed as {} \u{2014} \"{}\"",
            commitment.role, commitment.deliverables
        );
        let actor = match self.context.current_user_mut() {
            Some(member) => {
                member.apply_commitment(commitment);
                member.name.clone()
            }
            None => return Err(Error::Invariant("no current user".to_string())),
        };

        self.refresh_onboarding();
        debug!(actor = %actor, "Commitment saved");
        self.notify(StoreEvent::ContextChanged);
        self.record(ActivityKind::CommitmentSaved, actor, description);
        Ok(())
    }

    /// Mark the current user as joined without a commitment
    pub fn skip_commitment(&mut self) -> Result<()> {
        let actor = match self.context.current_user_mut() {
            Some(member) => {
                member.apply_skip();
                member.name.clone()
            }
            None => return Err(Error::Invariant("no current user".to_string())),
        };

        self.refresh_onboarding();
        debug!(actor = %actor, "Commitment skipped");
        self.notify(StoreEvent::ContextChanged);
        self.record(
            ActivityKind::MemberJoined,
            actor,
            "joined without a role commitment".to_string(),
        );
        Ok(())
    }

    /// Prepend a note. Blank text is ignored and returns `None`.
    pub fn add_note(&mut self, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let note = QuickNote::new(text);
        let id = note.id;
        self.notes.insert(0, note);
        self.persist_notes();
        self.notify(StoreEvent::NotesChanged);
        Some(id)
    }

    /// Remove a note by id. Unknown ids are not an error.
    pub fn delete_note(&mut self, id: Uuid) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;

        self.persist_notes();
        if removed {
            self.notify(StoreEvent::NotesChanged);
        }
        removed
    }

    fn persist_notes(&self) {
        if let Err(e) = self.repo.save_notes(&self.notes) {
            warn!(error = %e, "Failed to persist quick notes");
        }
    }

    /// Swap in a different context. Notes are kept, activity restarts.
    pub fn replace_context(&mut self, context: HackathonContext) -> Result<()> {
        check_current_user(&context)?;
        assert_context_invariants(&context);

        info!(from = %self.context.team_id, to = %context.team_id, "Replacing workspace context");
        self.context = context;
        self.seed_activity();
        self.notify(StoreEvent::ContextReplaced);
        Ok(())
    }

    /// Set the lifecycle phase on behalf of an external lifecycle owner
    pub fn set_phase(&mut self, phase: Phase) {
        if self.context.phase == phase {
            return;
        }
        info!(from = %self.context.phase, to = %phase, "Hackathon phase changed");
        self.context.phase = phase;
        self.notify(StoreEvent::ContextChanged);
    }

    /// Owner-only update of the hackathon name, time window or timezone
    pub fn edit_hackathon(&mut self, edit: HackathonEdit) -> Result<()> {
        if !self.context.is_owner {
            return Err(Error::InvalidOperation(
                "only the team owner can edit the hackathon".to_string(),
            ));
        }

        let name = match &edit.hackathon_name {
            Some(name) if name.trim().is_empty() => {
                return Err(Error::InvalidOperation(
                    "hackathon name cannot be empty".to_string(),
                ))
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let start = edit.start_time.unwrap_or(self.context.start_time);
        let end = edit.end_time.unwrap_or(self.context.end_time);
        if end <= start {
            return Err(Error::InvalidOperation(
                "end time must be after start time".to_string(),
            ));
        }

        let mut changed = Vec::new();
        if let Some(name) = name {
            if name != self.context.hackathon_name {
                self.context.hackathon_name = name;
                changed.push("name");
            }
        }
        if start != self.context.start_time {
            self.context.start_time = start;
            changed.push("start time");
        }
        if end != self.context.end_time {
            self.context.end_time = end;
            changed.push("end time");
        }
        if let Some(timezone) = edit.timezone {
            if timezone != self.context.timezone {
                self.context.timezone = timezone;
                changed.push("timezone");
            }
        }

        if changed.is_empty() {
            return Ok(());
        }

        let actor = self.current_user().name.clone();
        self.notify(StoreEvent::ContextChanged);
        self.record(
            ActivityKind::HackathonEdited,
            actor,
            format!("updated the hackathon {}", changed.join(", ")),
        );
        Ok(())
    }

    /// Apply a change from the authoritative team roster.
    ///
    /// Returns false when the change does not apply to this roster.
    pub fn apply_roster_change(&mut self, change: RosterChange) -> bool {
        let current_id = self.current_user().id;

        match change {
            RosterChange::MemberJoined(mut member) => {
                if self.context.member(member.id).is_some() {
                    return false;
                }
                member.is_current_user = false;
                let actor = member.name.clone();
                self.context.members.push(member);
                self.context.advance_onboarding(OnboardingState::TeamForming);
                self.refresh_onboarding();
                self.notify(StoreEvent::ContextChanged);
                self.record(ActivityKind::MemberJoined, actor, "joined the team".to_string());
            }
            RosterChange::MemberLeft { member_id } => {
                if member_id == current_id {
                    warn!(%member_id, "Ignoring roster removal of the current user");
                    return false;
                }
                let before = self.context.members.len();
                self.context.members.retain(|m| m.id != member_id);
                if self.context.members.len() == before {
                    return false;
                }
                self.refresh_onboarding();
                self.notify(StoreEvent::ContextChanged);
            }
            RosterChange::PresenceChanged { member_id, status } => {
                match self.context.member_mut(member_id) {
                    Some(member) if member.status != status => member.status = status,
                    _ => return false,
                }
                self.notify(StoreEvent::ContextChanged);
            }
            RosterChange::CommitmentUpdated {
                member_id,
                role,
                commitment_complete,
            } => {
                if member_id == current_id {
                    return false;
                }
                let Some(member) = self.context.member_mut(member_id) else {
                    return false;
                };
                member.role = match (role, commitment_complete) {
                    (None, true) => Some(NO_COMMITMENT_ROLE.to_string()),
                    (role, _) => role,
                };
                member.commitment_complete = commitment_complete;
                member.commitment = None;
                let actor = member.name.clone();
                let role = member.role.clone();

                self.refresh_onboarding();
                self.notify(StoreEvent::ContextChanged);
                if commitment_complete {
                    let description = match role.as_deref() {
                        Some(NO_COMMITMENT_ROLE) | None => {
                            "joined without a role commitment".to_string()
                        }
                        Some(role) => format!("committed as {}", role),
                    };
                    self.record(ActivityKind::CommitmentSaved, actor, description);
                }
            }
        }

        assert_context_invariants(&self.context);
        true
    }
}
