//! Derived view logic
//!
//! Pure functions of the hackathon context, recomputed on every read. Nothing
//! here holds state; callers pass `now` explicitly so results are
//! reproducible.

use chrono::{DateTime, Duration, Utc};

use crate::models::{ActivityEvent, HackathonContext, Member, MemberStatus, WorkspaceZone};

/// The single most important thing for the current user to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// The current user has neither committed nor skipped
    SetCommitment,
    /// The current user is done but teammates are not
    WaitForTeammates { pending: Vec<String> },
    /// Nothing blocks the team
    TeamReady,
}

impl NextAction {
    pub fn label(&self) -> String {
        match self {
            NextAction::SetCommitment => "Set your role commitment".to_string(),
            NextAction::WaitForTeammates { pending } => {
                format!("Waiting for teammates ({} pending)", pending.len())
            }
            NextAction::TeamReady => "Team ready".to_string(),
        }
    }
}

fn current_user_complete(context: &HackathonContext) -> bool {
    context
        .current_user()
        .map(|m| m.commitment_complete)
        .unwrap_or(false)
}

fn uncommitted_names<'a>(members: impl Iterator<Item = &'a Member>) -> Vec<String> {
    members
        .filter(|m| !m.commitment_complete)
        .map(|m| m.name.clone())
        .collect()
}

/// Mission-control next action, in priority order
pub fn next_action(context: &HackathonContext) -> NextAction {
    if !current_user_complete(context) {
        return NextAction::SetCommitment;
    }

    if context.team_size() > 1 {
        let pending = uncommitted_names(context.members.iter().filter(|m| !m.is_current_user));
        if !pending.is_empty() {
            return NextAction::WaitForTeammates { pending };
        }
    }

    NextAction::TeamReady
}

/// Where a checklist item's completion comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistSource {
    /// Computed from the team state
    Derived,
    /// Not backed by real data yet
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub done: bool,
    pub source: ChecklistSource,
}

const PLACEHOLDER_ITEMS: &[&str] = &[
    "Project description written",
    "Demo video recorded or live demo ready",
    "README and documentation complete",
    "Submission form fields filled",
    "End-to-end flow tested",
];

/// Submission readiness checklist
pub fn submission_checklist(context: &HackathonContext) -> Vec<ChecklistItem> {
    let mut items = vec![
        ChecklistItem {
            label: "All roles claimed",
            done: context.all_roles_claimed(),
            source: ChecklistSource::Derived,
        },
        ChecklistItem {
            label: "All commitments complete",
            done: context.all_commitments_complete(),
            source: ChecklistSource::Derived,
        },
    ];

    items.extend(PLACEHOLDER_ITEMS.iter().map(|label| ChecklistItem {
        label,
        done: false,
        source: ChecklistSource::Placeholder,
    }));

    items
}

/// (done, total) for a checklist
pub fn checklist_progress(items: &[ChecklistItem]) -> (usize, usize) {
    (items.iter().filter(|i| i.done).count(), items.len())
}

/// Whether a zone has real content to show
pub fn zone_has_data(
    zone: WorkspaceZone,
    context: &HackathonContext,
    activity: &[ActivityEvent],
) -> bool {
    match zone {
        WorkspaceZone::MissionControl => true,
        WorkspaceZone::RoleWorkspaces => context.members.iter().any(|m| m.role.is_some()),
        WorkspaceZone::LiveFeed => !activity.is_empty(),
        WorkspaceZone::SubmissionReadiness => true,
        // No conversations, files or slides exist yet
        WorkspaceZone::SharedAi
        | WorkspaceZone::ProjectFolder
        | WorkspaceZone::PresentationStudio => false,
    }
}

/// Zones without data are de-emphasized unless active; they stay selectable
pub fn is_zone_dimmed(
    zone: WorkspaceZone,
    active: WorkspaceZone,
    context: &HackathonContext,
    activity: &[ActivityEvent],
) -> bool {
    zone != active && !zone_has_data(zone, context, activity)
}

/// Countdown urgency by remaining fraction of the total window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Nominal,
    Warning,
    Critical,
}

impl Urgency {
    pub fn classify(remaining: Duration, total: Duration) -> Self {
        if total <= Duration::zero() {
            return Urgency::Critical;
        }
        let fraction = remaining.num_milliseconds() as f64 / total.num_milliseconds() as f64;
        if fraction > 0.5 {
            Urgency::Nominal
        } else if fraction > 0.2 {
            Urgency::Warning
        } else {
            Urgency::Critical
        }
    }
}

/// Time left until the deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Never negative
    pub remaining: Duration,
    pub urgency: Urgency,
}

impl Countdown {
    pub fn at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = (end - now).max(Duration::zero());
        Self {
            remaining,
            urgency: Urgency::classify(remaining, end - start),
        }
    }

    pub fn for_context(context: &HackathonContext, now: DateTime<Utc>) -> Self {
        Self::at(context.start_time, context.end_time, now)
    }

    pub fn is_over(&self) -> bool {
        self.remaining <= Duration::zero()
    }

    /// `HH:MM:SS`, hours may exceed two digits
    pub fn hms(&self) -> String {
        let total = self.remaining.num_seconds().max(0);
        format!(
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

/// Outcome of trying to enter full workspace interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Non-blocking confirmation listing who has not committed yet
    Confirm { uncommitted: Vec<String> },
}

/// The two answers offered by the confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChoice {
    ProceedAnyway,
    Remind,
}

/// Soft onboarding gate. Never blocks: at most asks for confirmation.
pub fn onboarding_gate(context: &HackathonContext) -> GateDecision {
    if context.onboarding_state.is_complete() || context.team_size() <= 1 {
        return GateDecision::Proceed;
    }
    GateDecision::Confirm {
        uncommitted: uncommitted_names(context.members.iter()),
    }
}

/// Mission-control health numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStats {
    pub total: usize,
    pub online: usize,
    pub committed: usize,
    pub uncommitted: Vec<String>,
}

pub fn team_stats(context: &HackathonContext) -> TeamStats {
    TeamStats {
        total: context.team_size(),
        online: context
            .members
            .iter()
            .filter(|m| m.status == MemberStatus::Online)
            .count(),
        committed: context
            .members
            .iter()
            .filter(|m| m.commitment_complete)
            .count(),
        uncommitted: uncommitted_names(context.members.iter()),
    }
}

/// Members that hold a role, in roster order
pub fn claimed_roles(context: &HackathonContext) -> Vec<&Member> {
    context.members.iter().filter(|m| m.role.is_some()).collect()
}

pub fn unclaimed_role_count(context: &HackathonContext) -> usize {
    context.members.iter().filter(|m| m.role.is_none()).count()
}

/// "just now", "5m ago", "3h ago", "2d ago"
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - timestamp).num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::created;
    use crate::models::{ActivityKind, RoleCommitment};

    fn with_teammate(committed: bool) -> HackathonContext {
        let mut ctx = created("Alex Chen");
        let mut mate = Member::new("Jordan Kim", "Europe/London", false);
        if committed {
            mate.apply_skip();
        }
        ctx.members.push(mate);
        ctx
    }

    fn commit(ctx: &mut HackathonContext) {
        ctx.current_user_mut().unwrap().apply_commitment(RoleCommitment {
            role: "Frontend Lead".to_string(),
            deliverables: "UI".to_string(),
            responsibility_share: 50,
            accepted: true,
        });
    }

    #[test]
    fn test_next_action_priority() {
        let mut ctx = with_teammate(false);
        assert_eq!(next_action(&ctx), NextAction::SetCommitment);

        commit(&mut ctx);
        assert_eq!(
            next_action(&ctx),
            NextAction::WaitForTeammates {
                pending: vec!["Jordan Kim".to_string()]
            }
        );

        ctx.members[1].apply_skip();
        assert_eq!(next_action(&ctx), NextAction::TeamReady);
    }

    #[test]
    fn test_next_action_solo_team_is_ready_after_commit() {
        let mut ctx = created("Alex Chen");
        commit(&mut ctx);
        assert_eq!(next_action(&ctx), NextAction::TeamReady);
    }

    #[test]
    fn test_checklist_derived_items() {
        let mut ctx = with_teammate(true);
        let items = submission_checklist(&ctx);
        assert!(!items[0].done);
        assert!(!items[1].done);
        assert!(items[2..]
            .iter()
            .all(|i| i.source == ChecklistSource::Placeholder && !i.done));

        commit(&mut ctx);
        let items = submission_checklist(&ctx);
        assert!(items[0].done);
        assert!(items[1].done);
        assert_eq!(checklist_progress(&items), (2, 7));
    }

    #[test]
    fn test_zone_presence_and_dimming() {
        let mut ctx = created("Alex Chen");
        let active = WorkspaceZone::MissionControl;

        assert!(!zone_has_data(WorkspaceZone::RoleWorkspaces, &ctx, &[]));
        assert!(is_zone_dimmed(WorkspaceZone::RoleWorkspaces, active, &ctx, &[]));
        assert!(!is_zone_dimmed(WorkspaceZone::SubmissionReadiness, active, &ctx, &[]));
        // The active zone is never dimmed
        assert!(!is_zone_dimmed(
            WorkspaceZone::ProjectFolder,
            WorkspaceZone::ProjectFolder,
            &ctx,
            &[]
        ));

        commit(&mut ctx);
        let feed = vec![ActivityEvent::new(ActivityKind::MemberJoined, "Alex", "joined")];
        assert!(zone_has_data(WorkspaceZone::RoleWorkspaces, &ctx, &feed));
        assert!(zone_has_data(WorkspaceZone::LiveFeed, &ctx, &feed));
        assert!(!zone_has_data(WorkspaceZone::LiveFeed, &ctx, &[]));
    }

    #[test]
    fn test_countdown_urgency_bands() {
        let start = Utc::now();
        let end = start + Duration::hours(10);

        assert_eq!(Countdown::at(start, end, start).urgency, Urgency::Nominal);
        assert_eq!(
            Countdown::at(start, end, start + Duration::hours(6)).urgency,
            Urgency::Warning
        );
        assert_eq!(
            Countdown::at(start, end, start + Duration::hours(9)).urgency,
            Urgency::Critical
        );
    }

    #[test]
    fn test_countdown_decreases_and_clamps() {
        let start = Utc::now();
        let end = start + Duration::hours(1);

        let mut previous = Countdown::at(start, end, start).remaining;
        assert_eq!(previous, Duration::hours(1));
        for tick in 1..=3600 {
            let now = start + Duration::seconds(tick);
            let remaining = Countdown::at(start, end, now).remaining;
            assert!(remaining < previous);
            previous = remaining;
        }
        assert_eq!(previous, Duration::zero());

        let after = Countdown::at(start, end, end + Duration::minutes(5));
        assert_eq!(after.remaining, Duration::zero());
        assert!(after.is_over());
        assert_eq!(after.hms(), "00:00:00");
    }

    #[test]
    fn test_countdown_format() {
        let start = Utc::now();
        let end = start + Duration::hours(36) + Duration::minutes(5) + Duration::seconds(9);
        assert_eq!(Countdown::at(start, end, start).hms(), "36:05:09");
    }

    #[test]
    fn test_degenerate_window_is_critical() {
        let now = Utc::now();
        assert_eq!(Urgency::classify(Duration::zero(), Duration::zero()), Urgency::Critical);
        assert_eq!(Countdown::at(now, now, now).urgency, Urgency::Critical);
    }

    #[test]
    fn test_onboarding_gate() {
        let solo = created("Alex Chen");
        assert_eq!(onboarding_gate(&solo), GateDecision::Proceed);

        let team = with_teammate(false);
        match onboarding_gate(&team) {
            GateDecision::Confirm { uncommitted } => assert_eq!(uncommitted.len(), 2),
            GateDecision::Proceed => panic!("expected confirmation"),
        }
    }

    #[test]
    fn test_team_stats() {
        let mut ctx = with_teammate(true);
        ctx.members[1].status = MemberStatus::Idle;
        let stats = team_stats(&ctx);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.online, 1);
        assert_eq!(stats.committed, 1);
        assert_eq!(stats.uncommitted, vec!["Alex Chen".to_string()]);
        assert_eq!(claimed_roles(&ctx).len(), 1);
        assert_eq!(unclaimed_role_count(&ctx), 1);
    }

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::hours(50), now), "2d ago");
    }
}
