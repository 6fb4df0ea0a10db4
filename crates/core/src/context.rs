//! Hackathon context constructors
//!
//! Build the initial context for the two ways into a workspace: creating a
//! team or joining one. Only the local user is materialized as a member.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::invariants::assert_context_invariants;
use crate::models::{HackathonContext, Member, OnboardingState, Phase};

/// Inputs for a freshly created team
#[derive(Debug, Clone)]
pub struct CreateContextParams {
    /// Team id issued by the team service
    pub team_id: String,
    pub team_name: String,
    pub hackathon_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
    pub invite_code: String,
    pub user_name: String,
}

/// Inputs for joining an existing team
#[derive(Debug, Clone)]
pub struct JoinContextParams {
    pub team_name: String,
    pub hackathon_name: String,
    pub team_id: String,
    pub invite_code: String,
    pub user_name: String,
    /// The join response carries no schedule; these seed a provisional window
    pub timezone: String,
    pub starts_at: DateTime<Utc>,
    pub duration: Duration,
}

fn new_hackathon_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("h-{}", &id[..8])
}

/// Context for the team creator: sole member, owner, solo mode
pub fn create_hackathon_context(params: CreateContextParams) -> HackathonContext {
    debug_assert!(
        !params.user_name.trim().is_empty(),
        "create_hackathon_context called with empty user name"
    );

    let creator = Member::new(params.user_name.trim(), &params.timezone, true);
    let context = HackathonContext {
        hackathon_id: new_hackathon_id(),
        hackathon_name: params.hackathon_name,
        team_id: params.team_id,
        team_name: params.team_name,
        invite_code: params.invite_code.to_uppercase(),
        start_time: params.start_time,
        end_time: params.end_time,
        timezone: params.timezone,
        phase: Phase::Planning,
        onboarding_state: OnboardingState::SoloMode,
        members: vec![creator],
        is_owner: true,
    };

    assert_context_invariants(&context);
    context
}

/// Context for a joiner: sole local member, not owner, team forming
pub fn join_hackathon_context(params: JoinContextParams) -> HackathonContext {
    debug_assert!(
        !params.user_name.trim().is_empty(),
        "join_hackathon_context called with empty user name"
    );

    let joiner = Member::new(params.user_name.trim(), &params.timezone, true);
    let context = HackathonContext {
        hackathon_id: new_hackathon_id(),
        hackathon_name: params.hackathon_name,
        team_id: params.team_id,
        team_name: params.team_name,
        invite_code: params.invite_code.to_uppercase(),
        start_time: params.starts_at,
        end_time: params.starts_at + params.duration,
        timezone: params.timezone,
        phase: Phase::Planning,
        onboarding_state: OnboardingState::TeamForming,
        members: vec![joiner],
        is_owner: false,
    };

    assert_context_invariants(&context);
    context
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn created(user_name: &str) -> HackathonContext {
        let now = Utc::now();
        create_hackathon_context(CreateContextParams {
            team_id: "t-test".to_string(),
            team_name: "Quantum Quokkas".to_string(),
            hackathon_name: "TestHacks".to_string(),
            start_time: now,
            end_time: now + Duration::hours(36),
            timezone: "America/New_York".to_string(),
            invite_code: "abc123".to_string(),
            user_name: user_name.to_string(),
        })
    }

    pub fn joined(user_name: &str) -> HackathonContext {
        join_hackathon_context(JoinContextParams {
            team_name: "Team XK42PQ".to_string(),
            hackathon_name: "Demo Hackathon".to_string(),
            team_id: "t-join".to_string(),
            invite_code: "xk42pq".to_string(),
            user_name: user_name.to_string(),
            timezone: "UTC".to_string(),
            starts_at: Utc::now(),
            duration: Duration::hours(36),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_create_context() {
        let ctx = created("Alex Chen");

        assert_eq!(ctx.members.len(), 1);
        assert!(ctx.members[0].is_current_user);
        assert_eq!(ctx.members[0].initials, "AC");
        assert!(ctx.members[0].role.is_none());
        assert!(!ctx.members[0].commitment_complete);
        assert_eq!(ctx.onboarding_state, OnboardingState::SoloMode);
        assert_eq!(ctx.phase, Phase::Planning);
        assert!(ctx.is_owner);
        assert_eq!(ctx.invite_code, "ABC123");
        assert!(ctx.end_time > ctx.start_time);
    }

    #[test]
    fn test_join_context() {
        let ctx = joined("jordan kim");

        assert_eq!(ctx.members.len(), 1);
        assert!(ctx.members[0].is_current_user);
        assert_eq!(ctx.members[0].initials, "JK");
        assert!(!ctx.is_owner);
        assert_eq!(ctx.onboarding_state, OnboardingState::TeamForming);
        assert_eq!(ctx.total_duration(), Duration::hours(36));
        assert_eq!(ctx.invite_code, "XK42PQ");
    }

    #[test]
    fn test_hackathon_ids_are_unique() {
        let a = created("A");
        let b = created("B");
        assert_ne!(a.hackathon_id, b.hackathon_id);
        assert!(a.hackathon_id.starts_with("h-"));
    }
}
