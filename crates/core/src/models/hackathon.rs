//! Hackathon context - the aggregate root of a workspace session

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Member;

/// Coarse hackathon lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Planning,
    Build,
    Submission,
    Presentation,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Planning => "Planning",
            Phase::Build => "Build",
            Phase::Submission => "Submission",
            Phase::Presentation => "Presentation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Team onboarding progress, ordered from earliest to latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingState {
    SoloMode,
    TeamForming,
    CommitmentsInProgress,
    OnboardingComplete,
}

impl OnboardingState {
    pub fn label(&self) -> &'static str {
        match self {
            OnboardingState::SoloMode => "Solo Mode",
            OnboardingState::TeamForming => "Team Forming",
            OnboardingState::CommitmentsInProgress => "Commitments In Progress",
            OnboardingState::OnboardingComplete => "Onboarding Complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, OnboardingState::OnboardingComplete)
    }
}

impl std::fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything the workspace knows about one team in one hackathon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonContext {
    pub hackathon_id: String,
    pub hackathon_name: String,
    pub team_id: String,
    pub team_name: String,
    /// Six-character code teammates use to join
    pub invite_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Team reference IANA timezone, display only
    pub timezone: String,
    pub phase: Phase,
    pub onboarding_state: OnboardingState,
    pub members: Vec<Member>,
    pub is_owner: bool,
}

impl HackathonContext {
    /// The member flagged as the local user
    pub fn current_user(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_current_user)
    }

    pub fn current_user_mut(&mut self) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.is_current_user)
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn member_mut(&mut self, id: Uuid) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    pub fn team_size(&self) -> usize {
        self.members.len()
    }

    /// True when every member has committed or skipped
    pub fn all_commitments_complete(&self) -> bool {
        self.members.iter().all(|m| m.commitment_complete)
    }

    /// True when every member has a non-null role
    pub fn all_roles_claimed(&self) -> bool {
        self.members.iter().all(|m| m.role.is_some())
    }

    pub fn total_duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Move onboarding forward to `next`; never moves backwards
    pub fn advance_onboarding(&mut self, next: OnboardingState) -> bool {
        if next > self.onboarding_state {
            self.onboarding_state = next;
            true
        } else {
            false
        }
    }

    /// Recompute onboarding after a commitment change.
    ///
    /// Only ever promotes to `OnboardingComplete`.
    pub fn refresh_onboarding_completion(&mut self) -> bool {
        if self.all_commitments_complete() {
            self.advance_onboarding(OnboardingState::OnboardingComplete)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_ordering() {
        assert!(OnboardingState::SoloMode < OnboardingState::TeamForming);
        assert!(OnboardingState::TeamForming < OnboardingState::CommitmentsInProgress);
        assert!(OnboardingState::CommitmentsInProgress < OnboardingState::OnboardingComplete);
    }

    #[test]
    fn test_onboarding_serializes_kebab_case() {
        let json = serde_json::to_string(&OnboardingState::CommitmentsInProgress).unwrap();
        assert_eq!(json, "\"commitments-in-progress\"");
        let phase = serde_json::to_string(&Phase::Submission).unwrap();
        assert_eq!(phase, "\"submission\"");
    }
}
