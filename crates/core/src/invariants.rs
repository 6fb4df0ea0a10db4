//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{HackathonContext, Member, RoleCommitment};

/// Validate that a context is internally consistent
pub fn assert_context_invariants(context: &HackathonContext) {
    let current_users = context.members.iter().filter(|m| m.is_current_user).count();
    debug_assert!(
        current_users == 1,
        "Team {} has {} current users, expected exactly 1",
        context.team_id,
        current_users
    );

    debug_assert!(
        context.end_time > context.start_time,
        "Team {} ends at {} which is not after its start {}",
        context.team_id,
        context.end_time,
        context.start_time
    );

    let mut seen = HashSet::new();
    for member in &context.members {
        debug_assert!(
            seen.insert(member.id),
            "Team {} lists member {} twice",
            context.team_id,
            member.id
        );
        assert_member_invariants(member);
    }
}

/// Validate a single member
pub fn assert_member_invariants(member: &Member) {
    // Skipping assigns the sentinel role, so completion always carries a role
    debug_assert!(
        !member.commitment_complete || member.role.is_some(),
        "Member {} completed onboarding without a role",
        member.id
    );

    if let Some(commitment) = &member.commitment {
        assert_commitment_invariants(commitment);
    }
}

/// Validate that a commitment is fit to be stored
pub fn assert_commitment_invariants(commitment: &RoleCommitment) {
    debug_assert!(
        commitment.accepted,
        "Commitment for role '{}' stored without acceptance",
        commitment.role
    );

    debug_assert!(
        !commitment.role.trim().is_empty() && !commitment.deliverables.trim().is_empty(),
        "Commitment stored with empty role or deliverables"
    );
}
