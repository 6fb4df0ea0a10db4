//! Member and role commitment models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a member who skipped the commitment step
pub const NO_COMMITMENT_ROLE: &str = "Joined \u{2014} No Commitment";

/// Presence status of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Online,
    Idle,
    Offline,
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Online => "Online",
            MemberStatus::Idle => "Idle",
            MemberStatus::Offline => "Offline",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a member commits to own during the hackathon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCommitment {
    /// Free-text role title, e.g. "Frontend Lead"
    pub role: String,
    /// What they will build
    pub deliverables: String,
    /// Percentage of the team workload, 10..=100 in steps of 5
    pub responsibility_share: u8,
    /// Only accepted commitments are ever stored
    pub accepted: bool,
}

/// A team member as seen by this client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub initials: String,
    /// `None` means the role is unclaimed
    pub role: Option<String>,
    pub status: MemberStatus,
    /// IANA timezone id, display only
    pub timezone: String,
    pub commitment_complete: bool,
    pub commitment: Option<RoleCommitment>,
    pub is_current_user: bool,
}

impl Member {
    /// Create an online member with no role and no commitment
    pub fn new(name: &str, timezone: &str, is_current_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            initials: initials(name),
            role: None,
            status: MemberStatus::Online,
            timezone: timezone.to_string(),
            commitment_complete: false,
            commitment: None,
            is_current_user,
        }
    }

    /// Record an accepted commitment
    pub fn apply_commitment(&mut self, commitment: RoleCommitment) {
        self.role = Some(commitment.role.clone());
        self.commitment = Some(commitment);
        self.commitment_complete = true;
    }

    /// Mark the member as having joined without a commitment
    pub fn apply_skip(&mut self) {
        self.role = Some(NO_COMMITMENT_ROLE.to_string());
        self.commitment = None;
        self.commitment_complete = true;
    }

    /// True if the member skipped instead of committing
    pub fn skipped_commitment(&self) -> bool {
        self.commitment_complete && self.role.as_deref() == Some(NO_COMMITMENT_ROLE)
    }
}

/// Uppercased first letters of the first two whitespace-separated words
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alex Chen"), "AC");
        assert_eq!(initials("  jordan   kim  "), "JK");
        assert_eq!(initials("Morgan Lee Tao"), "ML");
        assert_eq!(initials("sam"), "S");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_skip_sets_sentinel_role() {
        let mut member = Member::new("Alex Chen", "UTC", true);
        member.apply_skip();

        assert!(member.commitment_complete);
        assert!(member.commitment.is_none());
        assert_eq!(member.role.as_deref(), Some(NO_COMMITMENT_ROLE));
        assert!(member.skipped_commitment());
    }

    #[test]
    fn test_commit_overwrites_skip() {
        let mut member = Member::new("Alex Chen", "UTC", true);
        member.apply_skip();
        member.apply_commitment(RoleCommitment {
            role: "Designer".to_string(),
            deliverables: "Figma screens".to_string(),
            responsibility_share: 30,
            accepted: true,
        });

        assert_eq!(member.role.as_deref(), Some("Designer"));
        assert!(!member.skipped_commitment());
    }
}
