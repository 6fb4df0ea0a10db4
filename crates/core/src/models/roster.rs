//! Roster changes pushed by an authoritative team roster

use uuid::Uuid;

use super::{Member, MemberStatus};

/// A change to the team roster originating outside this client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    /// A teammate joined. Ignored if a member with the same id exists.
    MemberJoined(Member),
    /// A teammate left. The current user is never removed.
    MemberLeft { member_id: Uuid },
    PresenceChanged {
        member_id: Uuid,
        status: MemberStatus,
    },
    /// A teammate committed or skipped on their own client
    CommitmentUpdated {
        member_id: Uuid,
        role: Option<String>,
        commitment_complete: bool,
    },
}
