//! Hackathon OS Network Library
//!
//! The remote side of team creation and joining.
//!
//! # Architecture
//!
//! - **TeamService**: async seam for the team backend
//! - **MockTeamService**: simulated backend with latency and failure scenarios
//! - **Protocol**: camelCase JSON request/response payloads
//! - **InviteCode**: six-character uppercase join code
//!
//! # Usage
//!
//! ```ignore
//! let service = MockTeamService::default();
//! let payload = JoinTeamPayload { invite_code: "xk42pq".parse()? };
//! let team = with_timeout(Duration::from_secs(10), service.join_team(payload)).await?;
//! ```

pub mod error;
pub mod invite;
pub mod protocol;
pub mod service;

pub use error::{Error, Result};
pub use invite::{InviteCode, INVITE_CODE_LEN};
pub use protocol::{CreateTeamPayload, CreateTeamResponse, JoinTeamPayload, JoinTeamResponse};
pub use service::{with_timeout, MockLatency, MockTeamService, TeamService};

/// Default deadline for team service calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
