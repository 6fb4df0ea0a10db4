//! Team service seam and its simulated backend

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::invite::InviteCode;
use crate::protocol::{CreateTeamPayload, CreateTeamResponse, JoinTeamPayload, JoinTeamResponse};

/// Remote team registry. Create and join are the only calls.
#[async_trait]
pub trait TeamService: Send + Sync {
    async fn create_team(&self, payload: CreateTeamPayload) -> Result<CreateTeamResponse>;

    async fn join_team(&self, payload: JoinTeamPayload) -> Result<JoinTeamResponse>;
}

/// Run a remote call under a deadline. On expiry the call is dropped.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(limit_ms = limit.as_millis() as u64, "Team service call timed out");
            Err(Error::Timeout(limit))
        }
    }
}

/// Simulated round-trip times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub create: Duration,
    /// Used when the team name contains "slow"
    pub slow_create: Duration,
    pub join: Duration,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            create: Duration::from_millis(1200),
            slow_create: Duration::from_millis(4000),
            join: Duration::from_millis(1000),
        }
    }
}

/// In-process stand-in for the team backend.
///
/// Scenario triggers:
/// - team name containing "error": server error on create
/// - team name containing "slow": slow create
/// - invite code `000000`: invalid code
/// - invite code `EXPIRE`: expired code
#[derive(Debug, Clone, Default)]
pub struct MockTeamService {
    latency: MockLatency,
}

impl MockTeamService {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> MockLatency {
        self.latency
    }
}

/// Eight lowercase base-36 characters
fn generate_team_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[async_trait]
impl TeamService for MockTeamService {
    #[instrument(skip(self, payload), fields(team = %payload.team_name))]
    async fn create_team(&self, payload: CreateTeamPayload) -> Result<CreateTeamResponse> {
        let team_name = payload.team_name.to_lowercase();
        let latency = if team_name.contains("slow") {
            self.latency.slow_create
        } else {
            self.latency.create
        };
        tokio::time::sleep(latency).await;

        if team_name.contains("error") {
            return Err(Error::Server(
                "Server error: could not create team. Please try again.".to_string(),
            ));
        }

        let response = CreateTeamResponse {
            id: generate_team_id(),
            invite_code: InviteCode::generate(),
            team_name: payload.team_name,
            hackathon_name: payload.hackathon_name,
        };
        info!(team_id = %response.id, invite_code = %response.invite_code, "Team created");
        Ok(response)
    }

    #[instrument(skip(self, payload), fields(code = %payload.invite_code))]
    async fn join_team(&self, payload: JoinTeamPayload) -> Result<JoinTeamResponse> {
        tokio::time::sleep(self.latency.join).await;

        let code = payload.invite_code.as_str();
        if code == "000000" {
            return Err(Error::InvalidCode);
        }
        if code.to_lowercase() == "expire" {
            return Err(Error::ExpiredCode);
        }

        let response = JoinTeamResponse {
            team_id: generate_team_id(),
            team_name: format!("Team {}", code),
            hackathon_name: "Demo Hackathon".to_string(),
            member_count: 3,
        };
        info!(team_id = %response.team_id, "Joined team");
        Ok(response)
    }
}
