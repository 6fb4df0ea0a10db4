//! Team service request and response payloads
//!
//! JSON field names are camelCase; timestamps are ISO-8601.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::invite::InviteCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamPayload {
    pub team_name: String,
    pub hackathon_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// IANA timezone identifier
    pub timezone: String,
    pub team_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamResponse {
    pub id: String,
    pub invite_code: InviteCode,
    pub team_name: String,
    pub hackathon_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamPayload {
    pub invite_code: InviteCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamResponse {
    pub team_id: String,
    pub team_name: String,
    pub hackathon_name: String,
    pub member_count: u32,
}
