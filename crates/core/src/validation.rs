//! Form validation for the entry and commitment steps
//!
//! Validation failures are returned as per-field messages, never raised.
//! Every validator trims its text inputs before checking them.

use chrono::{DateTime, Utc};

use crate::models::RoleCommitment;

/// Length of a team invite code
pub const INVITE_CODE_LEN: usize = 6;

/// Bounds and step of the responsibility share slider
pub const SHARE_MIN: u8 = 10;
pub const SHARE_MAX: u8 = 100;
pub const SHARE_STEP: u8 = 5;

/// Raw input of the role commitment form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentForm {
    pub role: String,
    pub deliverables: String,
    pub responsibility_share: u8,
    pub accepted: bool,
}

impl Default for CommitmentForm {
    fn default() -> Self {
        Self {
            role: String::new(),
            deliverables: String::new(),
            responsibility_share: 50,
            accepted: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitmentErrors {
    pub role: Option<&'static str>,
    pub deliverables: Option<&'static str>,
    pub responsibility_share: Option<&'static str>,
    pub accepted: Option<&'static str>,
}

impl CommitmentErrors {
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.deliverables.is_none()
            && self.responsibility_share.is_none()
            && self.accepted.is_none()
    }

    /// (field, message) pairs for display
    pub fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("role", self.role),
            ("deliverables", self.deliverables),
            ("responsibility_share", self.responsibility_share),
            ("accepted", self.accepted),
        ]
        .into_iter()
        .filter_map(|(field, msg)| msg.map(|m| (field, m)))
        .collect()
    }
}

/// Validate the commitment form into an accepted commitment
pub fn validate_commitment(form: &CommitmentForm) -> Result<RoleCommitment, CommitmentErrors> {
    let mut errors = CommitmentErrors::default();
    let role = form.role.trim();
    let deliverables = form.deliverables.trim();

    if role.is_empty() {
        errors.role = Some("Choose or type a role.");
    }
    if deliverables.is_empty() {
        errors.deliverables = Some("Describe what you will deliver.");
    }
    let share = form.responsibility_share;
    if !(SHARE_MIN..=SHARE_MAX).contains(&share) || share % SHARE_STEP != 0 {
        errors.responsibility_share = Some("Pick a share between 10% and 100% in steps of 5.");
    }
    if !form.accepted {
        errors.accepted = Some("You must accept responsibility to commit.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RoleCommitment {
        role: role.to_string(),
        deliverables: deliverables.to_string(),
        responsibility_share: share,
        accepted: true,
    })
}

/// Raw input of the create-team form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTeamForm {
    pub user_name: String,
    pub team_name: String,
    pub hackathon_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub timezone: String,
    pub team_size: Option<u32>,
}

/// Create-team input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateTeam {
    pub user_name: String,
    pub team_name: String,
    pub hackathon_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub timezone: String,
    pub team_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTeamErrors {
    pub user_name: Option<&'static str>,
    pub team_name: Option<&'static str>,
    pub hackathon_name: Option<&'static str>,
    pub start_time: Option<&'static str>,
    pub end_time: Option<&'static str>,
    pub timezone: Option<&'static str>,
    pub team_size: Option<&'static str>,
}

impl CreateTeamErrors {
    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    pub fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("user_name", self.user_name),
            ("team_name", self.team_name),
            ("hackathon_name", self.hackathon_name),
            ("start_time", self.start_time),
            ("end_time", self.end_time),
            ("timezone", self.timezone),
            ("team_size", self.team_size),
        ]
        .into_iter()
        .filter_map(|(field, msg)| msg.map(|m| (field, m)))
        .collect()
    }
}

pub fn validate_create_team(form: &CreateTeamForm) -> Result<ValidCreateTeam, CreateTeamErrors> {
    let mut errors = CreateTeamErrors::default();

    let user_name = form.user_name.trim();
    if user_name.is_empty() {
        errors.user_name = Some("Your name is required.");
    }

    let team_name = form.team_name.trim();
    if team_name.is_empty() {
        errors.team_name = Some("Team name is required.");
    } else if team_name.chars().count() < 2 {
        errors.team_name = Some("Must be at least 2 characters.");
    }

    let hackathon_name = form.hackathon_name.trim();
    if hackathon_name.is_empty() {
        errors.hackathon_name = Some("Hackathon name is required.");
    }

    if form.start_time.is_none() {
        errors.start_time = Some("Start time is required.");
    }

    match (form.start_time, form.end_time) {
        (_, None) => errors.end_time = Some("End time is required."),
        (Some(start), Some(end)) if end <= start => {
            errors.end_time = Some("End time must be after start time.");
        }
        _ => {}
    }

    let timezone = form.timezone.trim();
    if timezone.is_empty() {
        errors.timezone = Some("Please select a timezone.");
    }

    match form.team_size {
        None | Some(0) => errors.team_size = Some("Please select a team size."),
        Some(_) => {}
    }

    match (form.start_time, form.end_time, form.team_size) {
        (Some(start_time), Some(end_time), Some(team_size)) if errors.is_empty() => {
            Ok(ValidCreateTeam {
                user_name: user_name.to_string(),
                team_name: team_name.to_string(),
                hackathon_name: hackathon_name.to_string(),
                start_time,
                end_time,
                timezone: timezone.to_string(),
                team_size,
            })
        }
        _ => Err(errors),
    }
}

/// Raw input of the join-team form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinTeamForm {
    pub user_name: String,
    pub invite_code: String,
}

/// Join-team input that passed validation; the code is uppercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidJoinTeam {
    pub user_name: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinTeamErrors {
    pub user_name: Option<&'static str>,
    pub invite_code: Option<&'static str>,
}

impl JoinTeamErrors {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.invite_code.is_none()
    }

    pub fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [("user_name", self.user_name), ("invite_code", self.invite_code)]
            .into_iter()
            .filter_map(|(field, msg)| msg.map(|m| (field, m)))
            .collect()
    }
}

pub fn validate_join_team(form: &JoinTeamForm) -> Result<ValidJoinTeam, JoinTeamErrors> {
    let mut errors = JoinTeamErrors::default();

    let user_name = form.user_name.trim();
    if user_name.is_empty() {
        errors.user_name = Some("Your name is required.");
    }

    let code = form.invite_code.trim();
    if code.chars().count() != INVITE_CODE_LEN {
        errors.invite_code = Some("Please enter the full 6-character invite code.");
    } else if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.invite_code = Some("Invite codes contain only letters and digits.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidJoinTeam {
        user_name: user_name.to_string(),
        invite_code: code.to_ascii_uppercase(),
    })
}
