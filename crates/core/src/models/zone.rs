//! Workspace zones and their navigation grouping

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the seven workspace sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceZone {
    #[default]
    MissionControl,
    SharedAi,
    ProjectFolder,
    RoleWorkspaces,
    LiveFeed,
    PresentationStudio,
    SubmissionReadiness,
}

impl WorkspaceZone {
    pub const ALL: [WorkspaceZone; 7] = [
        WorkspaceZone::MissionControl,
        WorkspaceZone::SharedAi,
        WorkspaceZone::ProjectFolder,
        WorkspaceZone::RoleWorkspaces,
        WorkspaceZone::LiveFeed,
        WorkspaceZone::PresentationStudio,
        WorkspaceZone::SubmissionReadiness,
    ];

    /// Stable identifier, matches the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            WorkspaceZone::MissionControl => "mission-control",
            WorkspaceZone::SharedAi => "shared-ai",
            WorkspaceZone::ProjectFolder => "project-folder",
            WorkspaceZone::RoleWorkspaces => "role-workspaces",
            WorkspaceZone::LiveFeed => "live-feed",
            WorkspaceZone::PresentationStudio => "presentation-studio",
            WorkspaceZone::SubmissionReadiness => "submission-readiness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceZone::MissionControl => "Mission Control",
            WorkspaceZone::SharedAi => "AI Coach",
            WorkspaceZone::ProjectFolder => "Project Folder",
            WorkspaceZone::RoleWorkspaces => "Role Workspaces",
            WorkspaceZone::LiveFeed => "Live Feed",
            WorkspaceZone::PresentationStudio => "Presentation Studio",
            WorkspaceZone::SubmissionReadiness => "Submission Readiness",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            WorkspaceZone::MissionControl => "Mission",
            WorkspaceZone::SharedAi => "AI",
            WorkspaceZone::ProjectFolder => "Files",
            WorkspaceZone::RoleWorkspaces => "Roles",
            WorkspaceZone::LiveFeed => "Feed",
            WorkspaceZone::PresentationStudio => "Present",
            WorkspaceZone::SubmissionReadiness => "Submit",
        }
    }
}

impl std::fmt::Display for WorkspaceZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WorkspaceZone {
    type Err = Error;

    /// Accepts the zone id or its short label, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        WorkspaceZone::ALL
            .into_iter()
            .find(|zone| zone.id() == wanted || zone.short_label().to_lowercase() == wanted)
            .ok_or_else(|| Error::NotFound(format!("zone '{}'", s.trim())))
    }
}

/// A labelled group of zones in the navigation rail
#[derive(Debug, Clone, Copy)]
pub struct NavStage {
    pub label: &'static str,
    pub zones: &'static [WorkspaceZone],
}

/// Navigation stages in display order
pub const NAV_STAGES: &[NavStage] = &[
    NavStage {
        label: "Orient",
        zones: &[WorkspaceZone::MissionControl],
    },
    NavStage {
        label: "Organize",
        zones: &[WorkspaceZone::RoleWorkspaces, WorkspaceZone::SharedAi],
    },
    NavStage {
        label: "Build",
        zones: &[WorkspaceZone::ProjectFolder, WorkspaceZone::LiveFeed],
    },
    NavStage {
        label: "Deliver",
        zones: &[
            WorkspaceZone::PresentationStudio,
            WorkspaceZone::SubmissionReadiness,
        ],
    },
];
