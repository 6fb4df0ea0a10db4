//! Navigation rail view model

use hackos_core::derived::is_zone_dimmed;
use hackos_core::{NoteRepository, WorkspaceStore, WorkspaceZone, NAV_STAGES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub zone: WorkspaceZone,
    pub short_label: &'static str,
    pub active: bool,
    /// De-emphasized but still selectable
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

pub fn nav_sections<R: NoteRepository>(store: &WorkspaceStore<R>) -> Vec<NavSection> {
    let active = store.active_zone();

    NAV_STAGES
        .iter()
        .map(|stage| NavSection {
            label: stage.label,
            items: stage
                .zones
                .iter()
                .map(|&zone| NavItem {
                    zone,
                    short_label: zone.short_label(),
                    active: zone == active,
                    dimmed: is_zone_dimmed(zone, active, store.context(), store.activity()),
                })
                .collect(),
        })
        .collect()
}
