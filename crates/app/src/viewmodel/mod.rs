//! View models
//!
//! Pull-based projections of the workspace store into display rows. Views
//! rebuild these after every store event.

mod collab;
mod mission;
mod nav;
mod summary;

pub use collab::{activity_rows, member_rows, note_rows, role_rows, ActivityRow, MemberRow, NoteRow, RoleRow};
pub use mission::MissionView;
pub use nav::{nav_sections, NavItem, NavSection};
pub use summary::{spawn_countdown, TopSummary};

#[cfg(test)]
pub(crate) use mission::tests::store as test_store;
