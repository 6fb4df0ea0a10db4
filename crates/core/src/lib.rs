//! Hackathon OS Core Library
//!
//! Domain models, context construction, validation, derived workspace views,
//! the workspace state store, and local storage for Hackathon OS.

pub mod context;
pub mod derived;
pub mod error;
pub mod invariants;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

pub use context::{
    create_hackathon_context, join_hackathon_context, CreateContextParams, JoinContextParams,
};
pub use error::{Error, Result};
pub use models::*;
pub use storage::{Database, NoteRepository};
pub use store::{HackathonEdit, StoreEvent, SubscriptionId, WorkspaceStore};
