//! Data models for Hackathon OS

mod activity;
mod hackathon;
mod member;
mod note;
mod roster;
mod zone;

pub use activity::*;
pub use hackathon::*;
pub use member::*;
pub use note::*;
pub use roster::*;
pub use zone::*;
