//! Tournament sessions: one actor per tournament, driven through a handle.
//!
//! Every mutation goes through the actor inbox, so a tournament has a single
//! writer no matter how many handles exist.

pub mod actor;
pub mod messages;

pub use actor::{SessionHandle, TournamentActor};
pub use messages::{SessionError, SessionMessage, SessionResult};
