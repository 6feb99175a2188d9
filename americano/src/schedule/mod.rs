//! Schedule catalog: the fixed round-robin designs for every supported mode.
//!
//! Each [`ScheduleDefinition`] is an ordered list of rounds; each round is a
//! list of courts; each court lists the 1-based roster slots seated on it.
//! The catalog is built from constant tables and never changes at runtime.
//!
//! ## Example
//!
//! ```
//! use americano::schedule::{self, GameMode};
//!
//! let super8 = schedule::lookup(8, false).unwrap();
//! assert_eq!(super8.mode(), GameMode::Super8);
//! assert_eq!(super8.round_count(), 7);
//!
//! let first = super8.round(0).unwrap();
//! assert_eq!(first.court(1).unwrap().seats(), &[1, 2, 3, 4]);
//! ```

pub mod audit;
pub mod catalog;
pub mod modes;

pub use audit::{Pairing, PairingAudit};
pub use catalog::{CATALOG, Match, Round, ScheduleCatalog, ScheduleDefinition, SlotIndex, lookup};
pub use modes::{FIXED_PAIR_SEATS_PER_COURT, GameMode, INDIVIDUAL_SEATS_PER_COURT};
