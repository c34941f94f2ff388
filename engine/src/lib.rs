//! # EC4X Engine
//!
//! The deterministic turn resolver (§4.D): economy, colonization,
//! research, and diplomacy subsystems, wired together by a fixed
//! Conflict -> Income -> Command -> Maintenance phase pipeline and
//! exposed through `resolver::resolve_turn`.

pub mod colonization;
pub mod construction;
pub mod diplomacy;
pub mod economy;
pub mod espionage;
pub mod events;
pub mod phases;
pub mod research;
pub mod resolver;
pub mod transfer;

pub use events::TurnEvent;
pub use resolver::{resolve_turn, TurnOutcome};
