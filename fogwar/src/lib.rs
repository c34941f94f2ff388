//! # EC4X Fog-of-war projector
//!
//! Deterministic derivation of a per-house `PlayerState` from the
//! authoritative `GameState` (§4.K): own domain at full fidelity,
//! visible systems and intel at whatever quality tier the house has
//! earned, and public info shared by every house.

pub mod intel;
pub mod player_state;

pub use intel::{ColonyIntel, FleetIntel};
pub use player_state::{derive_player_state, PlayerState};
