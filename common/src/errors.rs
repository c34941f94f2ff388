//! Error taxonomy (§7): `ValidationError` is expected and discarded
//! per-order, `Corruption` quarantines the game, `AuthorityMismatch` lives
//! in `ec4x-wire` since it is purely a client-side wire concern.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{ColonyId, FacilityId, FleetId, HouseId, ShipId, SquadronId, SystemId};

/// An expected rejection of a single order within a packet. Per §7, a
/// `ValidationError` never aborts the rest of the packet — the offending
/// order is discarded and the remainder still applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("house {0} does not own colony {1}")]
    NotColonyOwner(HouseId, ColonyId),

    #[error("house {0} does not own fleet {1}")]
    NotFleetOwner(HouseId, FleetId),

    #[error("house {0} does not own squadron {1}")]
    NotSquadronOwner(HouseId, SquadronId),

    #[error("colony not found: {0}")]
    ColonyNotFound(ColonyId),

    #[error("system not found: {0}")]
    SystemNotFound(SystemId),

    #[error("fleet not found: {0}")]
    FleetNotFound(FleetId),

    #[error("squadron not found: {0}")]
    SquadronNotFound(SquadronId),

    #[error("facility not found: {0}")]
    FacilityNotFound(FacilityId),

    #[error("ship not found: {0}")]
    ShipNotFound(ShipId),

    #[error("order declares turn {declared} but state is at turn {actual}")]
    WrongTurn { declared: u64, actual: u64 },

    #[error("house {0} is eliminated and may not submit orders")]
    HouseEliminated(HouseId),

    #[error("insufficient treasury: need {required}, have {available}")]
    InsufficientTreasury { required: i64, available: i64 },

    #[error("colony {0} has less than one PTU and cannot receive or send a transfer")]
    ColonyNonFunctional(ColonyId),

    #[error("no path between {0} and {1} within house visibility")]
    BlockedPath(SystemId, SystemId),

    #[error("no facility with spare dock capacity at colony {0}")]
    NoDockCapacity(ColonyId),

    #[error("target house {0} is eliminated")]
    TargetEliminated(HouseId),

    #[error("house {0} already has a pending diplomatic proposal to {1}")]
    ProposalAlreadyPending(HouseId, HouseId),

    #[error("house {0} is dishonored and may not propose a pact")]
    ProposerDishonored(HouseId),

    #[error("house {0} is isolated and may not propose a pact")]
    ProposerIsolated(HouseId),

    #[error("no NonAggression pact exists between {0} and {1} to break")]
    NoPactToBreak(HouseId, HouseId),

    #[error("house {0} has already submitted an espionage action this turn")]
    EspionageAlreadySubmitted(HouseId),

    #[error("squadron command-cost {used} exceeds flagship command rating {rating}")]
    CommandCapacityExceeded { used: u32, rating: u32 },

    #[error("colonize target {0} is already colonized")]
    AlreadyColonized(SystemId),

    #[error("fleet {0} has no ETAC to consume for colonization")]
    NoEtacPresent(FleetId),

    #[error("cargo load exceeds fleet capacity")]
    CargoCapacityExceeded,

    #[error("research allocation exceeds available PP")]
    ResearchOverAllocated,

    #[error("unrecognized build item tag: {0}")]
    InvalidItemTag(String),

    #[error("colony {0} already has a terraform project in progress")]
    TerraformAlreadyInProgress(ColonyId),
}

/// Unrecoverable internal-consistency failures (§7 Corruption class).
/// Detected only by store invariant checks; never silently repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CorruptionError {
    #[error("duplicate id inserted: {0}")]
    DuplicateId(String),

    #[error("secondary index entry for {0} does not resolve in primary storage")]
    IndexDesync(String),

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// Top-level error for engine-facing operations that aggregates the
/// taxonomy, mirroring the teacher workspace's combined `GameError`.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("state corruption detected: {0}")]
    Corruption(#[from] CorruptionError),

    #[error("game is quarantined pending administrative recovery")]
    Quarantined,

    #[error("serialization error: {0}")]
    Serialization(String),
}
