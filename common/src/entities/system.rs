//! The `System` star-map node (§3).

use serde::{Deserialize, Serialize};

use crate::enums::LaneClass;
use crate::ids::SystemId;

/// Axial hex coordinates for the star map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Hex distance in axial coordinates, used for jump-count travel time
    /// estimates (§4.F).
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq.max(dr).max(ds)) as u32
    }
}

/// An outgoing jump lane to another system (§3). The lane graph must be
/// symmetric: if A has a lane to B, B has a lane of the same class back
/// to A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpLane {
    pub to: SystemId,
    pub class: LaneClass,
}

/// A star-map node (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub coords: HexCoord,
    pub lanes: Vec<JumpLane>,
}

impl System {
    pub fn new(id: SystemId, coords: HexCoord) -> Self {
        Self {
            id,
            coords,
            lanes: Vec::new(),
        }
    }

    pub fn lane_to(&self, target: SystemId) -> Option<&JumpLane> {
        self.lanes.iter().find(|l| l.to == target)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.lanes.iter().map(|l| l.to)
    }
}
