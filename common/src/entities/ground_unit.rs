//! The `GroundUnit` entity (§3): an army or marine stack garrisoned at a
//! colony or embarked for invasion.

use serde::{Deserialize, Serialize};

use crate::ids::{ColonyId, GroundUnitId, HouseId};

/// Whether a ground unit defends in place or is committed to an
/// offensive landing (§4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundUnitRole {
    Army,
    Marines,
}

/// A stack of ground-combat strength garrisoned at, or embarked against,
/// a colony (§3, §4.E).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundUnit {
    pub id: GroundUnitId,
    pub owner: HouseId,
    pub colony: ColonyId,
    pub role: GroundUnitRole,
    pub strength: u32,
}

impl GroundUnit {
    pub fn new(id: GroundUnitId, owner: HouseId, colony: ColonyId, role: GroundUnitRole, strength: u32) -> Self {
        Self {
            id,
            owner,
            colony,
            role,
            strength,
        }
    }
}
