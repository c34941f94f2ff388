//! `Facility` and `Project` entities (§3): the construction and repair
//! backbone of a colony.

use serde::{Deserialize, Serialize};

use crate::ids::{FacilityId, FleetId, ProjectId};

/// What a project produces or repairs (§3, GLOSSARY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectItem {
    Ship { class: crate::enums::ShipClass },
    Building { facility: crate::ids::FacilityKind },
    Industrial,
    Terraform,
    Repair { fleet: FleetId },
}

/// A construction or repair project (§3). Invariant: `pp_paid <=
/// pp_total`; on completion `pp_paid == pp_total` and the project is
/// removed with its effect applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub kind: crate::enums::ProjectKind,
    pub item: ProjectItem,
    pub pp_total: u64,
    pub pp_paid: u64,
    pub estimated_turns_remaining: u32,
    pub facility: FacilityId,
}

impl Project {
    pub fn new(
        id: ProjectId,
        kind: crate::enums::ProjectKind,
        item: ProjectItem,
        pp_total: u64,
        facility: FacilityId,
    ) -> Self {
        Self {
            id,
            kind,
            item,
            pp_total,
            pp_paid: 0,
            estimated_turns_remaining: 0,
            facility,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pp_paid >= self.pp_total
    }

    /// Apply a PP payment, clamped so `pp_paid` never exceeds `pp_total`
    /// (§3 invariant).
    pub fn pay(&mut self, amount: u64) {
        self.pp_paid = (self.pp_paid + amount).min(self.pp_total);
    }
}

/// A construction/repair facility attached to a colony (§3). Invariant:
/// `active_projects.len() <= effective_docks`; queued projects are FIFO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub commissioning_turn: u64,
    pub effective_docks: u32,
    pub active_projects: Vec<ProjectId>,
    pub queue: Vec<ProjectId>,
    pub crippled: bool,
}

impl Facility {
    pub fn new(id: FacilityId, commissioning_turn: u64) -> Self {
        let effective_docks = id.kind.base_docks();
        Self {
            id,
            commissioning_turn,
            effective_docks,
            active_projects: Vec::new(),
            queue: Vec::new(),
            crippled: false,
        }
    }

    /// Recompute `effective_docks` from the crippled flag (§3: 0 if
    /// crippled).
    pub fn recompute_effective_docks(&mut self) {
        self.effective_docks = if self.crippled { 0 } else { self.id.kind.base_docks() };
    }

    pub fn has_free_dock(&self) -> bool {
        (self.active_projects.len() as u32) < self.effective_docks
    }

    /// Pull the next queued project into an active dock slot, if one is
    /// free. Returns the promoted project id.
    pub fn promote_from_queue(&mut self) -> Option<ProjectId> {
        if !self.has_free_dock() || self.queue.is_empty() {
            return None;
        }
        let next = self.queue.remove(0);
        self.active_projects.push(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FacilityKind;

    #[test]
    fn crippled_facility_has_zero_effective_docks() {
        let mut facility = Facility::new(FacilityId::new(FacilityKind::Shipyard, 0), 1);
        assert_eq!(facility.effective_docks, 10);
        facility.crippled = true;
        facility.recompute_effective_docks();
        assert_eq!(facility.effective_docks, 0);
    }

    #[test]
    fn queue_is_fifo() {
        let mut facility = Facility::new(FacilityId::new(FacilityKind::Spaceport, 0), 1);
        facility.effective_docks = 1;
        facility.queue.push(ProjectId(1));
        facility.queue.push(ProjectId(2));
        let promoted = facility.promote_from_queue();
        assert_eq!(promoted, Some(ProjectId(1)));
        assert_eq!(facility.queue, vec![ProjectId(2)]);
    }

    #[test]
    fn project_pay_clamps_at_total() {
        let mut project = Project::new(
            ProjectId(1),
            crate::enums::ProjectKind::Industrial,
            ProjectItem::Industrial,
            100,
            FacilityId::new(FacilityKind::Shipyard, 0),
        );
        project.pay(150);
        assert_eq!(project.pp_paid, 100);
        assert!(project.is_complete());
    }
}
