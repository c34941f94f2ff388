//! Diplomatic pacts: proposal auto-resolution and pact-breaking
//! consequences (§4.J, §9 Open Question 1).

use ec4x_common::constants::{DISHONORED_TURNS, ISOLATED_TURNS};
use ec4x_common::entities::{House, PactProposal, ViolationRecord};
use ec4x_common::enums::DiplomaticState;

use crate::events::TurnEvent;

/// Raise a `NonAggression` proposal, recorded on the proposer and
/// auto-resolved at the end of the same Command phase unless the target
/// is dishonored or isolated (§9 Open Question 1).
pub fn propose_pact(proposer: &mut House, to: ec4x_common::ids::HouseId, turn: u64) {
    proposer.diplomacy.pending_proposals.push(PactProposal { to, raised_turn: turn });
}

/// End-of-Command-phase resolution: every pending proposal raised this
/// turn either forms a pact (both sides updated) or lapses silently if
/// the target turned dishonored/isolated in the interim.
pub fn resolve_pending_proposals(
    proposer: &mut House,
    target: &mut House,
    turn: u64,
) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    let ready: Vec<_> = proposer
        .diplomacy
        .pending_proposals
        .iter()
        .filter(|p| p.to == target.id && p.raised_turn == turn)
        .cloned()
        .collect();
    proposer
        .diplomacy
        .pending_proposals
        .retain(|p| !(p.to == target.id && p.raised_turn == turn));

    for _ in ready {
        if target.is_dishonored() || target.is_isolated() {
            continue;
        }
        proposer
            .diplomacy
            .relations
            .insert(target.id, DiplomaticState::NonAggression);
        target
            .diplomacy
            .relations
            .insert(proposer.id, DiplomaticState::NonAggression);
        events.push(TurnEvent::PactFormed { a: proposer.id, b: target.id });
    }
    events
}

/// Explicitly accept a pending proposal from `proposer`, forming the
/// pact immediately rather than waiting for end-of-phase auto-resolution
/// (§9 Open Question 1). Matches on any pending proposal regardless of
/// the turn it was raised.
pub fn accept_proposal(target: &mut House, proposer: &mut House) -> Option<TurnEvent> {
    let position = proposer.diplomacy.pending_proposals.iter().position(|p| p.to == target.id)?;
    proposer.diplomacy.pending_proposals.remove(position);
    proposer.diplomacy.relations.insert(target.id, DiplomaticState::NonAggression);
    target.diplomacy.relations.insert(proposer.id, DiplomaticState::NonAggression);
    Some(TurnEvent::PactFormed { a: proposer.id, b: target.id })
}

/// Explicitly decline a pending proposal from `proposer`, removing it so
/// it never auto-resolves into a pact.
pub fn reject_proposal(target: &House, proposer: &mut House) {
    proposer.diplomacy.pending_proposals.retain(|p| p.to != target.id);
}

/// Break a `NonAggression` pact: the breaker is marked dishonored then
/// isolated, both sides flip to `Enemy`, and the breaker pays a prestige
/// penalty (§4.J).
pub fn break_pact(
    breaker: &mut House,
    victim: &mut House,
    turn: u64,
    penalty: i64,
) -> TurnEvent {
    breaker.diplomacy.relations.insert(victim.id, DiplomaticState::Enemy);
    victim.diplomacy.relations.insert(breaker.id, DiplomaticState::Enemy);
    breaker.diplomacy.violations.push(ViolationRecord { turn, victim: victim.id });
    breaker.dishonored_turns_remaining = DISHONORED_TURNS;
    breaker.isolated_turns_remaining = ISOLATED_TURNS;
    breaker.prestige -= penalty;

    TurnEvent::PactBroken { breaker: breaker.id, victim: victim.id }
}

/// Tick dishonored/isolated countdowns by one turn (§4.D Maintenance
/// phase).
pub fn tick_reputation(house: &mut House) {
    house.dishonored_turns_remaining = house.dishonored_turns_remaining.saturating_sub(1);
    house.isolated_turns_remaining = house.isolated_turns_remaining.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec4x_common::ids::HouseId;

    #[test]
    fn proposal_forms_pact_when_target_in_good_standing() {
        let mut a = House::new(HouseId(1), "A", (0, 0, 0));
        let mut b = House::new(HouseId(2), "B", (0, 0, 0));
        propose_pact(&mut a, HouseId(2), 5);
        let events = resolve_pending_proposals(&mut a, &mut b, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(a.diplomacy.relation_with(HouseId(2)), DiplomaticState::NonAggression);
        assert_eq!(b.diplomacy.relation_with(HouseId(1)), DiplomaticState::NonAggression);
    }

    #[test]
    fn proposal_lapses_if_target_isolated() {
        let mut a = House::new(HouseId(1), "A", (0, 0, 0));
        let mut b = House::new(HouseId(2), "B", (0, 0, 0));
        b.isolated_turns_remaining = 2;
        propose_pact(&mut a, HouseId(2), 5);
        let events = resolve_pending_proposals(&mut a, &mut b, 5);
        assert!(events.is_empty());
        assert_eq!(a.diplomacy.relation_with(HouseId(2)), DiplomaticState::Neutral);
    }

    #[test]
    fn accept_forms_pact_immediately() {
        let mut a = House::new(HouseId(1), "A", (0, 0, 0));
        let mut b = House::new(HouseId(2), "B", (0, 0, 0));
        propose_pact(&mut a, HouseId(2), 5);
        let event = accept_proposal(&mut b, &mut a);
        assert!(event.is_some());
        assert_eq!(a.diplomacy.relation_with(HouseId(2)), DiplomaticState::NonAggression);
        assert_eq!(b.diplomacy.relation_with(HouseId(1)), DiplomaticState::NonAggression);
        assert!(a.diplomacy.pending_proposals.is_empty());
    }

    #[test]
    fn reject_removes_pending_proposal() {
        let mut a = House::new(HouseId(1), "A", (0, 0, 0));
        let b = House::new(HouseId(2), "B", (0, 0, 0));
        propose_pact(&mut a, HouseId(2), 5);
        reject_proposal(&b, &mut a);
        assert!(a.diplomacy.pending_proposals.is_empty());
        assert_eq!(a.diplomacy.relation_with(HouseId(2)), DiplomaticState::Neutral);
    }

    #[test]
    fn breaking_pact_dishonors_and_penalizes() {
        let mut a = House::new(HouseId(1), "A", (0, 0, 0));
        let mut b = House::new(HouseId(2), "B", (0, 0, 0));
        break_pact(&mut a, &mut b, 10, 15);
        assert!(a.is_dishonored());
        assert!(a.is_isolated());
        assert_eq!(a.prestige, -15);
        assert_eq!(a.diplomacy.relation_with(HouseId(2)), DiplomaticState::Enemy);
    }
}
