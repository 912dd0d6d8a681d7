//! Weekly template scheduling.
//!
//! The template is a recurring, date-independent plan: each weekday maps to
//! an ordered list of expected route/time/aircraft-type slots. This module
//! matches slots to concrete aircraft and turns them into draft legs. Drafts
//! are proposals only - nothing lands on a board until the caller saves it
//! through the lifecycle layer.

use serde::Serialize;

use crate::models::{Aircraft, AircraftId, Board, RouteId, TemplateSlot};

use super::allocation::{suggest_leg, DispatchContext, LegDraft};

/// Why a slot could not be planned. These are user-facing rejections of the
/// specific action, not system faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotPlanError {
    #[error("no active aircraft of type {0:?} available")]
    NoActiveAircraft(Option<String>),
    #[error("slot references a route that is no longer on file: {0}")]
    UnknownRoute(RouteId),
}

/// Pick an aircraft for a slot.
///
/// A preferred aircraft is used only while it is active. Failing that, the
/// first active aircraft matching the slot's type constraint wins - or any
/// active aircraft when the slot is unconstrained. First-match over the
/// given fleet order; passing the fleet in stable order keeps ties
/// deterministic.
pub fn match_aircraft<'a>(
    slot: &TemplateSlot,
    fleet: &'a [Aircraft],
    preferred: Option<AircraftId>,
) -> Option<&'a Aircraft> {
    if let Some(id) = preferred {
        if let Some(ac) = fleet.iter().find(|a| a.id == id && a.is_active()) {
            return Some(ac);
        }
    }
    fleet.iter().find(|a| {
        a.is_active()
            && slot
                .ac_type
                .as_deref()
                .map(|t| a.ac_type == t)
                .unwrap_or(true)
    })
}

/// Turn a slot into a draft leg for a specific aircraft.
///
/// The draft departs from the aircraft's current position on today's board
/// (its base before the first leg), flies the slot's route at the slot's
/// departure time, and carries
/// `pax = min(expected pax or capacity, capacity, remaining pool)`.
pub fn apply_template_slot(
    slot: &TemplateSlot,
    aircraft: &Aircraft,
    board: &Board,
    ctx: &DispatchContext<'_>,
) -> Result<LegDraft, SlotPlanError> {
    let route = ctx
        .route(slot.route_id)
        .ok_or(SlotPlanError::UnknownRoute(slot.route_id))?;

    let mut draft = suggest_leg(route, aircraft, board, ctx, Some(slot.dep_time));
    if let Some(expected) = slot.expected_pax {
        draft.leg.pax = draft.leg.pax.min(expected);
    }
    Ok(draft)
}

/// A planned slot: the matched aircraft plus its draft leg.
#[derive(Debug, Clone, Serialize)]
pub struct SlotPlan {
    pub aircraft_id: AircraftId,
    pub registration: String,
    pub draft: LegDraft,
}

/// Match and apply in one step.
pub fn plan_slot(
    slot: &TemplateSlot,
    fleet: &[Aircraft],
    preferred: Option<AircraftId>,
    board: &Board,
    ctx: &DispatchContext<'_>,
) -> Result<SlotPlan, SlotPlanError> {
    let aircraft = match_aircraft(slot, fleet, preferred)
        .ok_or_else(|| SlotPlanError::NoActiveAircraft(slot.ac_type.clone()))?;
    let draft = apply_template_slot(slot, aircraft, board, ctx)?;
    Ok(SlotPlan {
        aircraft_id: aircraft.id,
        registration: aircraft.registration.clone(),
        draft,
    })
}

/// A day's slots in departure-time order; applied whenever a day is saved.
pub fn sort_slots_by_departure(mut slots: Vec<TemplateSlot>) -> Vec<TemplateSlot> {
    slots.sort_by_key(|s| s.dep_time);
    slots
}

/// Distinct aircraft type labels in the fleet, sorted, for slot editing.
pub fn fleet_types(fleet: &[Aircraft]) -> Vec<String> {
    let mut types: Vec<String> = fleet
        .iter()
        .map(|a| a.ac_type.clone())
        .filter(|t| !t.is_empty())
        .collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod template_tests;
