//! Nightstop detection.
//!
//! "Away from base" is a derived fact, recomputed every time a board is read;
//! it is never stored. An aircraft nightstops when its last recorded leg ends
//! somewhere other than its home base.

use serde::Serialize;

use crate::models::{Aircraft, AircraftAssignment, AircraftId, Board};

/// An aircraft ending its day away from home.
#[derive(Debug, Clone, Serialize)]
pub struct Nightstop {
    pub aircraft_id: AircraftId,
    pub registration: String,
    /// Where the aircraft overnights.
    pub location: String,
    pub home_base: String,
}

/// Nightstop for one assignment, if any. Requires at least one leg and a
/// known home base; an aircraft with no base on file can never be flagged.
pub fn detect(assignment: &AircraftAssignment, aircraft: &Aircraft) -> Option<Nightstop> {
    let last = assignment.last_leg()?;
    let base = aircraft.base.as_deref()?;
    if last.to != base {
        Some(Nightstop {
            aircraft_id: aircraft.id,
            registration: aircraft.registration.clone(),
            location: last.to.clone(),
            home_base: base.to_string(),
        })
    } else {
        None
    }
}

/// All nightstops on a board, in fleet order.
pub fn board_nightstops(board: &Board, fleet: &[Aircraft]) -> Vec<Nightstop> {
    fleet
        .iter()
        .filter_map(|ac| board.assignment(ac.id).and_then(|a| detect(a, ac)))
        .collect()
}
