//! Daily program projection.
//!
//! A read-only transformation of one board plus fleet/route/charter context
//! into the printable dispatch program: per aircraft, its legs and charters
//! merged and sorted by departure time with load annotations, ending in a
//! nightstop summary. The projection never mutates engine state; rendering
//! (HTML, PDF) is somebody else's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Aircraft, Board, Charter, LegKind, TimeOfDay};

use super::allocation::DispatchContext;
use super::nightstop;

/// Which half of the day the program covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramSession {
    Morning,
    Afternoon,
}

impl ProgramSession {
    pub fn label(&self) -> &'static str {
        match self {
            ProgramSession::Morning => "Morning Program",
            ProgramSession::Afternoon => "Afternoon Program",
        }
    }
}

/// What a program line was flown as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Route,
    Ferry,
    Charter,
}

/// Seat accounting for a route movement.
#[derive(Debug, Clone, Serialize)]
pub struct LoadAnnotation {
    pub pax: u32,
    pub connecting_pax: u32,
    pub total_on_board: u32,
    /// Seats left free; zero when full or overloaded.
    pub spare_seats: u32,
    /// Seats over capacity; zero unless overloaded.
    pub overloaded_by: u32,
    pub full: bool,
    /// Name of the route the through pax are tracked against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub through_route: Option<String>,
}

/// One line of an aircraft's program: a leg or an overlaid charter.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramMovement {
    pub kind: MovementKind,
    pub from: String,
    pub to: String,
    pub dep_time: Option<TimeOfDay>,
    pub arr_time: Option<TimeOfDay>,
    /// Route display name; "unknown" when the route is gone from file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    /// Charter client, for charter movements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub pax: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadAnnotation>,
}

/// One aircraft's section of the program.
#[derive(Debug, Clone, Serialize)]
pub struct AircraftProgram {
    pub registration: String,
    pub ac_type: String,
    pub capacity: u32,
    pub movements: Vec<ProgramMovement>,
    /// Where the airframe ends its day; `None` when unknown.
    pub final_position: Option<String>,
    pub nightstop: bool,
}

/// Closing summary line for an aircraft away from base.
#[derive(Debug, Clone, Serialize)]
pub struct NightstopLine {
    pub registration: String,
    pub location: String,
    pub home_base: String,
}

/// The full program document for one date and session.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramDocument {
    pub session: ProgramSession,
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub aircraft: Vec<AircraftProgram>,
    pub nightstops: Vec<NightstopLine>,
    /// True when no aircraft has anything to fly - render an empty-program
    /// message instead of sections.
    pub empty: bool,
}

/// Build the program for a board.
///
/// Only active aircraft with at least one leg or non-cancelled charter that
/// date appear. `generated_at` is passed in so the projection stays a pure
/// function of its inputs.
pub fn build_program(
    board: &Board,
    fleet: &[Aircraft],
    charters: &[Charter],
    ctx: &DispatchContext<'_>,
    session: ProgramSession,
    generated_at: DateTime<Utc>,
) -> ProgramDocument {
    let mut sections = Vec::new();
    let mut nightstops = Vec::new();

    for ac in fleet.iter().filter(|a| a.is_active()) {
        let assignment = board.assignment(ac.id);
        let legs = assignment.map(|a| a.legs.as_slice()).unwrap_or(&[]);
        let overlaid: Vec<&Charter> = charters
            .iter()
            .filter(|c| c.overlays(ac.id, board.date))
            .collect();

        if legs.is_empty() && overlaid.is_empty() {
            continue;
        }

        let capacity = ctx.capacity_of(ac.id);
        let mut movements: Vec<ProgramMovement> = Vec::new();

        for leg in legs {
            let load = (leg.kind == LegKind::Route).then(|| {
                let total = leg.total_on_board();
                LoadAnnotation {
                    pax: leg.pax,
                    connecting_pax: leg.connecting_pax,
                    total_on_board: total,
                    spare_seats: capacity.saturating_sub(total),
                    overloaded_by: total.saturating_sub(capacity),
                    full: total == capacity && total > 0,
                    through_route: leg
                        .through_route_id
                        .map(|r| ctx.route_name(r).to_string()),
                }
            });
            movements.push(ProgramMovement {
                kind: match leg.kind {
                    LegKind::Route => MovementKind::Route,
                    LegKind::Ferry => MovementKind::Ferry,
                },
                from: leg.from.clone(),
                to: leg.to.clone(),
                dep_time: leg.dep_time,
                arr_time: leg.arr_time,
                route_name: leg.route_id.map(|r| ctx.route_name(r).to_string()),
                client: None,
                pax: leg.pax,
                load,
            });
        }

        for charter in &overlaid {
            movements.push(ProgramMovement {
                kind: MovementKind::Charter,
                from: charter.from.clone().unwrap_or_default(),
                to: charter.to.clone().unwrap_or_default(),
                dep_time: charter.dep_time,
                arr_time: charter.arr_time,
                route_name: None,
                client: Some(charter.client.clone()),
                pax: charter.pax,
                load: None,
            });
        }

        // Untimed movements sort first, like rows with a blank departure on
        // the printed sheet.
        movements.sort_by_key(|m| m.dep_time);

        let final_position = assignment
            .and_then(|a| a.current_position(ac))
            .map(str::to_string);
        let stop = assignment.and_then(|a| nightstop::detect(a, ac));
        if let Some(ref ns) = stop {
            nightstops.push(NightstopLine {
                registration: ns.registration.clone(),
                location: ns.location.clone(),
                home_base: ns.home_base.clone(),
            });
        }

        sections.push(AircraftProgram {
            registration: ac.registration.clone(),
            ac_type: ac.ac_type.clone(),
            capacity,
            movements,
            final_position,
            nightstop: stop.is_some(),
        });
    }

    ProgramDocument {
        session,
        date: board.date,
        generated_at,
        empty: sections.is_empty(),
        aircraft: sections,
        nightstops,
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod program_tests;
