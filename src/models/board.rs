use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aircraft::{Aircraft, AircraftId};
use super::route::RouteId;
use super::time::TimeOfDay;

crate::define_id_type!(LegId);

/// What a leg is flown as. Charters are not legs; they are overlaid on the
/// aircraft's day from their own records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    /// Scheduled passenger sector consuming a route pool.
    Route,
    /// Empty repositioning flight.
    Ferry,
}

impl LegKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegKind::Route => "route",
            LegKind::Ferry => "ferry",
        }
    }
}

/// One flight of an aircraft's day.
///
/// Pool accounting invariant: `pax` debits `route_id`'s pool; `connecting_pax`
/// debits `through_route_id`'s pool - never the leg's own route. Through pax
/// boarded earlier on a different sold sector and are continuing aboard the
/// same airframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub id: LegId,
    pub kind: LegKind,
    /// Set for route legs; ferries carry no route.
    #[serde(default)]
    pub route_id: Option<RouteId>,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub dep_time: Option<TimeOfDay>,
    #[serde(default)]
    pub arr_time: Option<TimeOfDay>,
    /// Local passengers boarding here against the leg's own route pool.
    #[serde(default)]
    pub pax: u32,
    /// Passengers riding through on another route's pool.
    #[serde(default)]
    pub connecting_pax: u32,
    /// Which pool `connecting_pax` debits. Empty means those passengers are
    /// not tracked against any route (flagged by validation).
    #[serde(default)]
    pub through_route_id: Option<RouteId>,
}

impl Leg {
    /// Everyone in seats on this leg: local plus through passengers.
    pub fn total_on_board(&self) -> u32 {
        self.pax + self.connecting_pax
    }

    /// Block time in minutes when both times are set.
    pub fn block_minutes(&self) -> Option<i32> {
        match (self.dep_time, self.arr_time) {
            (Some(dep), Some(arr)) => Some(dep.minutes_until(arr)),
            _ => None,
        }
    }
}

/// The ordered legs one aircraft flies on one board. Order defines the
/// temporal sequence; the last leg's destination is the aircraft's implied
/// position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftAssignment {
    pub aircraft_id: AircraftId,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl AircraftAssignment {
    pub fn empty(aircraft_id: AircraftId) -> Self {
        Self {
            aircraft_id,
            legs: Vec::new(),
        }
    }

    pub fn last_leg(&self) -> Option<&Leg> {
        self.legs.last()
    }

    /// Where the aircraft sits after its recorded legs: the last leg's
    /// destination, else its home base.
    pub fn current_position<'a>(&'a self, aircraft: &'a Aircraft) -> Option<&'a str> {
        self.last_leg()
            .map(|l| l.to.as_str())
            .or(aircraft.base.as_deref())
    }
}

/// The full mutable dispatch state for one calendar date: the expected pax
/// pool per route and one assignment per aircraft.
///
/// Boards are created lazily on first access to a date and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub date: NaiveDate,
    /// Route id -> total expected passengers for this date.
    #[serde(default)]
    pub pool: HashMap<RouteId, u32>,
    #[serde(default)]
    pub assignments: Vec<AircraftAssignment>,
}

impl Board {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pool: HashMap::new(),
            assignments: Vec::new(),
        }
    }

    pub fn assignment(&self, aircraft_id: AircraftId) -> Option<&AircraftAssignment> {
        self.assignments
            .iter()
            .find(|a| a.aircraft_id == aircraft_id)
    }

    pub fn assignment_mut(&mut self, aircraft_id: AircraftId) -> Option<&mut AircraftAssignment> {
        self.assignments
            .iter_mut()
            .find(|a| a.aircraft_id == aircraft_id)
    }

    /// Set the expected pool total for a route.
    pub fn set_pool(&mut self, route_id: RouteId, total: u32) {
        self.pool.insert(route_id, total);
    }

    pub fn pool_total(&self, route_id: RouteId) -> u32 {
        self.pool.get(&route_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::aircraft::AircraftStatus;

    fn aircraft_at(base: Option<&str>) -> Aircraft {
        Aircraft {
            id: AircraftId::generate(),
            registration: "9Q-PKP".to_string(),
            ac_type: "C208".to_string(),
            default_capacity: 12,
            base: base.map(str::to_string),
            status: AircraftStatus::Active,
        }
    }

    fn ferry(from: &str, to: &str) -> Leg {
        Leg {
            id: LegId::generate(),
            kind: LegKind::Ferry,
            route_id: None,
            from: from.to_string(),
            to: to.to_string(),
            dep_time: None,
            arr_time: None,
            pax: 0,
            connecting_pax: 0,
            through_route_id: None,
        }
    }

    #[test]
    fn test_current_position_without_legs_is_base() {
        let ac = aircraft_at(Some("FBM"));
        let asgn = AircraftAssignment::empty(ac.id);
        assert_eq!(asgn.current_position(&ac), Some("FBM"));
    }

    #[test]
    fn test_current_position_follows_last_leg() {
        let ac = aircraft_at(Some("FBM"));
        let mut asgn = AircraftAssignment::empty(ac.id);
        asgn.legs.push(ferry("FBM", "KWZ"));
        asgn.legs.push(ferry("KWZ", "GMA"));
        assert_eq!(asgn.current_position(&ac), Some("GMA"));
    }

    #[test]
    fn test_current_position_unknown_without_base_or_legs() {
        let ac = aircraft_at(None);
        let asgn = AircraftAssignment::empty(ac.id);
        assert_eq!(asgn.current_position(&ac), None);
    }

    #[test]
    fn test_block_minutes() {
        let mut leg = ferry("FBM", "KWZ");
        assert_eq!(leg.block_minutes(), None);
        leg.dep_time = Some("08:00".parse().unwrap());
        leg.arr_time = Some("09:05".parse().unwrap());
        assert_eq!(leg.block_minutes(), Some(65));
    }

    #[test]
    fn test_pool_defaults_to_zero() {
        let board = Board::new(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(board.pool_total(RouteId::generate()), 0);
    }

    #[test]
    fn test_board_serde_round_trip() {
        let mut board = Board::new(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        let route = RouteId::generate();
        board.set_pool(route, 20);
        let ac = aircraft_at(Some("FBM"));
        let mut asgn = AircraftAssignment::empty(ac.id);
        asgn.legs.push(ferry("FBM", "KWZ"));
        board.assignments.push(asgn);

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, board.date);
        assert_eq!(back.pool_total(route), 20);
        assert_eq!(back.assignments.len(), 1);
        assert_eq!(back.assignments[0].legs.len(), 1);
    }
}
