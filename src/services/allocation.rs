//! Pax-pool allocation engine.
//!
//! Everything here is a pure, synchronous function over an in-memory snapshot
//! of one board plus reference data. Derived figures (consumed, remaining,
//! spare seats) are always recomputed from the full assignment list rather
//! than kept as incremental counters; at a handful of aircraft and routes per
//! day the O(legs) cost is irrelevant and a whole class of drift bugs never
//! exists.
//!
//! Accounting rules:
//! - A route leg's `pax` debits the leg's own route pool.
//! - A leg's `connecting_pax` debits the through route's pool, never the
//!   leg's own. One leg can therefore debit two pools at once.
//! - Legs without a route, and connecting pax without a through route, are
//!   unattributed: they count toward no pool and are flagged by validation.
//!
//! Capacity and pool conditions are *observed and flagged*, never rejected:
//! dispatch must stay possible when the pool estimate is wrong, so
//! [`validate_leg`] returns a severity-ranked warning list and no check here
//! ever blocks a save.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{
    Aircraft, AircraftAssignment, AircraftConfig, AircraftId, Board, Leg, LegId, LegKind, Route,
    RouteId, TimeOfDay,
};

/// Read-only reference data handed to every pure computation.
///
/// Built once per request/view from the loaded fleet, routes and per-aircraft
/// configuration; the engine never reaches for ambient state.
pub struct DispatchContext<'a> {
    routes: HashMap<RouteId, &'a Route>,
    aircraft: HashMap<AircraftId, &'a Aircraft>,
    configs: HashMap<AircraftId, &'a AircraftConfig>,
}

impl<'a> DispatchContext<'a> {
    pub fn new(
        routes: &'a [Route],
        aircraft: &'a [Aircraft],
        configs: &'a [AircraftConfig],
    ) -> Self {
        Self {
            routes: routes.iter().map(|r| (r.id, r)).collect(),
            aircraft: aircraft.iter().map(|a| (a.id, a)).collect(),
            configs: configs.iter().map(|c| (c.aircraft_id, c)).collect(),
        }
    }

    pub fn route(&self, id: RouteId) -> Option<&'a Route> {
        self.routes.get(&id).copied()
    }

    pub fn aircraft(&self, id: AircraftId) -> Option<&'a Aircraft> {
        self.aircraft.get(&id).copied()
    }

    pub fn config(&self, id: AircraftId) -> Option<&'a AircraftConfig> {
        self.configs.get(&id).copied()
    }

    /// Effective seat capacity for an aircraft; zero when the aircraft is no
    /// longer on file (referential gaps degrade, they never raise).
    pub fn capacity_of(&self, id: AircraftId) -> u32 {
        match self.aircraft(id) {
            Some(ac) => ac.effective_capacity(self.config(id)),
            None => 0,
        }
    }

    /// Display name for a route, or a placeholder when it is gone.
    pub fn route_name(&self, id: RouteId) -> &'a str {
        self.route(id).map(|r| r.name.as_str()).unwrap_or("unknown")
    }
}

/// Passengers already attributed to each route pool by the given
/// assignments, direct boardings and through pax combined.
pub fn compute_consumed(assignments: &[AircraftAssignment]) -> HashMap<RouteId, u32> {
    let mut consumed: HashMap<RouteId, u32> = HashMap::new();
    for assignment in assignments {
        for leg in &assignment.legs {
            if leg.kind == LegKind::Route {
                if let Some(route_id) = leg.route_id {
                    *consumed.entry(route_id).or_insert(0) += leg.pax;
                }
            }
            // Through pax debit their own route's pool, whatever kind of leg
            // they happen to be riding on.
            if leg.connecting_pax > 0 {
                if let Some(through) = leg.through_route_id {
                    *consumed.entry(through).or_insert(0) += leg.connecting_pax;
                }
            }
        }
    }
    consumed
}

/// Pool still unassigned for a route. Clamped at zero: overconsumption is
/// visible only by comparing pool to consumed directly.
pub fn remaining(
    pool: &HashMap<RouteId, u32>,
    consumed: &HashMap<RouteId, u32>,
    route_id: RouteId,
) -> u32 {
    let total = pool.get(&route_id).copied().unwrap_or(0);
    let used = consumed.get(&route_id).copied().unwrap_or(0);
    total.saturating_sub(used)
}

/// Advisory surplus per route: seats left over on every leg already flying
/// the route today, summed. Not a limit, just "extra capacity available".
pub fn compute_spare_seats(
    assignments: &[AircraftAssignment],
    ctx: &DispatchContext<'_>,
) -> HashMap<RouteId, u32> {
    let mut spare: HashMap<RouteId, u32> = HashMap::new();
    for assignment in assignments {
        let capacity = ctx.capacity_of(assignment.aircraft_id);
        if ctx.aircraft(assignment.aircraft_id).is_none() {
            continue;
        }
        for leg in &assignment.legs {
            if leg.kind != LegKind::Route {
                continue;
            }
            if let Some(route_id) = leg.route_id {
                let free = capacity.saturating_sub(leg.total_on_board());
                *spare.entry(route_id).or_insert(0) += free;
            }
        }
    }
    spare
}

// =============================================================================
// Leg validation
// =============================================================================

/// Rank of a leg condition. Variant order is the ranking: most severe first,
/// so sorting a warning list ascending by severity orders it for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Capacity physically exceeded. Saving is still allowed; the leg is
    /// marked as over.
    Critical,
    Warning,
    Advisory,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Advisory => "advisory",
            Severity::Info => "info",
        }
    }
}

/// What a leg check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegIssue {
    /// Local pax alone exceed the aircraft's seats.
    CapacityExceeded,
    /// Local plus through pax exceed the aircraft's seats.
    Overloaded,
    /// More local pax than the route pool has left.
    ExceedsPool,
    /// Through pax with no route selected - their pool is not being tracked.
    UnattributedThroughPax,
    /// Every seat taken, nothing over.
    FullLoad,
}

impl LegIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegIssue::CapacityExceeded => "capacity_exceeded",
            LegIssue::Overloaded => "overloaded",
            LegIssue::ExceedsPool => "exceeds_pool",
            LegIssue::UnattributedThroughPax => "unattributed_through_pax",
            LegIssue::FullLoad => "full_load",
        }
    }
}

/// One flagged condition on a leg: what, how bad, and by how much.
#[derive(Debug, Clone, Serialize)]
pub struct LegWarning {
    pub issue: LegIssue,
    pub severity: Severity,
    /// Seats or passengers involved: the excess for over-type issues, the
    /// untracked head count for unattributed through pax, zero for full load.
    pub amount: u32,
    pub description: String,
}

impl LegWarning {
    fn new(issue: LegIssue, severity: Severity, amount: u32, description: String) -> Self {
        Self {
            issue,
            severity,
            amount,
            description,
        }
    }
}

/// Check one leg against seat capacity and the route pool.
///
/// Returns a severity-ordered list (most severe first). An empty list means
/// nothing to flag. None of these conditions prevents saving.
///
/// `remaining_in_pool` is the route's remaining pool *not counting this
/// leg* - a leg never competes with itself for passengers. Use
/// [`validate_leg_on_board`] to resolve that figure from a board.
pub fn validate_leg(leg: &Leg, capacity: u32, remaining_in_pool: u32) -> Vec<LegWarning> {
    let mut warnings = Vec::new();
    let total = leg.total_on_board();

    if leg.pax > capacity {
        warnings.push(LegWarning::new(
            LegIssue::CapacityExceeded,
            Severity::Critical,
            leg.pax - capacity,
            format!(
                "{} pax exceeds aircraft capacity of {} (over by {})",
                leg.pax,
                capacity,
                leg.pax - capacity
            ),
        ));
    }

    if leg.connecting_pax > 0 && total > capacity {
        warnings.push(LegWarning::new(
            LegIssue::Overloaded,
            Severity::Warning,
            total - capacity,
            format!(
                "{} local + {} through = {} on board, overloaded by {}",
                leg.pax,
                leg.connecting_pax,
                total,
                total - capacity
            ),
        ));
    }

    if leg.kind == LegKind::Route
        && leg.route_id.is_some()
        && leg.pax <= capacity
        && leg.pax > remaining_in_pool
    {
        warnings.push(LegWarning::new(
            LegIssue::ExceedsPool,
            Severity::Advisory,
            leg.pax - remaining_in_pool,
            format!(
                "{} pax against {} remaining in the route pool",
                leg.pax, remaining_in_pool
            ),
        ));
    }

    if leg.connecting_pax > 0 && leg.through_route_id.is_none() {
        warnings.push(LegWarning::new(
            LegIssue::UnattributedThroughPax,
            Severity::Advisory,
            leg.connecting_pax,
            format!(
                "{} through pax with no route selected; their pool is not tracked",
                leg.connecting_pax
            ),
        ));
    }

    if total > 0 && total == capacity {
        warnings.push(LegWarning::new(
            LegIssue::FullLoad,
            Severity::Info,
            0,
            format!("full load: all {capacity} seats taken"),
        ));
    }

    warnings.sort_by_key(|w| w.severity);
    warnings
}

/// Convenience wrapper: validate a leg in the context of a whole board,
/// resolving capacity and remaining pool from the current state.
///
/// When the leg is already recorded on the board, its own consumption is
/// backed out first so it is judged against the pool as it stood without it;
/// editing a saved leg must not flag it for the seats it already holds.
pub fn validate_leg_on_board(
    leg: &Leg,
    aircraft_id: AircraftId,
    board: &Board,
    ctx: &DispatchContext<'_>,
) -> Vec<LegWarning> {
    let capacity = ctx.capacity_of(aircraft_id);
    let mut consumed = compute_consumed(&board.assignments);

    let already_recorded = board
        .assignments
        .iter()
        .flat_map(|a| &a.legs)
        .any(|l| l.id == leg.id);
    if already_recorded {
        if leg.kind == LegKind::Route {
            if let Some(route_id) = leg.route_id {
                if let Some(count) = consumed.get_mut(&route_id) {
                    *count = count.saturating_sub(leg.pax);
                }
            }
        }
        if let Some(through) = leg.through_route_id {
            if let Some(count) = consumed.get_mut(&through) {
                *count = count.saturating_sub(leg.connecting_pax);
            }
        }
    }

    let rem = leg
        .route_id
        .map(|r| remaining(&board.pool, &consumed, r))
        .unwrap_or(0);
    validate_leg(leg, capacity, rem)
}

// =============================================================================
// Pool overview
// =============================================================================

/// Per-route pool figures as the desk's pool header shows them.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePoolStatus {
    pub route_id: RouteId,
    pub route_name: String,
    pub total: u32,
    pub consumed: u32,
    pub remaining: u32,
    /// Rounded percentage of the pool already assigned; may exceed 100.
    pub percent_used: u32,
    pub spare_seats: u32,
}

/// Compute the pool overview for every route, in the given route order.
pub fn pool_status(board: &Board, routes: &[Route], ctx: &DispatchContext<'_>) -> Vec<RoutePoolStatus> {
    let consumed = compute_consumed(&board.assignments);
    let spare = compute_spare_seats(&board.assignments, ctx);

    routes
        .iter()
        .map(|route| {
            let total = board.pool_total(route.id);
            let used = consumed.get(&route.id).copied().unwrap_or(0);
            let percent_used = if total > 0 {
                ((used as f64 / total as f64) * 100.0).round() as u32
            } else {
                0
            };
            RoutePoolStatus {
                route_id: route.id,
                route_name: route.name.clone(),
                total,
                consumed: used,
                remaining: total.saturating_sub(used),
                percent_used,
                spare_seats: spare.get(&route.id).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// How many routes have had their whole pool assigned.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClearedSummary {
    pub cleared: usize,
    pub total_routes: usize,
    pub all_clear: bool,
}

/// A route counts as cleared when it has a pool and consumption has reached
/// it. All-clear only means something when there are routes at all.
pub fn cleared_routes(board: &Board, routes: &[Route]) -> ClearedSummary {
    let consumed = compute_consumed(&board.assignments);
    let cleared = routes
        .iter()
        .filter(|r| {
            let total = board.pool_total(r.id);
            total > 0 && consumed.get(&r.id).copied().unwrap_or(0) >= total
        })
        .count();
    ClearedSummary {
        cleared,
        total_routes: routes.len(),
        all_clear: !routes.is_empty() && cleared == routes.len(),
    }
}

// =============================================================================
// Leg auto-suggestion
// =============================================================================

/// A proposed leg, not yet on any board. Drafts carry the conditions a caller
/// must surface but never persist anything themselves.
#[derive(Debug, Clone, Serialize)]
pub struct LegDraft {
    pub leg: Leg,
    /// No block time on file for this aircraft/route pair; the arrival time
    /// was left empty and must be entered manually.
    pub block_time_missing: bool,
}

/// Propose a new route leg for an aircraft.
///
/// Defaults follow the desk's habits: pax is the lesser of effective capacity
/// and the route's remaining pool; the origin is the aircraft's current
/// position on the board (its base before the first leg); destination and,
/// when a block time is on file, arrival time are derived instead of typed.
pub fn suggest_leg(
    route: &Route,
    aircraft: &Aircraft,
    board: &Board,
    ctx: &DispatchContext<'_>,
    dep_time: Option<TimeOfDay>,
) -> LegDraft {
    let consumed = compute_consumed(&board.assignments);
    let rem = remaining(&board.pool, &consumed, route.id);
    let capacity = ctx.capacity_of(aircraft.id);

    let position = board
        .assignment(aircraft.id)
        .and_then(|a| a.current_position(aircraft))
        .or(aircraft.base.as_deref());
    let (from, to) = super::blocktime::resolve_sector(route, position);

    let config = ctx.config(aircraft.id);
    let arr_time =
        dep_time.and_then(|dep| super::blocktime::derive_arrival(config, route.id, dep));
    let block_time_missing = config.and_then(|c| c.block_time(route.id)).is_none();

    LegDraft {
        leg: Leg {
            id: LegId::generate(),
            kind: LegKind::Route,
            route_id: Some(route.id),
            from,
            to,
            dep_time,
            arr_time,
            pax: capacity.min(rem),
            connecting_pax: 0,
            through_route_id: None,
        },
        block_time_missing,
    }
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod allocation_tests;
