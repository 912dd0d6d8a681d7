//! High-level store service layer.
//!
//! Repository-agnostic operations that work against any [`FullRepository`]
//! implementation, owning two cross-cutting policies:
//!
//! 1. **Best-effort persistence.** The desk applies every change to its
//!    in-memory state first; store calls are fire-and-forget from its point
//!    of view. Load functions therefore return empty collections and log on
//!    failure, and writes are logged and swallowed - a dead store must never
//!    take the board down with it.
//! 2. **Board lifecycle.** Boards are created lazily per date, reconciled
//!    against the active fleet on every access, and each save appends a
//!    snapshot to the append-only audit log. The audit write is secondary
//!    telemetry: its failure never rolls back or blocks the board upsert.
//!
//! Saves are last-write-wins. Concurrent editors of one date race; the audit
//! log keeps every save, so a lost update can be recovered offline.

use chrono::{NaiveDate, Utc};
use log::{info, warn};

use super::repository::{AuditEntry, FullRepository, RepositoryResult};
use crate::models::{
    Aircraft, AircraftAssignment, AircraftConfig, AircraftId, Airport, AirportId, Board, Charter,
    CharterId, Route, RouteId, TemplateSlot, Weekday,
};
use crate::services::template::sort_slots_by_departure;

// ==================== Health ====================

/// Pass-through to the backend's health probe.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Reference data (best-effort loads) ====================

pub async fn load_airports<R: FullRepository + ?Sized>(repo: &R) -> Vec<Airport> {
    match repo.list_airports().await {
        Ok(list) => list,
        Err(e) => {
            warn!("loading airports failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

pub async fn load_aircraft<R: FullRepository + ?Sized>(repo: &R) -> Vec<Aircraft> {
    match repo.list_aircraft().await {
        Ok(list) => list,
        Err(e) => {
            warn!("loading aircraft failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

/// Active airframes only, in stable fleet order.
pub async fn load_active_aircraft<R: FullRepository + ?Sized>(repo: &R) -> Vec<Aircraft> {
    load_aircraft(repo)
        .await
        .into_iter()
        .filter(|a| a.is_active())
        .collect()
}

pub async fn load_routes<R: FullRepository + ?Sized>(repo: &R) -> Vec<Route> {
    match repo.list_routes().await {
        Ok(list) => list,
        Err(e) => {
            warn!("loading routes failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

pub async fn load_charters<R: FullRepository + ?Sized>(repo: &R) -> Vec<Charter> {
    match repo.list_charters().await {
        Ok(list) => list,
        Err(e) => {
            warn!("loading charters failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

pub async fn load_aircraft_configs<R: FullRepository + ?Sized>(repo: &R) -> Vec<AircraftConfig> {
    match repo.list_aircraft_configs().await {
        Ok(list) => list,
        Err(e) => {
            warn!("loading aircraft config failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

// ==================== Reference data (swallowed writes) ====================

pub async fn save_airport<R: FullRepository + ?Sized>(repo: &R, airport: &Airport) {
    if let Err(e) = repo.upsert_airport(airport).await {
        warn!("saving airport {} failed: {e}", airport.code);
    }
}

pub async fn delete_airport<R: FullRepository + ?Sized>(repo: &R, id: AirportId) {
    if let Err(e) = repo.delete_airport(id).await {
        warn!("deleting airport {id} failed: {e}");
    }
}

pub async fn save_aircraft<R: FullRepository + ?Sized>(repo: &R, aircraft: &Aircraft) {
    if let Err(e) = repo.upsert_aircraft(aircraft).await {
        warn!("saving aircraft {} failed: {e}", aircraft.registration);
    }
}

pub async fn delete_aircraft<R: FullRepository + ?Sized>(repo: &R, id: AircraftId) {
    if let Err(e) = repo.delete_aircraft(id).await {
        warn!("deleting aircraft {id} failed: {e}");
    }
}

pub async fn save_route<R: FullRepository + ?Sized>(repo: &R, route: &Route) {
    if let Err(e) = repo.upsert_route(route).await {
        warn!("saving route {} failed: {e}", route.name);
    }
}

pub async fn delete_route<R: FullRepository + ?Sized>(repo: &R, id: RouteId) {
    if let Err(e) = repo.delete_route(id).await {
        warn!("deleting route {id} failed: {e}");
    }
}

pub async fn save_charter<R: FullRepository + ?Sized>(repo: &R, charter: &Charter) {
    if let Err(e) = repo.upsert_charter(charter).await {
        warn!("saving charter for {} failed: {e}", charter.client);
    }
}

pub async fn delete_charter<R: FullRepository + ?Sized>(repo: &R, id: CharterId) {
    if let Err(e) = repo.delete_charter(id).await {
        warn!("deleting charter {id} failed: {e}");
    }
}

pub async fn save_aircraft_config<R: FullRepository + ?Sized>(repo: &R, config: &AircraftConfig) {
    if let Err(e) = repo.upsert_aircraft_config(config).await {
        warn!("saving config for aircraft {} failed: {e}", config.aircraft_id);
    }
}

pub async fn delete_aircraft_config<R: FullRepository + ?Sized>(repo: &R, aircraft_id: AircraftId) {
    if let Err(e) = repo.delete_aircraft_config(aircraft_id).await {
        warn!("deleting config for aircraft {aircraft_id} failed: {e}");
    }
}

// ==================== Weekly template ====================

pub async fn load_day_slots<R: FullRepository + ?Sized>(repo: &R, day: Weekday) -> Vec<TemplateSlot> {
    match repo.slots_for_day(day).await {
        Ok(slots) => slots,
        Err(e) => {
            warn!("loading template for {day} failed, continuing with none: {e}");
            Vec::new()
        }
    }
}

pub async fn load_weekly_template<R: FullRepository + ?Sized>(
    repo: &R,
) -> std::collections::HashMap<Weekday, Vec<TemplateSlot>> {
    match repo.full_week().await {
        Ok(week) => week,
        Err(e) => {
            warn!("loading weekly template failed, continuing with none: {e}");
            Default::default()
        }
    }
}

/// Persist a day's slots, kept in departure-time order. Returns the list as
/// stored so callers can adopt it as their local state.
pub async fn save_day_slots<R: FullRepository + ?Sized>(
    repo: &R,
    day: Weekday,
    slots: Vec<TemplateSlot>,
) -> Vec<TemplateSlot> {
    let sorted = sort_slots_by_departure(slots);
    if let Err(e) = repo.upsert_day(day, &sorted).await {
        warn!("saving template for {day} failed: {e}");
    }
    sorted
}

/// Copy one weekday's template wholesale onto another.
pub async fn copy_template_day<R: FullRepository + ?Sized>(
    repo: &R,
    from: Weekday,
    to: Weekday,
) -> Vec<TemplateSlot> {
    let slots = load_day_slots(repo, from).await;
    info!("copying {} template slots from {from} to {to}", slots.len());
    save_day_slots(repo, to, slots).await
}

// ==================== Board lifecycle ====================

/// Ensure every active aircraft has an assignment slot on the board.
///
/// Appends empty assignments for newly active aircraft; never removes
/// assignments whose aircraft have since gone inactive (their recorded legs
/// are history worth keeping). Idempotent: a second pass with the same
/// fleet changes nothing.
pub fn reconcile(board: &mut Board, active: &[Aircraft]) -> bool {
    let mut changed = false;
    for aircraft in active {
        if board.assignment(aircraft.id).is_none() {
            board
                .assignments
                .push(AircraftAssignment::empty(aircraft.id));
            changed = true;
        }
    }
    changed
}

/// The board for a date, created lazily and reconciled against the active
/// fleet. A failed fetch degrades to a fresh board - the desk must open
/// either way.
pub async fn get_or_create_board<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
    active: &[Aircraft],
) -> Board {
    let mut board = match repo.fetch_board(date).await {
        Ok(Some(board)) => board,
        Ok(None) => Board::new(date),
        Err(e) => {
            warn!("fetching board {date} failed, starting empty: {e}");
            Board::new(date)
        }
    };
    if reconcile(&mut board, active) {
        info!(
            "board {date}: added assignment slots, now {} aircraft",
            board.assignments.len()
        );
    }
    board
}

/// Persist a board, then append a snapshot to the audit log.
///
/// The upsert is best-effort (failure logged, in-memory state stays as the
/// caller built it). The audit append runs only after a successful upsert
/// and is itself best-effort: audit trouble never fails a save.
pub async fn save_board<R: FullRepository + ?Sized>(repo: &R, board: &Board) {
    if let Err(e) = repo.upsert_board(board).await {
        warn!("saving board {} failed: {e}", board.date);
        return;
    }
    info!(
        "board {} saved ({} assignments, {} pooled routes)",
        board.date,
        board.assignments.len(),
        board.pool.len()
    );

    let entry = AuditEntry::for_board(board, Utc::now());
    if let Err(e) = repo.append_audit_entry(&entry).await {
        warn!("audit append for board {} failed: {e}", board.date);
    }
}

/// Result of [`copy_pool_from_previous_day`].
#[derive(Debug, Clone)]
pub enum CopyPoolOutcome {
    /// Pool totals copied and saved; here is the updated board.
    Copied(Board),
    /// Nothing recorded for the previous day. A user-facing condition, not
    /// an error.
    NoPriorBoard,
}

/// Copy yesterday's pool totals onto a date's board, assignments untouched.
///
/// "Yesterday" is plain calendar subtraction; there is no business-day
/// logic.
pub async fn copy_pool_from_previous_day<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
    active: &[Aircraft],
) -> CopyPoolOutcome {
    let Some(prev_date) = date.pred_opt() else {
        return CopyPoolOutcome::NoPriorBoard;
    };
    let prev = match repo.fetch_board(prev_date).await {
        Ok(found) => found,
        Err(e) => {
            warn!("fetching previous board {prev_date} failed: {e}");
            None
        }
    };
    let Some(prev) = prev else {
        return CopyPoolOutcome::NoPriorBoard;
    };

    let mut board = get_or_create_board(repo, date, active).await;
    board.pool = prev.pool.clone();
    info!(
        "copied pool for {} routes from {prev_date} onto {date}",
        board.pool.len()
    );
    save_board(repo, &board).await;
    CopyPoolOutcome::Copied(board)
}
