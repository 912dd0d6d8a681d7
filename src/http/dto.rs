//! Data Transfer Objects for the HTTP API.
//!
//! Most payloads are the domain models themselves - they already derive
//! Serialize/Deserialize. The types here wrap them with derived state or
//! request envelopes.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AircraftAssignment, AircraftId, Leg, RouteId, TemplateSlot, Weekday,
};
use crate::services::allocation::{ClearedSummary, LegWarning, RoutePoolStatus};
use crate::services::nightstop::Nightstop;
use crate::services::program::ProgramSession;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// A board plus everything the desk derives from it on each read.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub pool: HashMap<RouteId, u32>,
    pub assignments: Vec<AircraftAssignment>,
    /// Per-route used/remaining/spare figures, in route order.
    pub pool_status: Vec<RoutePoolStatus>,
    pub cleared: ClearedSummary,
    pub nightstops: Vec<Nightstop>,
}

/// Request body for saving a board. The date comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveBoardRequest {
    #[serde(default)]
    pub pool: HashMap<RouteId, u32>,
    #[serde(default)]
    pub assignments: Vec<AircraftAssignment>,
}

/// Request body for a leg validation preview.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateLegRequest {
    pub aircraft_id: AircraftId,
    pub leg: Leg,
}

/// Validation preview response: the severity-ranked warning list.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateLegResponse {
    pub warnings: Vec<LegWarning>,
}

/// Request body for turning a template slot into a draft leg.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDraftRequest {
    pub slot: TemplateSlot,
    #[serde(default)]
    pub preferred_aircraft_id: Option<AircraftId>,
}

/// Outcome of a copy-previous-pool request. "No prior board" is a normal
/// answer, not an error status.
#[derive(Debug, Clone, Serialize)]
pub struct CopyPoolResponse {
    pub copied: bool,
    pub message: String,
}

/// Request body for replacing one weekday's template.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDayRequest {
    #[serde(default)]
    pub slots: Vec<TemplateSlot>,
}

/// Request body for copying a weekday's template onto another day.
#[derive(Debug, Clone, Deserialize)]
pub struct CopyDayRequest {
    pub to: Weekday,
}

/// Query parameters for the program export.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramQuery {
    #[serde(default = "default_session")]
    pub session: ProgramSession,
}

fn default_session() -> ProgramSession {
    ProgramSession::Afternoon
}

/// Query parameters for charter listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CharterListQuery {
    /// "upcoming" (default), "all", or a status name.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Distinct aircraft type labels in the fleet.
#[derive(Debug, Clone, Serialize)]
pub struct FleetTypesResponse {
    pub types: Vec<String>,
}
