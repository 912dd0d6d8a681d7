//! HTTP handlers for the REST API.
//!
//! Handlers delegate to the store service layer and the pure services; they
//! hold no logic of their own beyond request parsing and precondition
//! checks. Writes follow the optimistic contract: the response reflects the
//! state the caller asked for even when the backing store write was dropped
//! (that failure is logged, never surfaced as a 5xx).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::dto::{
    BoardView, CharterListQuery, CopyDayRequest, CopyPoolResponse, FleetTypesResponse,
    HealthResponse, ProgramQuery, SaveBoardRequest, SaveDayRequest, TemplateDraftRequest,
    ValidateLegRequest, ValidateLegResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::db::CopyPoolOutcome;
use crate::models::{
    Aircraft, AircraftConfig, AircraftId, Airport, AirportId, Board, Charter, CharterFilter,
    CharterId, LegKind, Route, RouteId, TemplateSlot, Weekday,
};
use crate::services::allocation::{cleared_routes, pool_status, validate_leg_on_board, DispatchContext};
use crate::services::nightstop::board_nightstops;
use crate::services::program::{build_program, ProgramDocument};
use crate::services::template::{fleet_types, plan_slot, SlotPlan, SlotPlanError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {e}"),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Airports
// =============================================================================

/// GET /v1/airports
pub async fn list_airports(State(state): State<AppState>) -> HandlerResult<Vec<Airport>> {
    Ok(Json(db_services::load_airports(state.repository.as_ref()).await))
}

/// PUT /v1/airports
pub async fn upsert_airport(
    State(state): State<AppState>,
    Json(mut airport): Json<Airport>,
) -> HandlerResult<Airport> {
    if airport.code.trim().is_empty() {
        return Err(AppError::Unprocessable("airport code is required".into()));
    }
    airport.code = crate::models::normalize_code(&airport.code);
    db_services::save_airport(state.repository.as_ref(), &airport).await;
    Ok(Json(airport))
}

/// DELETE /v1/airports/{id}
pub async fn delete_airport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    db_services::delete_airport(state.repository.as_ref(), AirportId::new(id)).await;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Fleet
// =============================================================================

/// GET /v1/aircraft
pub async fn list_aircraft(State(state): State<AppState>) -> HandlerResult<Vec<Aircraft>> {
    Ok(Json(db_services::load_aircraft(state.repository.as_ref()).await))
}

/// PUT /v1/aircraft
pub async fn upsert_aircraft(
    State(state): State<AppState>,
    Json(aircraft): Json<Aircraft>,
) -> HandlerResult<Aircraft> {
    if aircraft.registration.trim().is_empty() {
        return Err(AppError::Unprocessable("registration is required".into()));
    }
    db_services::save_aircraft(state.repository.as_ref(), &aircraft).await;
    Ok(Json(aircraft))
}

/// DELETE /v1/aircraft/{id}
pub async fn delete_aircraft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    db_services::delete_aircraft(state.repository.as_ref(), AircraftId::new(id)).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/aircraft/{id}/config
pub async fn get_aircraft_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<AircraftConfig> {
    let id = AircraftId::new(id);
    let config = db_services::load_aircraft_configs(state.repository.as_ref())
        .await
        .into_iter()
        .find(|c| c.aircraft_id == id)
        .unwrap_or_else(|| AircraftConfig::new(id));
    Ok(Json(config))
}

/// PUT /v1/aircraft/{id}/config
pub async fn put_aircraft_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut config): Json<AircraftConfig>,
) -> HandlerResult<AircraftConfig> {
    // The path owns the key; the body's aircraft_id is ignored.
    config.aircraft_id = AircraftId::new(id);
    db_services::save_aircraft_config(state.repository.as_ref(), &config).await;
    Ok(Json(config))
}

/// GET /v1/fleet/types
pub async fn get_fleet_types(State(state): State<AppState>) -> HandlerResult<FleetTypesResponse> {
    let fleet = db_services::load_aircraft(state.repository.as_ref()).await;
    Ok(Json(FleetTypesResponse {
        types: fleet_types(&fleet),
    }))
}

// =============================================================================
// Routes
// =============================================================================

/// GET /v1/routes
pub async fn list_routes(State(state): State<AppState>) -> HandlerResult<Vec<Route>> {
    Ok(Json(db_services::load_routes(state.repository.as_ref()).await))
}

/// PUT /v1/routes
pub async fn upsert_route(
    State(state): State<AppState>,
    Json(route): Json<Route>,
) -> HandlerResult<Route> {
    if route.name.trim().is_empty() {
        return Err(AppError::Unprocessable("route name is required".into()));
    }
    if !route.routing_is_valid() {
        return Err(AppError::Unprocessable(
            "operational routing must be a non-empty connected chain".into(),
        ));
    }
    db_services::save_route(state.repository.as_ref(), &route).await;
    Ok(Json(route))
}

/// DELETE /v1/routes/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    db_services::delete_route(state.repository.as_ref(), RouteId::new(id)).await;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Charters
// =============================================================================

/// GET /v1/charters?filter=
pub async fn list_charters(
    State(state): State<AppState>,
    Query(query): Query<CharterListQuery>,
) -> HandlerResult<Vec<Charter>> {
    let filter = match query.filter.as_deref() {
        None | Some("upcoming") => CharterFilter::Upcoming,
        Some("all") => CharterFilter::All,
        Some(status) => CharterFilter::Status(status.parse().map_err(AppError::BadRequest)?),
    };
    let charters = db_services::load_charters(state.repository.as_ref()).await;
    let today = Utc::now().date_naive();
    let filtered: Vec<Charter> = crate::models::filter_charters(&charters, filter, today)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// PUT /v1/charters
pub async fn upsert_charter(
    State(state): State<AppState>,
    Json(charter): Json<Charter>,
) -> HandlerResult<Charter> {
    if charter.client.trim().is_empty() {
        return Err(AppError::Unprocessable("charter client is required".into()));
    }
    db_services::save_charter(state.repository.as_ref(), &charter).await;
    Ok(Json(charter))
}

/// DELETE /v1/charters/{id}
pub async fn delete_charter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    db_services::delete_charter(state.repository.as_ref(), CharterId::new(id)).await;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Weekly template
// =============================================================================

/// GET /v1/template
pub async fn get_week(
    State(state): State<AppState>,
) -> HandlerResult<std::collections::HashMap<Weekday, Vec<TemplateSlot>>> {
    Ok(Json(
        db_services::load_weekly_template(state.repository.as_ref()).await,
    ))
}

/// GET /v1/template/{day}
pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<Weekday>,
) -> HandlerResult<Vec<TemplateSlot>> {
    Ok(Json(
        db_services::load_day_slots(state.repository.as_ref(), day).await,
    ))
}

/// PUT /v1/template/{day}
pub async fn put_day(
    State(state): State<AppState>,
    Path(day): Path<Weekday>,
    Json(request): Json<SaveDayRequest>,
) -> HandlerResult<Vec<TemplateSlot>> {
    let stored = db_services::save_day_slots(state.repository.as_ref(), day, request.slots).await;
    Ok(Json(stored))
}

/// POST /v1/template/{day}/copy
pub async fn copy_day(
    State(state): State<AppState>,
    Path(day): Path<Weekday>,
    Json(request): Json<CopyDayRequest>,
) -> HandlerResult<Vec<TemplateSlot>> {
    if request.to == day {
        return Err(AppError::BadRequest("cannot copy a day onto itself".into()));
    }
    let copied =
        db_services::copy_template_day(state.repository.as_ref(), day, request.to).await;
    Ok(Json(copied))
}

// =============================================================================
// Boards
// =============================================================================

/// GET /v1/boards/{date}
pub async fn get_board(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> HandlerResult<BoardView> {
    let repo = state.repository.as_ref();
    let fleet = db_services::load_aircraft(repo).await;
    let active: Vec<Aircraft> = fleet.iter().filter(|a| a.is_active()).cloned().collect();
    let board = db_services::get_or_create_board(repo, date, &active).await;
    Ok(Json(board_view(repo, board, &fleet).await))
}

/// PUT /v1/boards/{date}
pub async fn put_board(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(request): Json<SaveBoardRequest>,
) -> HandlerResult<BoardView> {
    // A route leg must name its route before it can be saved; everything
    // else (over capacity, over pool) is warn-and-save.
    for assignment in &request.assignments {
        for leg in &assignment.legs {
            if leg.kind == LegKind::Route && leg.route_id.is_none() {
                return Err(AppError::Unprocessable(
                    "route legs must reference a route".into(),
                ));
            }
        }
    }

    let repo = state.repository.as_ref();
    let fleet = db_services::load_aircraft(repo).await;
    let active: Vec<Aircraft> = fleet.iter().filter(|a| a.is_active()).cloned().collect();

    let mut board = Board::new(date);
    board.pool = request.pool;
    board.assignments = request.assignments;
    db_services::reconcile(&mut board, &active);
    db_services::save_board(repo, &board).await;

    Ok(Json(board_view(repo, board, &fleet).await))
}

/// POST /v1/boards/{date}/copy-previous-pool
pub async fn copy_previous_pool(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> HandlerResult<CopyPoolResponse> {
    let repo = state.repository.as_ref();
    let active = db_services::load_active_aircraft(repo).await;
    let response = match db_services::copy_pool_from_previous_day(repo, date, &active).await {
        CopyPoolOutcome::Copied(board) => CopyPoolResponse {
            copied: true,
            message: format!("pool totals copied for {} routes", board.pool.len()),
        },
        CopyPoolOutcome::NoPriorBoard => CopyPoolResponse {
            copied: false,
            message: "no board recorded for the previous day".to_string(),
        },
    };
    Ok(Json(response))
}

/// POST /v1/boards/{date}/validate-leg
pub async fn validate_leg(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(request): Json<ValidateLegRequest>,
) -> HandlerResult<ValidateLegResponse> {
    let repo = state.repository.as_ref();
    let fleet = db_services::load_aircraft(repo).await;
    let active: Vec<Aircraft> = fleet.iter().filter(|a| a.is_active()).cloned().collect();
    let routes = db_services::load_routes(repo).await;
    let configs = db_services::load_aircraft_configs(repo).await;
    let board = db_services::get_or_create_board(repo, date, &active).await;

    let ctx = DispatchContext::new(&routes, &fleet, &configs);
    let warnings = validate_leg_on_board(&request.leg, request.aircraft_id, &board, &ctx);
    Ok(Json(ValidateLegResponse { warnings }))
}

/// POST /v1/boards/{date}/template-draft
pub async fn template_draft(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(request): Json<TemplateDraftRequest>,
) -> HandlerResult<SlotPlan> {
    let repo = state.repository.as_ref();
    let fleet = db_services::load_aircraft(repo).await;
    let active: Vec<Aircraft> = fleet.iter().filter(|a| a.is_active()).cloned().collect();
    let routes = db_services::load_routes(repo).await;
    let configs = db_services::load_aircraft_configs(repo).await;
    let board = db_services::get_or_create_board(repo, date, &active).await;

    let ctx = DispatchContext::new(&routes, &fleet, &configs);
    let plan = plan_slot(
        &request.slot,
        &active,
        request.preferred_aircraft_id,
        &board,
        &ctx,
    )
    .map_err(|e| match e {
        SlotPlanError::NoActiveAircraft(_) | SlotPlanError::UnknownRoute(_) => {
            AppError::Unprocessable(e.to_string())
        }
    })?;
    Ok(Json(plan))
}

/// GET /v1/boards/{date}/program?session=
pub async fn get_program(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<ProgramQuery>,
) -> HandlerResult<ProgramDocument> {
    let repo = state.repository.as_ref();
    let fleet = db_services::load_aircraft(repo).await;
    let active: Vec<Aircraft> = fleet.iter().filter(|a| a.is_active()).cloned().collect();
    let routes = db_services::load_routes(repo).await;
    let configs = db_services::load_aircraft_configs(repo).await;
    let charters = db_services::load_charters(repo).await;
    let board = db_services::get_or_create_board(repo, date, &active).await;

    let ctx = DispatchContext::new(&routes, &fleet, &configs);
    let document = build_program(&board, &fleet, &charters, &ctx, query.session, Utc::now());
    Ok(Json(document))
}

// =============================================================================
// Shared view assembly
// =============================================================================

/// Assemble a board plus its derived state, recomputed from scratch on
/// every read.
async fn board_view(
    repo: &dyn crate::db::repository::FullRepository,
    board: Board,
    fleet: &[Aircraft],
) -> BoardView {
    let routes = db_services::load_routes(repo).await;
    let configs = db_services::load_aircraft_configs(repo).await;
    let ctx = DispatchContext::new(&routes, fleet, &configs);

    let status = pool_status(&board, &routes, &ctx);
    let cleared = cleared_routes(&board, &routes);
    let nightstops = board_nightstops(&board, fleet);

    BoardView {
        date: board.date,
        weekday: Weekday::from_date(board.date),
        pool: board.pool,
        assignments: board.assignments,
        pool_status: status,
        cleared,
        nightstops,
    }
}
