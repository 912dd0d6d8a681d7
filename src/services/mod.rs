//! Pure computation layer.
//!
//! Everything under `services` is a synchronous function over an in-memory
//! snapshot of one board plus reference data: the allocation engine, block
//! time derivation, the weekly template scheduler, nightstop detection and
//! the program projection. Persistence and orchestration live in `db`.

pub mod allocation;
pub mod blocktime;
pub mod nightstop;
pub mod program;
pub mod template;

pub use allocation::{
    cleared_routes, compute_consumed, compute_spare_seats, pool_status, remaining, suggest_leg,
    validate_leg, validate_leg_on_board, DispatchContext, LegDraft, LegIssue, LegWarning, Severity,
};
pub use blocktime::{derive_arrival, resolve_sector};
pub use nightstop::{board_nightstops, Nightstop};
pub use program::{build_program, ProgramDocument, ProgramSession};
pub use template::{
    apply_template_slot, fleet_types, match_aircraft, plan_slot, sort_slots_by_departure,
    SlotPlan, SlotPlanError,
};
