//! A day at the dispatch desk, end to end: reference data in the store,
//! board reconciliation, pool accounting as legs land, template drafts, and
//! the exported program.

mod support;

use airops::db::repositories::LocalRepository;
use airops::db::services as db;
use airops::db::{AuditRepository, ReferenceRepository};
use airops::services::allocation::{
    cleared_routes, compute_consumed, compute_spare_seats, pool_status, remaining, suggest_leg,
    validate_leg_on_board, DispatchContext, LegIssue, Severity,
};
use airops::services::program::{build_program, MovementKind, ProgramSession};
use airops::services::template::plan_slot;
use chrono::Utc;
use support::*;

#[tokio::test]
async fn test_single_leg_accounting() {
    // Pool of 20 on the shuttle; one 12-pax leg on a 14-seater leaves 8 in
    // the pool and 2 spare seats, nothing to warn about.
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let caravan = aircraft("9Q-PKP", "C208", 14, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let configs = db::load_aircraft_configs(&repo).await;

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 20);
    let leg = route_leg(shuttle.id, "FBM", "KWZ", 12);
    board
        .assignment_mut(caravan.id)
        .unwrap()
        .legs
        .push(leg.clone());

    let ctx = DispatchContext::new(&routes, &fleet, &configs);
    let consumed = compute_consumed(&board.assignments);
    assert_eq!(consumed.get(&shuttle.id), Some(&12));
    assert_eq!(remaining(&board.pool, &consumed, shuttle.id), 8);
    assert_eq!(
        compute_spare_seats(&board.assignments, &ctx).get(&shuttle.id),
        Some(&2)
    );
    assert!(validate_leg_on_board(&leg, caravan.id, &board, &ctx).is_empty());
}

#[tokio::test]
async fn test_through_pax_overload_day() {
    // 14 local on their own pool plus 3 through pax tracked against another
    // route: both pools are debited and the leg is overloaded by 3.
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let onward = single_hop_route("KWZ-GMA", "KWZ", "GMA");
    let caravan = aircraft("9Q-PKP", "C208", 14, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_route(&onward).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let ctx = DispatchContext::new(&routes, &fleet, &[]);

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 20);
    board.set_pool(onward.id, 10);

    let mut leg = route_leg(shuttle.id, "FBM", "KWZ", 14);
    leg.connecting_pax = 3;
    leg.through_route_id = Some(onward.id);
    board
        .assignment_mut(caravan.id)
        .unwrap()
        .legs
        .push(leg.clone());

    let consumed = compute_consumed(&board.assignments);
    assert_eq!(consumed.get(&shuttle.id), Some(&14));
    assert_eq!(consumed.get(&onward.id), Some(&3));

    let warnings = validate_leg_on_board(&leg, caravan.id, &board, &ctx);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].issue, LegIssue::Overloaded);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert_eq!(warnings[0].amount, 3);

    // Overbooking is flagged, never blocked: the board still saves and the
    // audit trail records it.
    db::save_board(&repo, &board).await;
    assert_eq!(repo.audit_entries_for(monday()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_template_slot_to_saved_leg() {
    // Monday slot: shuttle at 08:00, C208 required, 10 pax expected. The
    // 12-seat caravan has no block time on file, so the draft has no
    // arrival time and the desk is told.
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let caravan = aircraft("9Q-PKP", "C208", 12, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let ctx = DispatchContext::new(&routes, &fleet, &[]);

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 30);

    let monday_slot = slot(shuttle.id, Some("C208"), "08:00", Some(10));
    let plan = plan_slot(&monday_slot, &fleet, None, &board, &ctx).unwrap();

    assert_eq!(plan.registration, "9Q-PKP");
    assert_eq!(plan.draft.leg.pax, 10);
    assert_eq!(plan.draft.leg.dep_time.unwrap().to_string(), "08:00");
    assert!(plan.draft.leg.arr_time.is_none());
    assert!(plan.draft.block_time_missing);

    // Commit the draft through the lifecycle layer and read it back.
    board
        .assignment_mut(plan.aircraft_id)
        .unwrap()
        .legs
        .push(plan.draft.leg.clone());
    db::save_board(&repo, &board).await;

    let reloaded = db::get_or_create_board(&repo, monday(), &fleet).await;
    assert_eq!(reloaded.assignment(caravan.id).unwrap().legs.len(), 1);
}

#[tokio::test]
async fn test_block_time_drives_draft_arrival() {
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let caravan = aircraft("9Q-PKP", "C208", 12, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();
    repo.upsert_aircraft_config(&config_with_block_time(caravan.id, shuttle.id, 75))
        .await
        .unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let configs = db::load_aircraft_configs(&repo).await;
    let ctx = DispatchContext::new(&routes, &fleet, &configs);

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 12);

    let draft = suggest_leg(
        &shuttle,
        &caravan,
        &board,
        &ctx,
        Some("06:45".parse().unwrap()),
    );
    assert!(!draft.block_time_missing);
    assert_eq!(draft.leg.arr_time.unwrap().to_string(), "08:00");
}

#[tokio::test]
async fn test_pool_header_and_cleared_stats() {
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let milk_run = single_hop_route("FBM-GMA", "FBM", "GMA");
    let caravan = aircraft("9Q-PKP", "C208", 20, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_route(&milk_run).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let ctx = DispatchContext::new(&routes, &fleet, &[]);

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 16);
    board.set_pool(milk_run.id, 5);
    board
        .assignment_mut(caravan.id)
        .unwrap()
        .legs
        .push(route_leg(shuttle.id, "FBM", "KWZ", 16));

    let status = pool_status(&board, &routes, &ctx);
    let shuttle_status = status.iter().find(|s| s.route_id == shuttle.id).unwrap();
    assert_eq!(shuttle_status.remaining, 0);
    assert_eq!(shuttle_status.percent_used, 100);
    assert_eq!(shuttle_status.spare_seats, 4);

    let summary = cleared_routes(&board, &routes);
    assert_eq!(summary.cleared, 1);
    assert_eq!(summary.total_routes, 2);
    assert!(!summary.all_clear);
}

#[tokio::test]
async fn test_program_for_the_day() {
    let repo = LocalRepository::new();
    let shuttle = single_hop_route("FBM-KWZ", "FBM", "KWZ");
    let caravan = aircraft("9Q-PKP", "C208", 12, "FBM");
    let islander = aircraft("9Q-PKQ", "BN2", 9, "FBM");
    repo.upsert_route(&shuttle).await.unwrap();
    repo.upsert_aircraft(&caravan).await.unwrap();
    repo.upsert_aircraft(&islander).await.unwrap();

    let fleet = db::load_aircraft(&repo).await;
    let routes = db::load_routes(&repo).await;
    let ctx = DispatchContext::new(&routes, &fleet, &[]);

    let mut board = db::get_or_create_board(&repo, monday(), &fleet).await;
    board.set_pool(shuttle.id, 20);
    // The caravan flies the shuttle out and nightstops at KWZ.
    board.assignment_mut(caravan.id).unwrap().legs.push(timed(
        route_leg(shuttle.id, "FBM", "KWZ", 12),
        "14:00",
        "15:10",
    ));
    // The islander also has a morning charter overlay.
    let charters = vec![charter(
        islander.id,
        monday(),
        "06:30",
        4,
        airops::models::CharterStatus::Confirmed,
    )];

    let doc = build_program(
        &board,
        &fleet,
        &charters,
        &ctx,
        ProgramSession::Afternoon,
        Utc::now(),
    );

    assert!(!doc.empty);
    assert_eq!(doc.aircraft.len(), 2);

    let caravan_section = doc
        .aircraft
        .iter()
        .find(|s| s.registration == "9Q-PKP")
        .unwrap();
    assert!(caravan_section.nightstop);
    assert_eq!(caravan_section.final_position.as_deref(), Some("KWZ"));
    assert_eq!(caravan_section.movements[0].kind, MovementKind::Route);
    assert_eq!(
        caravan_section.movements[0].route_name.as_deref(),
        Some("FBM-KWZ")
    );

    let islander_section = doc
        .aircraft
        .iter()
        .find(|s| s.registration == "9Q-PKQ")
        .unwrap();
    assert_eq!(islander_section.movements[0].kind, MovementKind::Charter);
    assert!(!islander_section.nightstop);

    assert_eq!(doc.nightstops.len(), 1);
    assert_eq!(doc.nightstops[0].registration, "9Q-PKP");
}
