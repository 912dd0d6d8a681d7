//! Shared fixture builders for the integration suites.
#![allow(dead_code)]

use airops::models::{
    Aircraft, AircraftConfig, AircraftId, AircraftStatus, Charter, CharterId, CharterStatus, Leg,
    LegId, LegKind, Route, RouteHop, RouteId, TemplateSlot, TimeOfDay,
};
use chrono::NaiveDate;

/// A date with a known weekday (2025-06-09 is a Monday).
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
}

pub fn aircraft(reg: &str, ac_type: &str, capacity: u32, base: &str) -> Aircraft {
    Aircraft {
        id: AircraftId::generate(),
        registration: reg.to_string(),
        ac_type: ac_type.to_string(),
        default_capacity: capacity,
        base: Some(base.to_string()),
        status: AircraftStatus::Active,
    }
}

pub fn single_hop_route(name: &str, from: &str, to: &str) -> Route {
    Route {
        id: RouteId::generate(),
        name: name.to_string(),
        operational_routing: vec![RouteHop {
            from: from.to_string(),
            to: to.to_string(),
        }],
        marketed_sectors: vec![],
        notes: String::new(),
    }
}

pub fn config_with_block_time(aircraft_id: AircraftId, route_id: RouteId, minutes: u32) -> AircraftConfig {
    let mut config = AircraftConfig::new(aircraft_id);
    config.route_block_times.insert(route_id, minutes);
    config
}

pub fn route_leg(route_id: RouteId, from: &str, to: &str, pax: u32) -> Leg {
    Leg {
        id: LegId::generate(),
        kind: LegKind::Route,
        route_id: Some(route_id),
        from: from.to_string(),
        to: to.to_string(),
        dep_time: None,
        arr_time: None,
        pax,
        connecting_pax: 0,
        through_route_id: None,
    }
}

pub fn timed(mut leg: Leg, dep: &str, arr: &str) -> Leg {
    leg.dep_time = Some(dep.parse::<TimeOfDay>().unwrap());
    leg.arr_time = Some(arr.parse::<TimeOfDay>().unwrap());
    leg
}

pub fn slot(route_id: RouteId, ac_type: Option<&str>, dep: &str, expected_pax: Option<u32>) -> TemplateSlot {
    let mut slot = TemplateSlot::new(route_id, dep.parse::<TimeOfDay>().unwrap());
    slot.ac_type = ac_type.map(str::to_string);
    slot.expected_pax = expected_pax;
    slot
}

pub fn charter(
    aircraft_id: AircraftId,
    date: NaiveDate,
    dep: &str,
    pax: u32,
    status: CharterStatus,
) -> Charter {
    Charter {
        id: CharterId::generate(),
        client: "Kamoa Mining".to_string(),
        from: Some("FBM".to_string()),
        to: Some("KGA".to_string()),
        date,
        dep_time: Some(dep.parse::<TimeOfDay>().unwrap()),
        arr_time: None,
        pax,
        aircraft_id: Some(aircraft_id),
        status,
        notes: String::new(),
    }
}
