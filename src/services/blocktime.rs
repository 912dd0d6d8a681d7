//! Block-time derivation and sector auto-fill.
//!
//! Arrival times are derived from per-aircraft, per-route block times with
//! minute-of-day arithmetic wrapping at 24h; no date rollover is modeled, so
//! a flight crossing midnight is not representable. When no block time is on
//! file for an aircraft/route pair the arrival must be entered manually and
//! callers surface that condition.

use crate::models::{AircraftConfig, Route, RouteId, TimeOfDay};

/// Arrival time for a departure on the given route, when the aircraft has a
/// block time on file for it.
pub fn derive_arrival(
    config: Option<&AircraftConfig>,
    route_id: RouteId,
    dep_time: TimeOfDay,
) -> Option<TimeOfDay> {
    let minutes = config.and_then(|c| c.block_time(route_id))?;
    Some(dep_time.add_minutes(minutes as i32))
}

/// Origin/destination auto-fill for a leg on `route`.
///
/// If the routing has a hop departing from the aircraft's current position,
/// the leg flies that hop. Otherwise the leg snaps to the route's first
/// origin and last destination, treating the path as a single logical hop -
/// multi-hop routings are deliberately not decomposed into dependent legs.
pub fn resolve_sector(route: &Route, current_position: Option<&str>) -> (String, String) {
    if let Some(position) = current_position {
        if let Some(hop) = route.hop_from(position) {
            return (hop.from.clone(), hop.to.clone());
        }
    }
    (
        route.first_origin().unwrap_or_default().to_string(),
        route.last_destination().unwrap_or_default().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftId, RouteHop};

    fn route_fbm_kwz_gma() -> Route {
        Route {
            id: RouteId::generate(),
            name: "FBM-KWZ-GMA".to_string(),
            operational_routing: vec![
                RouteHop {
                    from: "FBM".to_string(),
                    to: "KWZ".to_string(),
                },
                RouteHop {
                    from: "KWZ".to_string(),
                    to: "GMA".to_string(),
                },
            ],
            marketed_sectors: vec![],
            notes: String::new(),
        }
    }

    #[test]
    fn test_derive_arrival_with_block_time() {
        let route = route_fbm_kwz_gma();
        let mut cfg = AircraftConfig::new(AircraftId::generate());
        cfg.route_block_times.insert(route.id, 75);

        let dep: TimeOfDay = "08:00".parse().unwrap();
        let arr = derive_arrival(Some(&cfg), route.id, dep).unwrap();
        assert_eq!(arr.to_string(), "09:15");
    }

    #[test]
    fn test_derive_arrival_wraps_past_midnight() {
        let route = route_fbm_kwz_gma();
        let mut cfg = AircraftConfig::new(AircraftId::generate());
        cfg.route_block_times.insert(route.id, 90);

        let dep: TimeOfDay = "23:00".parse().unwrap();
        let arr = derive_arrival(Some(&cfg), route.id, dep).unwrap();
        assert_eq!(arr.to_string(), "00:30");
    }

    #[test]
    fn test_derive_arrival_without_block_time() {
        let route = route_fbm_kwz_gma();
        let cfg = AircraftConfig::new(AircraftId::generate());
        let dep: TimeOfDay = "08:00".parse().unwrap();

        assert!(derive_arrival(Some(&cfg), route.id, dep).is_none());
        assert!(derive_arrival(None, route.id, dep).is_none());
    }

    #[test]
    fn test_sector_follows_matching_hop() {
        let route = route_fbm_kwz_gma();
        let (from, to) = resolve_sector(&route, Some("KWZ"));
        assert_eq!((from.as_str(), to.as_str()), ("KWZ", "GMA"));
    }

    #[test]
    fn test_sector_snaps_to_endpoints_without_match() {
        let route = route_fbm_kwz_gma();
        let (from, to) = resolve_sector(&route, Some("XYZ"));
        assert_eq!((from.as_str(), to.as_str()), ("FBM", "GMA"));

        let (from, to) = resolve_sector(&route, None);
        assert_eq!((from.as_str(), to.as_str()), ("FBM", "GMA"));
    }
}
