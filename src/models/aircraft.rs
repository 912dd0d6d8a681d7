use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::route::RouteId;

crate::define_id_type!(AircraftId);

/// Operational status of an airframe. Only active aircraft take part in
/// board reconciliation and template matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftStatus {
    Active,
    Maintenance,
    /// Aircraft on ground - unserviceable.
    Aog,
}

impl Default for AircraftStatus {
    fn default() -> Self {
        AircraftStatus::Active
    }
}

impl AircraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftStatus::Active => "active",
            AircraftStatus::Maintenance => "maintenance",
            AircraftStatus::Aog => "aog",
        }
    }
}

/// A fleet aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub registration: String,
    /// Type label, e.g. "C208" - matched against template slot constraints.
    #[serde(default)]
    pub ac_type: String,
    pub default_capacity: u32,
    /// Home base airport code. An aircraft ending its day elsewhere is a
    /// nightstop.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub status: AircraftStatus,
}

impl Aircraft {
    pub fn is_active(&self) -> bool {
        self.status == AircraftStatus::Active
    }

    /// Seat capacity with any per-aircraft configuration override applied.
    pub fn effective_capacity(&self, config: Option<&AircraftConfig>) -> u32 {
        config
            .and_then(|c| c.capacity_override)
            .unwrap_or(self.default_capacity)
    }
}

/// Per-aircraft configuration, persisted independently of the fleet record:
/// an optional capacity override and the block-time lookup table used to
/// derive arrival times. A route missing from the table means its block time
/// is not on file for this aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftConfig {
    pub aircraft_id: AircraftId,
    #[serde(default)]
    pub capacity_override: Option<u32>,
    /// Route id -> block time in minutes.
    #[serde(default)]
    pub route_block_times: HashMap<RouteId, u32>,
}

impl AircraftConfig {
    pub fn new(aircraft_id: AircraftId) -> Self {
        Self {
            aircraft_id,
            capacity_override: None,
            route_block_times: HashMap::new(),
        }
    }

    /// Block time in minutes for the given route, if on file.
    pub fn block_time(&self, route_id: RouteId) -> Option<u32> {
        self.route_block_times.get(&route_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caravan() -> Aircraft {
        Aircraft {
            id: AircraftId::generate(),
            registration: "9Q-PKP".to_string(),
            ac_type: "C208".to_string(),
            default_capacity: 12,
            base: Some("FBM".to_string()),
            status: AircraftStatus::Active,
        }
    }

    #[test]
    fn test_effective_capacity_defaults_to_fleet_record() {
        let ac = caravan();
        assert_eq!(ac.effective_capacity(None), 12);

        let cfg = AircraftConfig::new(ac.id);
        assert_eq!(ac.effective_capacity(Some(&cfg)), 12);
    }

    #[test]
    fn test_effective_capacity_honors_override() {
        let ac = caravan();
        let mut cfg = AircraftConfig::new(ac.id);
        cfg.capacity_override = Some(9);
        assert_eq!(ac.effective_capacity(Some(&cfg)), 9);
    }

    #[test]
    fn test_block_time_lookup() {
        let ac = caravan();
        let route = RouteId::generate();
        let mut cfg = AircraftConfig::new(ac.id);
        cfg.route_block_times.insert(route, 65);

        assert_eq!(cfg.block_time(route), Some(65));
        assert_eq!(cfg.block_time(RouteId::generate()), None);
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&AircraftStatus::Aog).unwrap();
        assert_eq!(json, "\"aog\"");
    }
}
