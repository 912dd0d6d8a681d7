//! Reference-data repository trait: the record kinds every other component
//! reads but the engine never computes - airports, fleet, routes, charters
//! and per-aircraft configuration.
//!
//! All operations are keyed by the kind's natural key: uuid ids for the
//! list-shaped kinds, the aircraft id for configuration. Deletes are
//! idempotent; removing an absent id is not an error.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    Aircraft, AircraftConfig, AircraftId, Airport, AirportId, Charter, CharterId, Route, RouteId,
};

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn list_airports(&self) -> RepositoryResult<Vec<Airport>>;
    async fn upsert_airport(&self, airport: &Airport) -> RepositoryResult<()>;
    async fn delete_airport(&self, id: AirportId) -> RepositoryResult<()>;

    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>>;
    async fn upsert_aircraft(&self, aircraft: &Aircraft) -> RepositoryResult<()>;
    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<()>;

    async fn list_routes(&self) -> RepositoryResult<Vec<Route>>;
    async fn upsert_route(&self, route: &Route) -> RepositoryResult<()>;
    async fn delete_route(&self, id: RouteId) -> RepositoryResult<()>;

    async fn list_charters(&self) -> RepositoryResult<Vec<Charter>>;
    async fn upsert_charter(&self, charter: &Charter) -> RepositoryResult<()>;
    async fn delete_charter(&self, id: CharterId) -> RepositoryResult<()>;

    /// One configuration record per aircraft id.
    async fn list_aircraft_configs(&self) -> RepositoryResult<Vec<AircraftConfig>>;
    async fn upsert_aircraft_config(&self, config: &AircraftConfig) -> RepositoryResult<()>;
    async fn delete_aircraft_config(&self, aircraft_id: AircraftId) -> RepositoryResult<()>;
}
