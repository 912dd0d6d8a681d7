//! In-memory repository implementation.
//!
//! Stores every record kind in HashMaps behind a single `RwLock`, which is
//! all a one-desk dispatch session needs: fast, deterministic and isolated.
//! It doubles as the unit-test backend; `set_healthy` simulates a store
//! outage so the log-and-swallow adapter paths can be exercised.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::repository::{
    AuditEntry, AuditRepository, BoardRepository, ReferenceRepository, RepositoryError,
    RepositoryResult, TemplateRepository,
};
use crate::models::{
    Aircraft, AircraftConfig, AircraftId, Airport, AirportId, Board, Charter, CharterId, Route,
    RouteId, TemplateSlot, Weekday,
};

/// In-memory backend.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    airports: HashMap<AirportId, Airport>,
    aircraft: HashMap<AircraftId, Aircraft>,
    routes: HashMap<RouteId, Route>,
    charters: HashMap<CharterId, Charter>,
    configs: HashMap<AircraftId, AircraftConfig>,
    boards: HashMap<NaiveDate, Board>,
    weekly: HashMap<Weekday, Vec<TemplateSlot>>,
    audit_log: Vec<AuditEntry>,
    unhealthy: bool,
}

impl LocalRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Toggle simulated store failure for tests.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().unhealthy = !healthy;
    }

    /// Drop every record, keeping the health setting.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let unhealthy = data.unhealthy;
        *data = LocalData {
            unhealthy,
            ..Default::default()
        };
    }

    /// Number of saved boards.
    pub fn board_count(&self) -> usize {
        self.data.read().unwrap().boards.len()
    }

    /// Number of audit snapshots across all dates.
    pub fn audit_len(&self) -> usize {
        self.data.read().unwrap().audit_log.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if self.data.read().unwrap().unhealthy {
            return Err(RepositoryError::Unavailable(
                "in-memory store marked unhealthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceRepository for LocalRepository {
    async fn list_airports(&self) -> RepositoryResult<Vec<Airport>> {
        self.check_health()?;
        let mut list: Vec<Airport> = self.data.read().unwrap().airports.values().cloned().collect();
        list.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(list)
    }

    async fn upsert_airport(&self, airport: &Airport) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .airports
            .insert(airport.id, airport.clone());
        Ok(())
    }

    async fn delete_airport(&self, id: AirportId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().airports.remove(&id);
        Ok(())
    }

    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>> {
        self.check_health()?;
        let mut list: Vec<Aircraft> = self.data.read().unwrap().aircraft.values().cloned().collect();
        // Registration order keeps first-match template decisions stable.
        list.sort_by(|a, b| a.registration.cmp(&b.registration));
        Ok(list)
    }

    async fn upsert_aircraft(&self, aircraft: &Aircraft) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .aircraft
            .insert(aircraft.id, aircraft.clone());
        Ok(())
    }

    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().aircraft.remove(&id);
        Ok(())
    }

    async fn list_routes(&self) -> RepositoryResult<Vec<Route>> {
        self.check_health()?;
        let mut list: Vec<Route> = self.data.read().unwrap().routes.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn upsert_route(&self, route: &Route) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .routes
            .insert(route.id, route.clone());
        Ok(())
    }

    async fn delete_route(&self, id: RouteId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().routes.remove(&id);
        Ok(())
    }

    async fn list_charters(&self) -> RepositoryResult<Vec<Charter>> {
        self.check_health()?;
        let mut list: Vec<Charter> = self.data.read().unwrap().charters.values().cloned().collect();
        list.sort_by_key(|c| c.date);
        Ok(list)
    }

    async fn upsert_charter(&self, charter: &Charter) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .charters
            .insert(charter.id, charter.clone());
        Ok(())
    }

    async fn delete_charter(&self, id: CharterId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().charters.remove(&id);
        Ok(())
    }

    async fn list_aircraft_configs(&self) -> RepositoryResult<Vec<AircraftConfig>> {
        self.check_health()?;
        Ok(self.data.read().unwrap().configs.values().cloned().collect())
    }

    async fn upsert_aircraft_config(&self, config: &AircraftConfig) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .configs
            .insert(config.aircraft_id, config.clone());
        Ok(())
    }

    async fn delete_aircraft_config(&self, aircraft_id: AircraftId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().configs.remove(&aircraft_id);
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.data.read().unwrap().unhealthy)
    }

    async fn fetch_board(&self, date: NaiveDate) -> RepositoryResult<Option<Board>> {
        self.check_health()?;
        Ok(self.data.read().unwrap().boards.get(&date).cloned())
    }

    async fn upsert_board(&self, board: &Board) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .unwrap()
            .boards
            .insert(board.date, board.clone());
        Ok(())
    }

    async fn list_board_dates(&self) -> RepositoryResult<Vec<NaiveDate>> {
        self.check_health()?;
        let mut dates: Vec<NaiveDate> = self.data.read().unwrap().boards.keys().copied().collect();
        dates.sort();
        Ok(dates)
    }
}

#[async_trait]
impl TemplateRepository for LocalRepository {
    async fn slots_for_day(&self, day: Weekday) -> RepositoryResult<Vec<TemplateSlot>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .unwrap()
            .weekly
            .get(&day)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_day(&self, day: Weekday, slots: &[TemplateSlot]) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().weekly.insert(day, slots.to_vec());
        Ok(())
    }

    async fn full_week(&self) -> RepositoryResult<HashMap<Weekday, Vec<TemplateSlot>>> {
        self.check_health()?;
        Ok(self.data.read().unwrap().weekly.clone())
    }
}

#[async_trait]
impl AuditRepository for LocalRepository {
    async fn append_audit_entry(&self, entry: &AuditEntry) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().unwrap().audit_log.push(entry.clone());
        Ok(())
    }

    async fn audit_entries_for(&self, date: NaiveDate) -> RepositoryResult<Vec<AuditEntry>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .unwrap()
            .audit_log
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_board(date: NaiveDate) -> Board {
        let mut board = Board::new(date);
        board.set_pool(RouteId::generate(), 20);
        board
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_board_upsert_and_fetch() {
        let repo = LocalRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        assert!(repo.fetch_board(date).await.unwrap().is_none());

        let board = sample_board(date);
        repo.upsert_board(&board).await.unwrap();
        let back = repo.fetch_board(date).await.unwrap().unwrap();
        assert_eq!(back.pool, board.pool);
        assert_eq!(repo.board_count(), 1);
    }

    #[tokio::test]
    async fn test_board_dates_sorted() {
        let repo = LocalRepository::new();
        let d1 = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        repo.upsert_board(&sample_board(d1)).await.unwrap();
        repo.upsert_board(&sample_board(d2)).await.unwrap();

        assert_eq!(repo.list_board_dates().await.unwrap(), vec![d2, d1]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = LocalRepository::new();
        let airport = Airport::new("FBM", "Lubumbashi Intl", "DRC");
        repo.upsert_airport(&airport).await.unwrap();
        repo.delete_airport(airport.id).await.unwrap();
        // Absent id is not an error.
        repo.delete_airport(airport.id).await.unwrap();
        assert!(repo.list_airports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aircraft_listed_by_registration() {
        let repo = LocalRepository::new();
        for reg in ["9Q-PKQ", "9Q-PKA", "9Q-PKZ"] {
            let ac = Aircraft {
                id: AircraftId::generate(),
                registration: reg.to_string(),
                ac_type: "C208".to_string(),
                default_capacity: 12,
                base: None,
                status: Default::default(),
            };
            repo.upsert_aircraft(&ac).await.unwrap();
        }
        let regs: Vec<String> = repo
            .list_aircraft()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.registration)
            .collect();
        assert_eq!(regs, vec!["9Q-PKA", "9Q-PKQ", "9Q-PKZ"]);
    }

    #[tokio::test]
    async fn test_unhealthy_store_fails_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let err = repo.list_routes().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_weekly_day_round_trip() {
        let repo = LocalRepository::new();
        let slot = TemplateSlot::new(RouteId::generate(), "08:00".parse().unwrap());
        repo.upsert_day(Weekday::Mon, std::slice::from_ref(&slot))
            .await
            .unwrap();

        let slots = repo.slots_for_day(Weekday::Mon).await.unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, slot.id);
        assert!(repo.slots_for_day(Weekday::Tue).await.unwrap().is_empty());

        let week = repo.full_week().await.unwrap();
        assert_eq!(week.len(), 1);
    }

    #[tokio::test]
    async fn test_audit_is_append_only_per_date() {
        let repo = LocalRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let board = sample_board(date);

        repo.append_audit_entry(&AuditEntry::for_board(&board, Utc::now()))
            .await
            .unwrap();
        repo.append_audit_entry(&AuditEntry::for_board(&board, Utc::now()))
            .await
            .unwrap();

        assert_eq!(repo.audit_len(), 2);
        let entries = repo.audit_entries_for(date).await.unwrap();
        assert_eq!(entries.len(), 2);
        // Identical snapshots hash identically.
        assert_eq!(entries[0].checksum, entries[1].checksum);
    }

    #[tokio::test]
    async fn test_clear_keeps_health_setting() {
        let repo = LocalRepository::new();
        repo.upsert_board(&sample_board(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()))
            .await
            .unwrap();
        repo.set_healthy(false);
        repo.clear();
        assert_eq!(repo.board_count(), 0);
        assert!(!repo.health_check().await.unwrap());
    }
}
