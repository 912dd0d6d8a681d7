//! JSON-file repository implementation.
//!
//! One JSON document per record kind under a data directory. Volumes are a
//! handful of aircraft and routes, so every operation simply reads the kind's
//! file, applies the change and writes it back; no indexing, no partial
//! writes. This is the durable backend for a desk that has to survive a
//! restart without running a database.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::repository::{
    AuditEntry, AuditRepository, BoardRepository, ReferenceRepository, RepositoryResult,
    TemplateRepository,
};
use crate::models::{
    Aircraft, AircraftConfig, AircraftId, Airport, AirportId, Board, Charter, CharterId, Route,
    RouteId, TemplateSlot, Weekday,
};

const AIRPORTS_FILE: &str = "airports.json";
const AIRCRAFT_FILE: &str = "aircraft.json";
const ROUTES_FILE: &str = "routes.json";
const CHARTERS_FILE: &str = "charters.json";
const CONFIGS_FILE: &str = "aircraft_config.json";
const BOARDS_FILE: &str = "boards.json";
const WEEKLY_FILE: &str = "weekly.json";
const AUDIT_FILE: &str = "audit_log.json";

/// File-backed repository rooted at a data directory.
#[derive(Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    /// Open (creating if needed) a data directory.
    pub fn new(root: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    fn read_kind<T: DeserializeOwned + Default>(&self, file: &str) -> RepositoryResult<T> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_kind<T: Serialize>(&self, file: &str, value: &T) -> RepositoryResult<()> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.root.join(file), content)?;
        Ok(())
    }

    fn upsert_by_key<T, K, F>(&self, file: &str, record: &T, key_of: F) -> RepositoryResult<()>
    where
        T: Serialize + DeserializeOwned + Clone,
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let mut list: Vec<T> = self.read_kind(file)?;
        match list.iter_mut().find(|r| key_of(r) == key_of(record)) {
            Some(existing) => *existing = record.clone(),
            None => list.push(record.clone()),
        }
        self.write_kind(file, &list)
    }

    fn delete_by_key<T, K, F>(&self, file: &str, key: K, key_of: F) -> RepositoryResult<()>
    where
        T: Serialize + DeserializeOwned,
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let mut list: Vec<T> = self.read_kind(file)?;
        let before = list.len();
        list.retain(|r| key_of(r) != key);
        if list.len() != before {
            self.write_kind(file, &list)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReferenceRepository for JsonFileRepository {
    async fn list_airports(&self) -> RepositoryResult<Vec<Airport>> {
        self.read_kind(AIRPORTS_FILE)
    }

    async fn upsert_airport(&self, airport: &Airport) -> RepositoryResult<()> {
        self.upsert_by_key(AIRPORTS_FILE, airport, |a: &Airport| a.id)
    }

    async fn delete_airport(&self, id: AirportId) -> RepositoryResult<()> {
        self.delete_by_key(AIRPORTS_FILE, id, |a: &Airport| a.id)
    }

    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>> {
        self.read_kind(AIRCRAFT_FILE)
    }

    async fn upsert_aircraft(&self, aircraft: &Aircraft) -> RepositoryResult<()> {
        self.upsert_by_key(AIRCRAFT_FILE, aircraft, |a: &Aircraft| a.id)
    }

    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<()> {
        self.delete_by_key(AIRCRAFT_FILE, id, |a: &Aircraft| a.id)
    }

    async fn list_routes(&self) -> RepositoryResult<Vec<Route>> {
        self.read_kind(ROUTES_FILE)
    }

    async fn upsert_route(&self, route: &Route) -> RepositoryResult<()> {
        self.upsert_by_key(ROUTES_FILE, route, |r: &Route| r.id)
    }

    async fn delete_route(&self, id: RouteId) -> RepositoryResult<()> {
        self.delete_by_key(ROUTES_FILE, id, |r: &Route| r.id)
    }

    async fn list_charters(&self) -> RepositoryResult<Vec<Charter>> {
        self.read_kind(CHARTERS_FILE)
    }

    async fn upsert_charter(&self, charter: &Charter) -> RepositoryResult<()> {
        self.upsert_by_key(CHARTERS_FILE, charter, |c: &Charter| c.id)
    }

    async fn delete_charter(&self, id: CharterId) -> RepositoryResult<()> {
        self.delete_by_key(CHARTERS_FILE, id, |c: &Charter| c.id)
    }

    async fn list_aircraft_configs(&self) -> RepositoryResult<Vec<AircraftConfig>> {
        self.read_kind(CONFIGS_FILE)
    }

    async fn upsert_aircraft_config(&self, config: &AircraftConfig) -> RepositoryResult<()> {
        self.upsert_by_key(CONFIGS_FILE, config, |c: &AircraftConfig| c.aircraft_id)
    }

    async fn delete_aircraft_config(&self, aircraft_id: AircraftId) -> RepositoryResult<()> {
        self.delete_by_key(CONFIGS_FILE, aircraft_id, |c: &AircraftConfig| c.aircraft_id)
    }
}

#[async_trait]
impl BoardRepository for JsonFileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn fetch_board(&self, date: NaiveDate) -> RepositoryResult<Option<Board>> {
        let boards: Vec<Board> = self.read_kind(BOARDS_FILE)?;
        Ok(boards.into_iter().find(|b| b.date == date))
    }

    async fn upsert_board(&self, board: &Board) -> RepositoryResult<()> {
        self.upsert_by_key(BOARDS_FILE, board, |b: &Board| b.date)
    }

    async fn list_board_dates(&self) -> RepositoryResult<Vec<NaiveDate>> {
        let boards: Vec<Board> = self.read_kind(BOARDS_FILE)?;
        let mut dates: Vec<NaiveDate> = boards.iter().map(|b| b.date).collect();
        dates.sort();
        Ok(dates)
    }
}

#[async_trait]
impl TemplateRepository for JsonFileRepository {
    async fn slots_for_day(&self, day: Weekday) -> RepositoryResult<Vec<TemplateSlot>> {
        let week: HashMap<Weekday, Vec<TemplateSlot>> = self.read_kind(WEEKLY_FILE)?;
        Ok(week.get(&day).cloned().unwrap_or_default())
    }

    async fn upsert_day(&self, day: Weekday, slots: &[TemplateSlot]) -> RepositoryResult<()> {
        let mut week: HashMap<Weekday, Vec<TemplateSlot>> = self.read_kind(WEEKLY_FILE)?;
        week.insert(day, slots.to_vec());
        self.write_kind(WEEKLY_FILE, &week)
    }

    async fn full_week(&self) -> RepositoryResult<HashMap<Weekday, Vec<TemplateSlot>>> {
        self.read_kind(WEEKLY_FILE)
    }
}

#[async_trait]
impl AuditRepository for JsonFileRepository {
    async fn append_audit_entry(&self, entry: &AuditEntry) -> RepositoryResult<()> {
        let mut log: Vec<AuditEntry> = self.read_kind(AUDIT_FILE)?;
        log.push(entry.clone());
        self.write_kind(AUDIT_FILE, &log)
    }

    async fn audit_entries_for(&self, date: NaiveDate) -> RepositoryResult<Vec<AuditEntry>> {
        let log: Vec<AuditEntry> = self.read_kind(AUDIT_FILE)?;
        Ok(log.into_iter().filter(|e| e.date == date).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn repo() -> (TempDir, JsonFileRepository) {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path()).unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let (_dir, repo) = repo();
        assert!(repo.list_airports().await.unwrap().is_empty());
        assert!(repo.list_board_dates().await.unwrap().is_empty());
        assert!(repo.full_week().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reference_round_trip_through_disk() {
        let (dir, repo) = repo();
        let airport = Airport::new("FBM", "Lubumbashi Intl", "DRC");
        repo.upsert_airport(&airport).await.unwrap();

        // A second handle over the same directory sees the record.
        let reopened = JsonFileRepository::new(dir.path()).unwrap();
        let listed = reopened.list_airports().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].code, "FBM");
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_key() {
        let (_dir, repo) = repo();
        let mut airport = Airport::new("FBM", "Lubumbashi", "DRC");
        repo.upsert_airport(&airport).await.unwrap();
        airport.name = "Lubumbashi Intl".to_string();
        repo.upsert_airport(&airport).await.unwrap();

        let listed = repo.list_airports().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Lubumbashi Intl");
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_ok() {
        let (_dir, repo) = repo();
        repo.delete_route(RouteId::generate()).await.unwrap();
    }

    #[tokio::test]
    async fn test_board_round_trip() {
        let (_dir, repo) = repo();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut board = Board::new(date);
        board.set_pool(RouteId::generate(), 20);
        repo.upsert_board(&board).await.unwrap();

        let back = repo.fetch_board(date).await.unwrap().unwrap();
        assert_eq!(back.pool, board.pool);
        assert!(repo
            .fetch_board(date.succ_opt().unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_weekly_round_trip() {
        let (_dir, repo) = repo();
        let slot = TemplateSlot::new(RouteId::generate(), "07:15".parse().unwrap());
        repo.upsert_day(Weekday::Fri, std::slice::from_ref(&slot))
            .await
            .unwrap();

        let slots = repo.slots_for_day(Weekday::Fri).await.unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].dep_time.to_string(), "07:15");
    }

    #[tokio::test]
    async fn test_audit_appends_survive_reopen() {
        let (dir, repo) = repo();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let board = Board::new(date);
        repo.append_audit_entry(&AuditEntry::for_board(&board, Utc::now()))
            .await
            .unwrap();
        repo.append_audit_entry(&AuditEntry::for_board(&board, Utc::now()))
            .await
            .unwrap();

        let reopened = JsonFileRepository::new(dir.path()).unwrap();
        assert_eq!(reopened.audit_entries_for(date).await.unwrap().len(), 2);
    }
}
