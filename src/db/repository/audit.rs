//! Append-only audit log of saved boards.
//!
//! Every board save appends a snapshot here for later offline analysis. The
//! engine never reads the log back; the fetch method exists for tests and
//! offline tooling. Entries are inserted, never updated.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::models::{AircraftAssignment, Board, RouteId};

/// One saved-board snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub date: NaiveDate,
    pub pool: std::collections::HashMap<RouteId, u32>,
    pub assignments: Vec<AircraftAssignment>,
    pub saved_at: DateTime<Utc>,
    /// SHA-256 of the canonical snapshot JSON; identifies identical saves.
    pub checksum: String,
}

impl AuditEntry {
    /// Snapshot a board at save time.
    pub fn for_board(board: &Board, saved_at: DateTime<Utc>) -> Self {
        Self {
            date: board.date,
            pool: board.pool.clone(),
            assignments: board.assignments.clone(),
            saved_at,
            checksum: snapshot_checksum(board),
        }
    }
}

/// Checksum of a board's content, independent of pool map iteration order.
pub fn snapshot_checksum(board: &Board) -> String {
    // Pool keys are sorted so that identical boards always hash identically.
    let ordered_pool: BTreeMap<RouteId, u32> = board.pool.iter().map(|(k, v)| (*k, *v)).collect();
    let canonical = serde_json::json!({
        "date": board.date,
        "pool": ordered_pool,
        "assignments": board.assignments,
    });
    crate::db::checksum::calculate_checksum(&canonical.to_string())
}

#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append one snapshot. Insert-only.
    async fn append_audit_entry(&self, entry: &AuditEntry) -> RepositoryResult<()>;

    /// Snapshots recorded for a date, oldest first. Offline tooling only;
    /// nothing in the engine calls this.
    async fn audit_entries_for(&self, date: NaiveDate) -> RepositoryResult<Vec<AuditEntry>>;
}
