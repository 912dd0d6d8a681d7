//! Board repository trait: per-date dispatch state.
//!
//! Boards are keyed by calendar date, created lazily by callers and never
//! deleted - only upserted. Saves are last-write-wins; there is no version
//! stamp and concurrent writers to the same date race (a documented
//! limitation of the single-desk deployment).

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::Board;

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Cheap probe that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// The board for a date, if one was ever saved.
    async fn fetch_board(&self, date: NaiveDate) -> RepositoryResult<Option<Board>>;

    /// Insert-or-replace the board for its date.
    async fn upsert_board(&self, board: &Board) -> RepositoryResult<()>;

    /// Every date with a saved board, sorted ascending.
    async fn list_board_dates(&self) -> RepositoryResult<Vec<NaiveDate>>;
}
