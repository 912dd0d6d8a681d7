//! Weekly template repository trait.
//!
//! The template is persisted one weekday at a time: the weekday key is the
//! natural key, the value is that day's ordered slot list.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{TemplateSlot, Weekday};

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn slots_for_day(&self, day: Weekday) -> RepositoryResult<Vec<TemplateSlot>>;

    /// Replace a whole day's slot list.
    async fn upsert_day(&self, day: Weekday, slots: &[TemplateSlot]) -> RepositoryResult<()>;

    /// The full seven-day template. Days with no slots may be absent.
    async fn full_week(&self) -> RepositoryResult<HashMap<Weekday, Vec<TemplateSlot>>>;
}
