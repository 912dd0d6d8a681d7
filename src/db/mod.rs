//! Store module for dispatch data.
//!
//! Persistence sits behind the Repository pattern so backends can be swapped
//! without touching the engine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Best-effort load/save adapter contract               │
//! │  - Board lifecycle (lazy create, reconcile, audit)      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - ReferenceRepository / BoardRepository                │
//! │  - TemplateRepository / AuditRepository                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Local Repository │     │ JSON File Repository    │
//! │ (in-memory)      │     │ (data directory)        │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! Application code should go through the service layer; it owns the
//! log-and-swallow policy callers rely on.

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


pub use checksum::calculate_checksum;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::{JsonFileRepository, LocalRepository};
pub use repository::{
    AuditEntry, AuditRepository, BoardRepository, FullRepository, ReferenceRepository,
    RepositoryError, RepositoryResult, TemplateRepository,
};
pub use services::{
    copy_pool_from_previous_day, get_or_create_board, health_check, reconcile, save_board,
    CopyPoolOutcome,
};

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository from a configuration.
///
/// The first initialization wins; later calls are no-ops.
pub fn init_repository(config: &RepositoryConfig) -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }
    let repo = RepositoryFactory::from_config(config)
        .map_err(|e| anyhow::anyhow!("repository init failed: {e}"))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository, defaulting to the in-memory
/// backend when nothing was initialized explicitly.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository(&RepositoryConfig::default());
    }
    REPOSITORY
        .get()
        .context("store not initialized; call init_repository() first")
}
