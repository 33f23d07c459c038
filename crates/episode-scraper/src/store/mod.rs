//! Episode persistence
//!
//! The bot talks to storage only through [`EpisodeStore`]. Two backends ship
//! with the crate:
//! - [`SqliteEpisodeStore`]: durable, backed by rusqlite
//! - [`MemoryEpisodeStore`]: process-local, for tests and dry runs

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Episode, EpisodeKey};

pub use memory::MemoryEpisodeStore;
pub use sqlite::SqliteEpisodeStore;

/// Episode repository.
///
/// Lookups go by [`EpisodeKey`], the same projection `Episode` uses for
/// equality, so "already stored" and "equal" always agree.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    /// Find a stored episode with the given title and date.
    async fn find_by_identity(&self, key: &EpisodeKey) -> Result<Option<Episode>>;

    /// Durably store a new episode and return it as stored.
    async fn save(&self, episode: &Episode) -> Result<Episode>;
}
