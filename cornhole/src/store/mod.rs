//! Entity store abstraction.
//!
//! The bracket logic never touches a concrete storage backend; it asks a
//! [`TournamentStore`] for a tournament handle and works on the locked state.
//! [`InMemoryStore`] keeps everything for the lifetime of the process.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::tournament::{Tournament, TournamentId};

/// Shared, lock-guarded tournament state.
///
/// Holding the guard is what serializes mutations within one tournament.
pub type TournamentHandle = Arc<Mutex<Tournament>>;

/// Trait for tournament storage operations
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Return the tournament for `id`, creating an empty one on first access
    async fn get_or_create(&self, id: &str) -> TournamentHandle;

    /// Return the tournament for `id` if it has been referenced before
    async fn get(&self, id: &str) -> Option<TournamentHandle>;

    /// Ids of all known tournaments
    async fn tournament_ids(&self) -> Vec<TournamentId>;

    /// Number of known tournaments
    async fn tournament_count(&self) -> usize;
}
