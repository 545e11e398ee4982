//! In-memory tournament store.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use super::{TournamentHandle, TournamentStore};
use crate::tournament::{Tournament, TournamentId};

/// Process-lifetime store keyed by tournament id
#[derive(Default)]
pub struct InMemoryStore {
    tournaments: RwLock<HashMap<TournamentId, TournamentHandle>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TournamentStore for InMemoryStore {
    async fn get_or_create(&self, id: &str) -> TournamentHandle {
        if let Some(handle) = self.tournaments.read().await.get(id) {
            return handle.clone();
        }

        // Another caller may have created it between the two locks.
        let mut tournaments = self.tournaments.write().await;
        tournaments
            .entry(id.to_string())
            .or_insert_with(|| {
                log::info!("Created tournament {}", id);
                Arc::new(Mutex::new(Tournament::new(id)))
            })
            .clone()
    }

    async fn get(&self, id: &str) -> Option<TournamentHandle> {
        self.tournaments.read().await.get(id).cloned()
    }

    async fn tournament_ids(&self) -> Vec<TournamentId> {
        let mut ids: Vec<_> = self.tournaments.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn tournament_count(&self) -> usize {
        self.tournaments.read().await.len()
    }
}
