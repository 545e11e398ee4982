//! Tournament module: team registry, bracket engine and event publishing.
//!
//! This module provides:
//! - Team registration with generated ids and join codes
//! - Roster joins capped at a configured size
//! - Match creation with team reference checks
//! - Score submission that finalizes a match and advances its winner
//!   into the linked slot of the next match
//! - Bracket and now/next views
//!
//! ## Example
//!
//! ```no_run
//! use cornhole::config::BracketConfig;
//! use cornhole::store::InMemoryStore;
//! use cornhole::tournament::{BracketManager, NewMatch, Player, Slot};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mgr = BracketManager::new(Arc::new(InMemoryStore::new()), BracketConfig::default());
//!
//!     let players = vec![Player::new("A"), Player::new("B")];
//!     let bandits = mgr.create_team("spring", "Bag Bandits".into(), players.clone(), None).await;
//!     let stars = mgr.create_team("spring", "Corn Stars".into(), players, None).await;
//!
//!     mgr.create_match("spring", NewMatch::new("m2", 2, 0)).await?;
//!     mgr.create_match(
//!         "spring",
//!         NewMatch::new("m1", 1, 0)
//!             .with_teams(Some(bandits.team_id), Some(stars.team_id))
//!             .with_next("m2", Slot::A),
//!     )
//!     .await?;
//!
//!     let outcome = mgr.submit_score("spring", "m1", 21, 15).await?;
//!     println!("Winner: {:?}", outcome.winner_team_id);
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod errors;
pub mod events;
pub mod manager;
pub mod models;
pub mod registry;

pub use errors::{BracketError, BracketResult, ErrorKind};
pub use events::{BracketEvent, EventBus, EventEnvelope};
pub use manager::BracketManager;
pub use models::{
    Advancement, BracketRound, Match, MatchId, MatchStatus, NewMatch, NextMatch, NowNext, Player,
    ScheduleEntry, Score, ScoreOutcome, Slot, Team, TeamCreated, TeamId, Tournament, TournamentId,
};
