//! # Cornhole
//!
//! Tournament bracket tracking: teams register into a tournament, matches are
//! scheduled into a bracket, and submitting a match score advances the winner
//! into the linked slot of the follow-up match.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Team registry, bracket engine, events and the [`BracketManager`]
//! - [`store`]: Storage abstraction and the in-memory store
//! - [`config`]: Roster cap and join code settings
//!
//! ## Example
//!
//! ```
//! use cornhole::{BracketConfig, BracketManager, InMemoryStore};
//! use std::sync::Arc;
//!
//! let manager = BracketManager::new(Arc::new(InMemoryStore::new()), BracketConfig::default());
//! assert_eq!(manager.config().roster_cap, 3);
//! ```

/// Bracket configuration.
pub mod config;
pub use config::BracketConfig;

/// Tournament storage.
pub mod store;
pub use store::{InMemoryStore, TournamentHandle, TournamentStore};

/// Teams, matches and bracket progression.
pub mod tournament;
pub use tournament::{BracketError, BracketManager, BracketResult, ErrorKind};
