//! Bracket error types.

use super::models::{MatchId, MatchStatus, Slot};
use thiserror::Error;

/// Error category, used by transports to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced team, match or join code does not exist
    NotFound,
    /// Well-formed but rejected request
    InvalidInput,
    /// Operation not allowed in the entity's current state
    InvalidState,
    /// Roster is full
    CapacityExceeded,
}

/// Bracket errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    /// Team referenced by a match slot does not exist
    #[error("team{slot} not found")]
    TeamNotFound { slot: Slot, team_id: String },

    /// Match not found
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    /// No team uses this join code
    #[error("team code not found")]
    JoinCodeNotFound,

    /// Tied or negative score
    #[error("invalid score: {a}-{b}")]
    InvalidScore { a: i64, b: i64 },

    /// Match already final
    #[error("match not in scorable state: {status}")]
    NotScorable { status: MatchStatus },

    /// Only scheduled matches can be started
    #[error("match cannot be started from state: {status}")]
    NotStartable { status: MatchStatus },

    /// Roster at capacity
    #[error("team is full: roster cap is {cap}")]
    RosterFull { cap: usize },
}

impl BracketError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::TeamNotFound { .. }
            | BracketError::MatchNotFound(_)
            | BracketError::JoinCodeNotFound => ErrorKind::NotFound,
            BracketError::InvalidScore { .. } => ErrorKind::InvalidInput,
            BracketError::NotScorable { .. } | BracketError::NotStartable { .. } => {
                ErrorKind::InvalidState
            }
            BracketError::RosterFull { .. } => ErrorKind::CapacityExceeded,
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
