//! Domain events published after successful bracket mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::models::{MatchId, Score, Slot, TeamId, TournamentId};

/// Default number of buffered events per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Something that happened inside a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketEvent {
    TeamCreated {
        team_id: TeamId,
        name: String,
    },
    PlayerJoined {
        team_id: TeamId,
        player: String,
        roster_size: usize,
    },
    MatchCreated {
        match_id: MatchId,
        round: u32,
        index: u32,
        replaced: bool,
    },
    MatchStarted {
        match_id: MatchId,
    },
    ScoreSubmitted {
        match_id: MatchId,
        score: Score,
        winner_team_id: Option<TeamId>,
    },
    WinnerAdvanced {
        from_match_id: MatchId,
        to_match_id: MatchId,
        slot: Slot,
        team_id: Option<TeamId>,
    },
}

/// Event tagged with its tournament and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub tournament_id: TournamentId,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: BracketEvent,
}

impl EventEnvelope {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Broadcast bus for bracket events.
///
/// Publishing never fails; events sent with no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event for a tournament
    pub fn publish(&self, tournament_id: &str, event: BracketEvent) {
        let envelope = EventEnvelope {
            tournament_id: tournament_id.to_string(),
            occurred_at: Utc::now(),
            event,
        };
        // Err only means nobody is listening.
        let _ = self.sender.send(envelope);
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
