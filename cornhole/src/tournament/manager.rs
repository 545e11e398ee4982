//! Bracket manager: the async entry point for every tournament operation.

use std::sync::Arc;

use log::{debug, info};

use super::engine;
use super::errors::BracketResult;
use super::events::{BracketEvent, EventBus, EventEnvelope};
use super::models::{
    BracketRound, Match, NewMatch, NowNext, Player, ScheduleEntry, ScoreOutcome, Team,
    TeamCreated, TournamentId,
};
use super::registry;
use crate::config::BracketConfig;
use crate::store::TournamentStore;
use tokio::sync::broadcast;

/// Bracket manager
///
/// Each call locks the target tournament for its whole duration, runs the
/// registry or engine logic against it, and publishes events before the lock
/// is released, so subscribers see events in mutation order.
#[derive(Clone)]
pub struct BracketManager {
    store: Arc<dyn TournamentStore>,
    config: BracketConfig,
    events: EventBus,
}

impl BracketManager {
    /// Create a new bracket manager
    ///
    /// # Arguments
    ///
    /// * `store` - Tournament storage
    /// * `config` - Roster cap and join code settings
    pub fn new(store: Arc<dyn TournamentStore>, config: BracketConfig) -> Self {
        Self::with_event_bus(store, config, EventBus::default())
    }

    /// Create a bracket manager publishing to an existing event bus
    pub fn with_event_bus(
        store: Arc<dyn TournamentStore>,
        config: BracketConfig,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            config,
            events,
        }
    }

    pub fn config(&self) -> &BracketConfig {
        &self.config
    }

    /// Subscribe to events from every tournament
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Number of tournaments referenced so far
    pub async fn tournament_count(&self) -> usize {
        self.store.tournament_count().await
    }

    /// Ids of tournaments referenced so far
    pub async fn tournament_ids(&self) -> Vec<TournamentId> {
        self.store.tournament_ids().await
    }

    /// Register a team
    ///
    /// # Returns
    ///
    /// * `TeamCreated` - Generated team id and join code
    pub async fn create_team(
        &self,
        tournament_id: &str,
        name: String,
        players: Vec<Player>,
        captain_contact: Option<String>,
    ) -> TeamCreated {
        let handle = self.store.get_or_create(tournament_id).await;
        let mut tournament = handle.lock().await;
        let created = registry::create_team(
            &mut tournament,
            &self.config,
            name.clone(),
            players,
            captain_contact,
        );

        info!(
            "Tournament {}: created team '{}' ({})",
            tournament_id, name, created.team_id
        );
        self.events.publish(
            tournament_id,
            BracketEvent::TeamCreated {
                team_id: created.team_id.clone(),
                name,
            },
        );

        created
    }

    /// List teams in creation order
    pub async fn list_teams(&self, tournament_id: &str) -> Vec<Team> {
        let handle = self.store.get_or_create(tournament_id).await;
        let tournament = handle.lock().await;
        registry::list_teams(&tournament)
    }

    /// Add a player to a team by join code
    ///
    /// # Errors
    ///
    /// * `BracketError::JoinCodeNotFound` - No team has this code
    /// * `BracketError::RosterFull` - Roster already at the configured cap
    pub async fn join_team(
        &self,
        tournament_id: &str,
        join_code: &str,
        player_name: String,
    ) -> BracketResult<()> {
        let handle = self.store.get_or_create(tournament_id).await;
        let mut tournament = handle.lock().await;
        let team_id =
            registry::join_team(&mut tournament, &self.config, join_code, player_name.clone())?;
        let roster_size = tournament
            .team(&team_id)
            .map(|t| t.players.len())
            .unwrap_or_default();

        info!(
            "Tournament {}: '{}' joined team {} ({}/{})",
            tournament_id, player_name, team_id, roster_size, self.config.roster_cap
        );
        self.events.publish(
            tournament_id,
            BracketEvent::PlayerJoined {
                team_id,
                player: player_name,
                roster_size,
            },
        );

        Ok(())
    }

    /// Create or overwrite a match
    ///
    /// # Errors
    ///
    /// * `BracketError::TeamNotFound` - A team slot references an unknown team
    pub async fn create_match(&self, tournament_id: &str, new: NewMatch) -> BracketResult<Match> {
        let handle = self.store.get_or_create(tournament_id).await;
        let mut tournament = handle.lock().await;
        let (m, replaced) = engine::create_match(&mut tournament, new)?;

        if replaced {
            info!("Tournament {}: overwrote match {}", tournament_id, m.match_id);
        } else {
            info!(
                "Tournament {}: created match {} (round {}, index {})",
                tournament_id, m.match_id, m.round, m.index
            );
        }
        self.events.publish(
            tournament_id,
            BracketEvent::MatchCreated {
                match_id: m.match_id.clone(),
                round: m.round,
                index: m.index,
                replaced,
            },
        );

        Ok(m)
    }

    /// List matches in creation order
    pub async fn list_matches(&self, tournament_id: &str) -> Vec<Match> {
        let handle = self.store.get_or_create(tournament_id).await;
        let tournament = handle.lock().await;
        engine::list_matches(&tournament)
    }

    /// Mark a scheduled match as being played
    ///
    /// # Errors
    ///
    /// * `BracketError::MatchNotFound` - Unknown match
    /// * `BracketError::NotStartable` - Match is not scheduled
    pub async fn start_match(&self, tournament_id: &str, match_id: &str) -> BracketResult<Match> {
        let handle = self.store.get_or_create(tournament_id).await;
        let mut tournament = handle.lock().await;
        let m = engine::start_match(&mut tournament, match_id)?;

        info!("Tournament {}: match {} started", tournament_id, match_id);
        self.events.publish(
            tournament_id,
            BracketEvent::MatchStarted {
                match_id: match_id.to_string(),
            },
        );

        Ok(m)
    }

    /// Submit a final score and advance the winner
    ///
    /// # Errors
    ///
    /// * `BracketError::MatchNotFound` - Unknown match
    /// * `BracketError::NotScorable` - Match already final
    /// * `BracketError::InvalidScore` - Tied or negative score
    pub async fn submit_score(
        &self,
        tournament_id: &str,
        match_id: &str,
        a: i64,
        b: i64,
    ) -> BracketResult<ScoreOutcome> {
        let handle = self.store.get_or_create(tournament_id).await;
        let mut tournament = handle.lock().await;
        let outcome = engine::submit_score(&mut tournament, match_id, a, b)?;

        info!(
            "Tournament {}: match {} final {}-{}, winner {:?}",
            tournament_id, match_id, a, b, outcome.winner_team_id
        );
        self.events.publish(
            tournament_id,
            BracketEvent::ScoreSubmitted {
                match_id: match_id.to_string(),
                score: outcome.score,
                winner_team_id: outcome.winner_team_id.clone(),
            },
        );

        let next = tournament.get_match(match_id).and_then(|m| m.next.as_ref());
        match (&outcome.advanced, next) {
            (Some(advanced), _) => {
                info!(
                    "Tournament {}: advanced {:?} into match {} slot {}",
                    tournament_id, outcome.winner_team_id, advanced.match_id, advanced.slot
                );
                self.events.publish(
                    tournament_id,
                    BracketEvent::WinnerAdvanced {
                        from_match_id: match_id.to_string(),
                        to_match_id: advanced.match_id.clone(),
                        slot: advanced.slot,
                        team_id: outcome.winner_team_id.clone(),
                    },
                );
            }
            (None, Some(next)) => debug!(
                "Tournament {}: next match {} of {} does not exist, skipping advancement",
                tournament_id, next.match_id, match_id
            ),
            (None, None) => {}
        }

        Ok(outcome)
    }

    /// Matches grouped by round
    pub async fn bracket(&self, tournament_id: &str) -> Vec<BracketRound> {
        let handle = self.store.get_or_create(tournament_id).await;
        let tournament = handle.lock().await;
        engine::bracket(&tournament)
    }

    /// Court and start time of every match
    pub async fn schedule(&self, tournament_id: &str) -> Vec<ScheduleEntry> {
        let handle = self.store.get_or_create(tournament_id).await;
        let tournament = handle.lock().await;
        engine::schedule(&tournament)
    }

    /// Live and upcoming matches
    pub async fn now_next(&self, tournament_id: &str) -> NowNext {
        let handle = self.store.get_or_create(tournament_id).await;
        let tournament = handle.lock().await;
        engine::now_next(&tournament)
    }
}
