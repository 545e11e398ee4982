//! Tournament data models: teams, players, matches and the per-tournament container.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tournament ID type (opaque, caller supplied)
pub type TournamentId = String;

/// Team ID type (generated)
pub type TeamId = String;

/// Match ID type (caller supplied)
pub type MatchId = String;

/// Roster member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Player {
    /// Create a player with no contact details
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: None,
        }
    }

    /// Attach contact details
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

/// Registered team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
    pub captain_contact: Option<String>,
    pub join_code: String,
}

/// Identifiers handed back when a team is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCreated {
    pub team_id: TeamId,
    pub join_code: String,
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Created, not yet started
    Scheduled,
    /// Live
    Playing,
    /// Scored. Terminal.
    Final,
}

impl MatchStatus {
    /// Whether a score may still be submitted
    pub fn is_scorable(self) -> bool {
        matches!(self, MatchStatus::Scheduled | MatchStatus::Playing)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Playing => write!(f, "playing"),
            MatchStatus::Final => write!(f, "final"),
        }
    }
}

/// Team slot within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::A => write!(f, "A"),
            Slot::B => write!(f, "B"),
        }
    }
}

impl std::str::FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Slot::A),
            "B" | "b" => Ok(Slot::B),
            other => Err(format!("unknown slot '{other}'")),
        }
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub a: i64,
    pub b: i64,
}

impl Score {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// A score is decisive when both sides are non-negative and not tied
    pub fn is_decisive(&self) -> bool {
        self.a >= 0 && self.b >= 0 && self.a != self.b
    }

    /// Slot holding the higher score
    pub fn winning_slot(&self) -> Slot {
        if self.a > self.b { Slot::A } else { Slot::B }
    }
}

/// Link from a match to the slot its winner fills in a successor match.
///
/// Held by id only; the target is looked up when the winner is propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMatch {
    pub match_id: MatchId,
    pub slot: Slot,
}

impl NextMatch {
    pub fn new(match_id: impl Into<MatchId>, slot: Slot) -> Self {
        Self {
            match_id: match_id.into(),
            slot,
        }
    }
}

/// Bracket match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    pub round: u32,
    pub index: u32,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub status: MatchStatus,
    pub score: Score,
    pub winner_team_id: Option<TeamId>,
    pub next: Option<NextMatch>,
    /// Court the match is assigned to
    #[serde(default)]
    pub court: Option<String>,
    /// Planned start, free-form (e.g. "10:30")
    #[serde(default)]
    pub start_slot: Option<String>,
}

impl Match {
    /// Team reference held in a slot
    pub fn team_in(&self, slot: Slot) -> Option<&TeamId> {
        match slot {
            Slot::A => self.team_a.as_ref(),
            Slot::B => self.team_b.as_ref(),
        }
    }

    /// Overwrite the team reference held in a slot
    pub fn set_team(&mut self, slot: Slot, team_id: Option<TeamId>) {
        match slot {
            Slot::A => self.team_a = team_id,
            Slot::B => self.team_b = team_id,
        }
    }

    /// Both slots are filled
    pub fn is_ready(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }
}

/// Match creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub match_id: MatchId,
    pub round: u32,
    pub index: u32,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub next: Option<NextMatch>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub start_slot: Option<String>,
}

impl NewMatch {
    /// Match with no teams and no successor
    pub fn new(match_id: impl Into<MatchId>, round: u32, index: u32) -> Self {
        Self {
            match_id: match_id.into(),
            round,
            index,
            team_a: None,
            team_b: None,
            next: None,
            court: None,
            start_slot: None,
        }
    }

    pub fn with_teams(mut self, team_a: Option<TeamId>, team_b: Option<TeamId>) -> Self {
        self.team_a = team_a;
        self.team_b = team_b;
        self
    }

    pub fn with_next(mut self, match_id: impl Into<MatchId>, slot: Slot) -> Self {
        self.next = Some(NextMatch::new(match_id, slot));
        self
    }

    /// Court and planned start time
    pub fn with_schedule(mut self, court: Option<String>, start_slot: Option<String>) -> Self {
        self.court = court;
        self.start_slot = start_slot;
        self
    }
}

/// Where a winner was written after a score was submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    pub match_id: MatchId,
    pub slot: Slot,
}

/// Result of a score submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub match_id: MatchId,
    pub score: Score,
    pub winner_team_id: Option<TeamId>,
    /// None when the match has no successor or the successor does not exist
    pub advanced: Option<Advancement>,
}

/// One round of the bracket view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRound {
    pub round: u32,
    pub matches: Vec<Match>,
}

/// Where and when a match is played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub match_id: MatchId,
    pub round: u32,
    pub index: u32,
    pub court: Option<String>,
    pub start_slot: Option<String>,
    pub status: MatchStatus,
}

impl From<&Match> for ScheduleEntry {
    fn from(m: &Match) -> Self {
        Self {
            match_id: m.match_id.clone(),
            round: m.round,
            index: m.index,
            court: m.court.clone(),
            start_slot: m.start_slot.clone(),
            status: m.status,
        }
    }
}

/// Live and upcoming matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowNext {
    pub now: Vec<Match>,
    pub next: Vec<Match>,
}

/// Per-tournament entity container.
///
/// Teams and matches are kept in insertion order with an id index on the side.
#[derive(Debug, Clone, Default)]
pub struct Tournament {
    id: TournamentId,
    teams: Vec<Team>,
    team_index: HashMap<TeamId, usize>,
    matches: Vec<Match>,
    match_index: HashMap<MatchId, usize>,
}

impl Tournament {
    /// Create an empty tournament
    pub fn new(id: impl Into<TournamentId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.team_index.get(team_id).map(|&i| &self.teams[i])
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.team_index.contains_key(team_id)
    }

    pub fn team_by_join_code_mut(&mut self, join_code: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.join_code == join_code)
    }

    pub fn has_join_code(&self, join_code: &str) -> bool {
        self.teams.iter().any(|t| t.join_code == join_code)
    }

    /// Append a team. Ids are generated unique by the registry.
    pub fn insert_team(&mut self, team: Team) {
        self.team_index.insert(team.team_id.clone(), self.teams.len());
        self.teams.push(team);
    }

    pub fn get_match(&self, match_id: &str) -> Option<&Match> {
        self.match_index.get(match_id).map(|&i| &self.matches[i])
    }

    pub fn get_match_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        match self.match_index.get(match_id) {
            Some(&i) => Some(&mut self.matches[i]),
            None => None,
        }
    }

    /// Insert a match, replacing any match with the same id in place.
    ///
    /// Returns true when an existing match was replaced.
    pub fn upsert_match(&mut self, m: Match) -> bool {
        match self.match_index.get(&m.match_id) {
            Some(&i) => {
                self.matches[i] = m;
                true
            }
            None => {
                self.match_index.insert(m.match_id.clone(), self.matches.len());
                self.matches.push(m);
                false
            }
        }
    }
}
