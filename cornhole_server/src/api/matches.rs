//! Match scheduling and scoring API handlers.
//!
//! # Examples
//!
//! Schedule a first-round match feeding slot A of `m2`:
//! ```bash
//! curl -X POST http://localhost:8000/t/spring-open/matches \
//!   -H "Content-Type: application/json" \
//!   -d '{"matchId": "m1", "round": 1, "index": 0, "teamA_id": "...", "teamB_id": "...",
//!        "next_match_id": "m2", "next_slot": "A"}'
//! ```
//!
//! Assign a court and start time:
//! ```bash
//! curl -X POST http://localhost:8000/t/spring-open/matches \
//!   -H "Content-Type: application/json" \
//!   -d '{"matchId": "m1", "round": 1, "index": 0, "court": "Court 2", "start_slot": "10:30"}'
//! ```
//!
//! Submit the final score:
//! ```bash
//! curl -X POST http://localhost:8000/t/spring-open/matches/m1/score \
//!   -H "Content-Type: application/json" \
//!   -d '{"score": {"a": 21, "b": 15}}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
};
use cornhole::tournament::{
    BracketRound, Match, MatchStatus, NewMatch, NowNext, ScheduleEntry, Score, Slot,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState, DataResponse, non_empty};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub round: u32,
    pub index: u32,
    #[serde(rename = "teamA_id", default)]
    pub team_a_id: Option<String>,
    #[serde(rename = "teamB_id", default)]
    pub team_b_id: Option<String>,
    #[serde(default)]
    pub next_match_id: Option<String>,
    #[serde(default)]
    pub next_slot: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub start_slot: Option<String>,
}

impl CreateMatchRequest {
    /// Convert to a core request.
    ///
    /// Blank team ids count as absent. A next link needs both a match id and
    /// a recognizable slot; otherwise it is dropped.
    pub fn into_new_match(self) -> NewMatch {
        let mut new = NewMatch::new(self.match_id, self.round, self.index)
            .with_teams(non_empty(self.team_a_id), non_empty(self.team_b_id))
            .with_schedule(non_empty(self.court), non_empty(self.start_slot));

        match (non_empty(self.next_match_id), self.next_slot) {
            (Some(next_id), Some(raw_slot)) => match raw_slot.parse::<Slot>() {
                Ok(slot) => new = new.with_next(next_id, slot),
                Err(e) => tracing::warn!(
                    match_id = %new.match_id,
                    next_match_id = %next_id,
                    "Ignoring next match link: {}", e
                ),
            },
            (Some(next_id), None) => tracing::warn!(
                match_id = %new.match_id,
                next_match_id = %next_id,
                "Ignoring next match link without a slot"
            ),
            (None, _) => {}
        }

        new
    }
}

#[derive(Debug, Deserialize)]
pub struct ScorePayload {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: ScorePayload,
}

#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub a: i64,
    pub b: i64,
}

impl From<Score> for ScoreView {
    fn from(score: Score) -> Self {
        Self {
            a: score.a,
            b: score.b,
        }
    }
}

/// Match as seen by API clients
#[derive(Debug, Serialize)]
pub struct MatchView {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub round: u32,
    pub index: u32,
    #[serde(rename = "teamA_id")]
    pub team_a_id: Option<String>,
    #[serde(rename = "teamB_id")]
    pub team_b_id: Option<String>,
    pub status: MatchStatus,
    pub score: ScoreView,
    pub winner_team_id: Option<String>,
    pub next_match_id: Option<String>,
    pub next_slot: Option<Slot>,
    pub court: Option<String>,
    pub start_slot: Option<String>,
}

impl From<Match> for MatchView {
    fn from(m: Match) -> Self {
        let (next_match_id, next_slot) = match m.next {
            Some(next) => (Some(next.match_id), Some(next.slot)),
            None => (None, None),
        };
        Self {
            match_id: m.match_id,
            round: m.round,
            index: m.index,
            team_a_id: m.team_a,
            team_b_id: m.team_b,
            status: m.status,
            score: m.score.into(),
            winner_team_id: m.winner_team_id,
            next_match_id,
            next_slot,
            court: m.court,
            start_slot: m.start_slot,
        }
    }
}

fn views(matches: Vec<Match>) -> Vec<MatchView> {
    matches.into_iter().map(MatchView::from).collect()
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchView>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub winner_team_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub matches: Vec<MatchView>,
}

#[derive(Debug, Serialize)]
pub struct BracketResponse {
    pub rounds: Vec<RoundView>,
}

impl From<Vec<BracketRound>> for BracketResponse {
    fn from(rounds: Vec<BracketRound>) -> Self {
        Self {
            rounds: rounds
                .into_iter()
                .map(|r| RoundView {
                    round: r.round,
                    matches: views(r.matches),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NowNextResponse {
    pub now: Vec<MatchView>,
    pub next: Vec<MatchView>,
}

impl From<NowNext> for NowNextResponse {
    fn from(view: NowNext) -> Self {
        Self {
            now: views(view.now),
            next: views(view.next),
        }
    }
}

/// Schedule row as seen by API clients
#[derive(Debug, Serialize)]
pub struct ScheduleEntryView {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub round: u32,
    pub index: u32,
    pub court: Option<String>,
    pub start_slot: Option<String>,
    pub status: MatchStatus,
}

impl From<ScheduleEntry> for ScheduleEntryView {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            match_id: entry.match_id,
            round: entry.round,
            index: entry.index,
            court: entry.court,
            start_slot: entry.start_slot,
            status: entry.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub matches: Vec<ScheduleEntryView>,
}

/// Create a match, overwriting any match with the same id.
///
/// # Errors
///
/// - `404 Not Found`: `teamA_id` or `teamB_id` is not a team of this tournament
pub async fn create_match(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Json<DataResponse<MatchView>>, ApiError> {
    let created = state
        .manager
        .create_match(&tournament_id, req.into_new_match())
        .await?;

    metrics::matches_created_total();

    Ok(DataResponse::new(created.into()))
}

/// List matches in creation order.
pub async fn list_matches(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Json<MatchListResponse> {
    let matches = state.manager.list_matches(&tournament_id).await;
    Json(MatchListResponse {
        matches: views(matches),
    })
}

/// Move a scheduled match to playing.
///
/// # Errors
///
/// - `404 Not Found`: Unknown match
/// - `409 Conflict`: Match is not scheduled
pub async fn start_match(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(String, String)>,
) -> Result<Json<DataResponse<MatchView>>, ApiError> {
    let started = state.manager.start_match(&tournament_id, &match_id).await?;
    Ok(DataResponse::new(started.into()))
}

/// Record a final score and advance the winner.
///
/// # Response
///
/// ```json
/// {"data": {"winner_team_id": "3f1c..."}}
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown match
/// - `409 Conflict`: Match already final
/// - `400 Bad Request`: Negative or tied score
pub async fn submit_score(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(String, String)>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Json<DataResponse<ScoreResponse>>, ApiError> {
    let outcome = state
        .manager
        .submit_score(&tournament_id, &match_id, req.score.a, req.score.b)
        .await?;

    metrics::scores_submitted_total();
    if outcome.advanced.is_some() {
        metrics::winners_advanced_total();
    }

    Ok(DataResponse::new(ScoreResponse {
        winner_team_id: outcome.winner_team_id,
    }))
}

/// Matches grouped by round.
pub async fn bracket(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Json<BracketResponse> {
    Json(state.manager.bracket(&tournament_id).await.into())
}

/// Court and start time of every match, ordered by round then index.
///
/// # Response
///
/// ```json
/// {"matches": [{"matchId": "m1", "round": 1, "index": 0, "court": "Court 2",
///               "start_slot": "10:30", "status": "scheduled"}]}
/// ```
pub async fn schedule(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Json<ScheduleResponse> {
    let entries = state.manager.schedule(&tournament_id).await;
    Json(ScheduleResponse {
        matches: entries.into_iter().map(ScheduleEntryView::from).collect(),
    })
}

/// Matches in play and matches ready to be called.
pub async fn now_next(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Json<NowNextResponse> {
    Json(state.manager.now_next(&tournament_id).await.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateMatchRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_request() {
        let new = request(r#"{"matchId": "m2", "round": 2, "index": 0}"#).into_new_match();
        assert_eq!(new, NewMatch::new("m2", 2, 0));
    }

    #[test]
    fn test_next_link_parsed() {
        let new = request(
            r#"{"matchId": "m1", "round": 1, "index": 0, "teamA_id": "x", "teamB_id": "",
                "next_match_id": "m2", "next_slot": "b"}"#,
        )
        .into_new_match();

        assert_eq!(new.team_a.as_deref(), Some("x"));
        assert_eq!(new.team_b, None);
        let next = new.next.unwrap();
        assert_eq!(next.match_id, "m2");
        assert_eq!(next.slot, Slot::B);
    }

    #[test]
    fn test_unusable_next_link_dropped() {
        let bad_slot = request(
            r#"{"matchId": "m1", "round": 1, "index": 0, "next_match_id": "m2", "next_slot": "C"}"#,
        );
        assert!(bad_slot.into_new_match().next.is_none());

        let no_slot =
            request(r#"{"matchId": "m1", "round": 1, "index": 0, "next_match_id": "m2"}"#);
        assert!(no_slot.into_new_match().next.is_none());
    }

    #[test]
    fn test_match_view_field_names() {
        let m = Match {
            match_id: "m1".to_string(),
            round: 1,
            index: 0,
            team_a: Some("a".to_string()),
            team_b: None,
            status: MatchStatus::Final,
            score: Score::new(21, 15),
            winner_team_id: Some("a".to_string()),
            next: Some(cornhole::tournament::NextMatch::new("m2", Slot::A)),
            court: Some("Court 1".to_string()),
            start_slot: None,
        };

        let json = serde_json::to_value(MatchView::from(m)).unwrap();
        assert_eq!(json["matchId"], "m1");
        assert_eq!(json["teamA_id"], "a");
        assert!(json["teamB_id"].is_null());
        assert_eq!(json["status"], "final");
        assert_eq!(json["score"]["a"], 21);
        assert_eq!(json["next_match_id"], "m2");
        assert_eq!(json["next_slot"], "A");
        assert_eq!(json["court"], "Court 1");
        assert!(json["start_slot"].is_null());
    }

    #[test]
    fn test_schedule_fields_parsed() {
        let new = request(
            r#"{"matchId": "m1", "round": 1, "index": 0, "court": "Court 2", "start_slot": " "}"#,
        )
        .into_new_match();

        assert_eq!(new.court.as_deref(), Some("Court 2"));
        assert_eq!(new.start_slot, None);
    }
}
