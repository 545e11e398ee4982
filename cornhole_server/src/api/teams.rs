//! Team registration API handlers.
//!
//! # Examples
//!
//! Create a team:
//! ```bash
//! curl -X POST http://localhost:8000/t/spring-open/teams \
//!   -H "Content-Type: application/json" \
//!   -d '{"team_name": "Bag Bandits", "players": [{"name": "Ann"}, {"name": "Bo"}]}'
//! ```
//!
//! Join with the code handed out at creation:
//! ```bash
//! curl -X POST http://localhost:8000/t/spring-open/teams/join \
//!   -H "Content-Type: application/json" \
//!   -d '{"team_code": "K7Q2ZD", "player": "Cy"}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
};
use cornhole::tournament::{Player, Team, TeamCreated};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState, DataResponse, non_empty};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct PlayerPayload {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

impl From<PlayerPayload> for Player {
    fn from(payload: PlayerPayload) -> Self {
        Player {
            name: payload.name,
            contact: non_empty(payload.contact),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<PlayerPayload>,
    #[serde(default)]
    pub captain_contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamCreatedResponse {
    #[serde(rename = "teamId")]
    pub team_id: String,
    #[serde(rename = "joinCode")]
    pub join_code: String,
}

impl From<TeamCreated> for TeamCreatedResponse {
    fn from(created: TeamCreated) -> Self {
        Self {
            team_id: created.team_id,
            join_code: created.join_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamView {
    #[serde(rename = "teamId")]
    pub team_id: String,
    pub name: String,
    pub players: Vec<PlayerView>,
    pub captain_contact: Option<String>,
    #[serde(rename = "joinCode")]
    pub join_code: String,
}

impl From<Team> for TeamView {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            players: team
                .players
                .into_iter()
                .map(|p| PlayerView {
                    name: p.name,
                    contact: p.contact,
                })
                .collect(),
            captain_contact: team.captain_contact,
            join_code: team.join_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<TeamView>,
}

#[derive(Debug, Deserialize)]
pub struct JoinTeamRequest {
    pub team_code: String,
    pub player: String,
}

#[derive(Debug, Serialize)]
pub struct JoinTeamResponse {
    pub ok: bool,
}

/// Register a team.
///
/// # Response
///
/// ```json
/// {"data": {"teamId": "3f1c...", "joinCode": "K7Q2ZD"}}
/// ```
pub async fn create_team(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<CreateTeamRequest>,
) -> Json<DataResponse<TeamCreatedResponse>> {
    let players = req.players.into_iter().map(Player::from).collect();
    let created = state
        .manager
        .create_team(
            &tournament_id,
            req.team_name,
            players,
            non_empty(req.captain_contact),
        )
        .await;

    metrics::teams_created_total();

    DataResponse::new(created.into())
}

/// List teams in creation order.
pub async fn list_teams(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
) -> Json<TeamListResponse> {
    let teams = state.manager.list_teams(&tournament_id).await;
    Json(TeamListResponse {
        teams: teams.into_iter().map(TeamView::from).collect(),
    })
}

/// Add a player to the team holding `team_code`.
///
/// The submitted code is trimmed and upper-cased before lookup.
///
/// # Errors
///
/// - `404 Not Found`: No team has this code
/// - `400 Bad Request`: Roster already full
pub async fn join_team(
    State(state): State<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<DataResponse<JoinTeamResponse>>, ApiError> {
    let code = req.team_code.trim().to_uppercase();
    state
        .manager
        .join_team(&tournament_id, &code, req.player)
        .await?;

    metrics::players_joined_total();

    Ok(DataResponse::new(JoinTeamResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTeamRequest =
            serde_json::from_str(r#"{"team_name": "Bag Bandits"}"#).unwrap();
        assert!(req.players.is_empty());
        assert!(req.captain_contact.is_none());
    }

    #[test]
    fn test_blank_contact_dropped() {
        let player: Player = PlayerPayload {
            name: "Ann".to_string(),
            contact: Some("  ".to_string()),
        }
        .into();
        assert_eq!(player, Player::new("Ann"));
    }

    #[test]
    fn test_team_view_field_names() {
        let team = Team {
            team_id: "t-1".to_string(),
            name: "Corn Stars".to_string(),
            players: vec![Player::new("Ann").with_contact("ann@example.com")],
            captain_contact: None,
            join_code: "ABC123".to_string(),
        };

        let json = serde_json::to_value(TeamView::from(team)).unwrap();
        assert_eq!(json["teamId"], "t-1");
        assert_eq!(json["joinCode"], "ABC123");
        assert_eq!(json["players"][0]["contact"], "ann@example.com");
        assert!(json["captain_contact"].is_null());
    }
}
