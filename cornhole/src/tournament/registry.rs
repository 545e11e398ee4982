//! Team registry: team creation, listing and roster joins.
//!
//! These functions operate on an already-locked [`Tournament`]; callers are
//! responsible for holding the tournament lock for the whole call.

use rand::Rng;
use uuid::Uuid;

use super::errors::{BracketError, BracketResult};
use super::models::{Player, Team, TeamCreated, TeamId, Tournament};
use crate::config::{BracketConfig, JOIN_CODE_ALPHABET};

/// Generate a random join code of `len` characters from `A-Z0-9`
pub fn generate_join_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..JOIN_CODE_ALPHABET.len());
            JOIN_CODE_ALPHABET[idx] as char
        })
        .collect()
}

fn fresh_team_id(tournament: &Tournament) -> TeamId {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !tournament.has_team(&id) {
            return id;
        }
    }
}

fn fresh_join_code(tournament: &Tournament, len: usize) -> String {
    loop {
        let code = generate_join_code(len);
        if !tournament.has_join_code(&code) {
            return code;
        }
    }
}

/// Register a team with its initial roster
pub fn create_team(
    tournament: &mut Tournament,
    config: &BracketConfig,
    name: String,
    players: Vec<Player>,
    captain_contact: Option<String>,
) -> TeamCreated {
    let team_id = fresh_team_id(tournament);
    let join_code = fresh_join_code(tournament, config.join_code_length);

    tournament.insert_team(Team {
        team_id: team_id.clone(),
        name,
        players,
        captain_contact,
        join_code: join_code.clone(),
    });

    TeamCreated { team_id, join_code }
}

/// Teams in creation order
pub fn list_teams(tournament: &Tournament) -> Vec<Team> {
    tournament.teams().to_vec()
}

/// Add a player to the team owning `join_code`.
///
/// Returns the joined team's id.
pub fn join_team(
    tournament: &mut Tournament,
    config: &BracketConfig,
    join_code: &str,
    player_name: String,
) -> BracketResult<TeamId> {
    let team = tournament
        .team_by_join_code_mut(join_code)
        .ok_or(BracketError::JoinCodeNotFound)?;

    if team.players.len() >= config.roster_cap {
        return Err(BracketError::RosterFull {
            cap: config.roster_cap,
        });
    }

    team.players.push(Player::new(player_name));
    Ok(team.team_id.clone())
}
