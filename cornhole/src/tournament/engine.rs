//! Bracket engine: match creation, scoring and winner propagation.
//!
//! Like the registry, everything here runs against a locked [`Tournament`].
//! Every operation validates before it mutates, so a rejected call leaves
//! the tournament untouched.

use std::collections::BTreeMap;

use super::errors::{BracketError, BracketResult};
use super::models::{
    Advancement, BracketRound, Match, MatchStatus, NewMatch, NowNext, ScheduleEntry, Score,
    ScoreOutcome, Slot, Tournament,
};

/// Create (or overwrite) a match.
///
/// Returns the stored match and whether an existing match with the same id was replaced.
pub fn create_match(tournament: &mut Tournament, new: NewMatch) -> BracketResult<(Match, bool)> {
    for (slot, team_id) in [(Slot::A, &new.team_a), (Slot::B, &new.team_b)] {
        if let Some(team_id) = team_id
            && !tournament.has_team(team_id)
        {
            return Err(BracketError::TeamNotFound {
                slot,
                team_id: team_id.clone(),
            });
        }
    }

    let m = Match {
        match_id: new.match_id,
        round: new.round,
        index: new.index,
        team_a: new.team_a,
        team_b: new.team_b,
        status: MatchStatus::Scheduled,
        score: Score::default(),
        winner_team_id: None,
        next: new.next,
        court: new.court,
        start_slot: new.start_slot,
    };

    let replaced = tournament.upsert_match(m.clone());
    Ok((m, replaced))
}

/// Matches in creation order
pub fn list_matches(tournament: &Tournament) -> Vec<Match> {
    tournament.matches().to_vec()
}

/// Move a scheduled match to playing
pub fn start_match(tournament: &mut Tournament, match_id: &str) -> BracketResult<Match> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;

    if m.status != MatchStatus::Scheduled {
        return Err(BracketError::NotStartable { status: m.status });
    }

    m.status = MatchStatus::Playing;
    Ok(m.clone())
}

/// Finalize a match with a decisive score and advance the winner.
///
/// Propagation follows the match's `next` link by id. A link to a match that
/// does not exist is skipped without error.
pub fn submit_score(
    tournament: &mut Tournament,
    match_id: &str,
    a: i64,
    b: i64,
) -> BracketResult<ScoreOutcome> {
    let score = Score::new(a, b);

    let m = tournament
        .get_match_mut(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;

    if !m.status.is_scorable() {
        return Err(BracketError::NotScorable { status: m.status });
    }

    if !score.is_decisive() {
        return Err(BracketError::InvalidScore { a, b });
    }

    m.score = score;
    m.status = MatchStatus::Final;
    // An empty winning slot (a bye) produces an empty winner.
    let winner = m.team_in(score.winning_slot()).cloned();
    m.winner_team_id = winner.clone();
    let next = m.next.clone();

    let advanced = next.and_then(|next| {
        let target = tournament.get_match_mut(&next.match_id)?;
        target.set_team(next.slot, winner.clone());
        Some(Advancement {
            match_id: next.match_id,
            slot: next.slot,
        })
    });

    Ok(ScoreOutcome {
        match_id: match_id.to_string(),
        score,
        winner_team_id: winner,
        advanced,
    })
}

/// Matches grouped by round, ordered by index within each round
pub fn bracket(tournament: &Tournament) -> Vec<BracketRound> {
    let mut rounds: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for m in tournament.matches() {
        rounds.entry(m.round).or_default().push(m.clone());
    }

    rounds
        .into_iter()
        .map(|(round, mut matches)| {
            matches.sort_by_key(|m| m.index);
            BracketRound { round, matches }
        })
        .collect()
}

/// Matches being played now, and scheduled matches ready to be called next
pub fn now_next(tournament: &Tournament) -> NowNext {
    let mut now: Vec<Match> = Vec::new();
    let mut next: Vec<Match> = Vec::new();

    for m in tournament.matches() {
        match m.status {
            MatchStatus::Playing => now.push(m.clone()),
            MatchStatus::Scheduled if m.is_ready() => next.push(m.clone()),
            _ => {}
        }
    }

    now.sort_by_key(|m| (m.round, m.index));
    next.sort_by_key(|m| (m.round, m.index));
    NowNext { now, next }
}

/// Court and start time of every match, ordered by (round, index)
pub fn schedule(tournament: &Tournament) -> Vec<ScheduleEntry> {
    let mut entries: Vec<ScheduleEntry> =
        tournament.matches().iter().map(ScheduleEntry::from).collect();
    entries.sort_by_key(|e| (e.round, e.index));
    entries
}
