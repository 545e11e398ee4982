/// Property-based tests for scoring and roster rules using proptest
///
/// These run directly against the registry and engine functions on a
/// tournament value, without the async manager.
use cornhole::BracketConfig;
use cornhole::tournament::{
    BracketError, MatchStatus, NewMatch, Player, Score, Slot, Tournament, engine, registry,
};
use proptest::prelude::*;
use std::collections::HashSet;

// Tournament with two teams and m1 (linked to m2 slot A) ready to score
fn scored_setup() -> (Tournament, String, String) {
    let mut t = Tournament::new("prop");
    let config = BracketConfig::default();
    let a = registry::create_team(&mut t, &config, "Bag Bandits".to_string(), vec![], None);
    let b = registry::create_team(&mut t, &config, "Corn Stars".to_string(), vec![], None);
    engine::create_match(&mut t, NewMatch::new("m2", 2, 0)).unwrap();
    engine::create_match(
        &mut t,
        NewMatch::new("m1", 1, 0)
            .with_teams(Some(a.team_id.clone()), Some(b.team_id.clone()))
            .with_next("m2", Slot::A),
    )
    .unwrap();
    (t, a.team_id, b.team_id)
}

// Strategy for decisive scores
fn decisive_score() -> impl Strategy<Value = (i64, i64)> {
    (0i64..=100, 0i64..=100).prop_filter("no ties", |(a, b)| a != b)
}

proptest! {
    #[test]
    fn test_ties_always_rejected(points in -5i64..=100) {
        let (mut t, _, _) = scored_setup();

        let result = engine::submit_score(&mut t, "m1", points, points);
        prop_assert_eq!(result, Err(BracketError::InvalidScore { a: points, b: points }));

        let m1 = t.get_match("m1").unwrap();
        prop_assert_eq!(m1.status, MatchStatus::Scheduled);
        prop_assert_eq!(m1.score, Score::default());
    }

    #[test]
    fn test_winner_is_higher_score((a, b) in decisive_score()) {
        let (mut t, team_a, team_b) = scored_setup();

        let outcome = engine::submit_score(&mut t, "m1", a, b).unwrap();
        let expected = if a > b { team_a } else { team_b };
        prop_assert_eq!(outcome.winner_team_id.as_ref(), Some(&expected));

        let m1 = t.get_match("m1").unwrap();
        prop_assert_eq!(m1.status, MatchStatus::Final);
        prop_assert_ne!(m1.score.a, m1.score.b);

        // Winner lands in m2 slot A, slot B untouched
        let m2 = t.get_match("m2").unwrap();
        prop_assert_eq!(m2.team_a.as_ref(), Some(&expected));
        prop_assert_eq!(m2.team_b.as_ref(), None);
    }

    #[test]
    fn test_final_never_rescored(first in decisive_score(), a in -10i64..=100, b in -10i64..=100) {
        let (mut t, _, _) = scored_setup();
        engine::submit_score(&mut t, "m1", first.0, first.1).unwrap();
        let before = t.get_match("m1").unwrap().clone();

        let result = engine::submit_score(&mut t, "m1", a, b);
        prop_assert_eq!(result, Err(BracketError::NotScorable { status: MatchStatus::Final }));
        prop_assert_eq!(t.get_match("m1").unwrap(), &before);
    }

    #[test]
    fn test_negative_scores_rejected(a in -100i64..0, b in 0i64..=100) {
        let (mut t, _, _) = scored_setup();
        prop_assert!(engine::submit_score(&mut t, "m1", a, b).is_err());
        prop_assert!(engine::submit_score(&mut t, "m1", b, a).is_err());
        prop_assert_eq!(t.get_match("m1").unwrap().status, MatchStatus::Scheduled);
    }

    #[test]
    fn test_join_succeeds_exactly_below_cap(cap in 1usize..=8, initial in 0usize..=8, attempts in 0usize..=12) {
        let mut t = Tournament::new("prop");
        let config = BracketConfig { roster_cap: cap, ..Default::default() };
        let players = (0..initial).map(|i| Player::new(format!("p{i}"))).collect();
        let created = registry::create_team(&mut t, &config, "Team".to_string(), players, None);

        for i in 0..attempts {
            let before = t.team(&created.team_id).unwrap().players.len();
            let result = registry::join_team(&mut t, &config, &created.join_code, format!("j{i}"));
            if before < cap {
                prop_assert!(result.is_ok());
                prop_assert_eq!(t.team(&created.team_id).unwrap().players.len(), before + 1);
            } else {
                prop_assert_eq!(result, Err(BracketError::RosterFull { cap }));
                prop_assert_eq!(t.team(&created.team_id).unwrap().players.len(), before);
            }
        }
    }

    #[test]
    fn test_team_ids_and_codes_unique(count in 1usize..=200) {
        let mut t = Tournament::new("prop");
        let config = BracketConfig::default();
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();

        for i in 0..count {
            let created = registry::create_team(&mut t, &config, format!("Team {i}"), vec![], None);
            prop_assert!(ids.insert(created.team_id));
            prop_assert!(codes.insert(created.join_code));
        }
    }
}
