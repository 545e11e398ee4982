//! Concurrency tests: per-tournament locking keeps roster caps and terminal
//! match states intact under simultaneous callers.

use cornhole::tournament::{BracketManager, MatchStatus, NewMatch, Player};
use cornhole::{BracketConfig, ErrorKind, InMemoryStore};
use std::sync::Arc;

fn setup_manager() -> Arc<BracketManager> {
    Arc::new(BracketManager::new(
        Arc::new(InMemoryStore::new()),
        BracketConfig::default(),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_respect_cap() {
    let mgr = setup_manager();
    let team = mgr
        .create_team(
            "t1",
            "Bag Bandits".to_string(),
            vec![Player::new("A"), Player::new("B")],
            None,
        )
        .await;

    let mut tasks = Vec::new();
    for i in 0..32 {
        let mgr = mgr.clone();
        let code = team.join_code.clone();
        tasks.push(tokio::spawn(async move {
            mgr.join_team("t1", &code, format!("sub-{i}")).await
        }));
    }

    let mut ok = 0;
    let mut full = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => ok += 1,
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::CapacityExceeded);
                full += 1;
            }
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(full, 31);
    assert_eq!(mgr.list_teams("t1").await[0].players.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scores_finalize_once() {
    let mgr = setup_manager();
    let a = mgr.create_team("t1", "Bag Bandits".to_string(), vec![], None).await;
    let b = mgr.create_team("t1", "Corn Stars".to_string(), vec![], None).await;
    mgr.create_match(
        "t1",
        NewMatch::new("m1", 1, 0).with_teams(Some(a.team_id), Some(b.team_id)),
    )
    .await
    .unwrap();

    let mut tasks = Vec::new();
    for i in 0..16i64 {
        let mgr = mgr.clone();
        tasks.push(tokio::spawn(async move {
            mgr.submit_score("t1", "m1", 21, i).await
        }));
    }

    let mut ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidState),
        }
    }

    assert_eq!(ok, 1);
    let m1 = &mgr.list_matches("t1").await[0];
    assert_eq!(m1.status, MatchStatus::Final);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_independent_tournaments_in_parallel() {
    let mgr = setup_manager();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let mgr = mgr.clone();
        tasks.push(tokio::spawn(async move {
            let tid = format!("t{i}");
            for j in 0..10 {
                mgr.create_team(&tid, format!("Team {j}"), vec![], None).await;
            }
            mgr.list_teams(&tid).await.len()
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), 10);
    }
    assert_eq!(mgr.tournament_count().await, 8);
}
