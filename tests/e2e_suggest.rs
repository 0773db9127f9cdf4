//! End-to-end tests for suggested accounts.
//!
//! Sampling is random, so every property is checked over many draws.

use follow_graph::{
    Account, AccountId, Error, GraphConfig, MemoryStore, SamplingStrategy, SocialGraph,
    SuggestConfig,
};
use std::collections::HashSet;

const DRAWS: usize = 50;

async fn graph_with(n: usize, config: GraphConfig) -> SocialGraph<MemoryStore, MemoryStore> {
    let graph = SocialGraph::open_memory().with_config(config).unwrap();
    for i in 0..n {
        graph
            .accounts()
            .register(
                Account::new(format!("u{i}"), format!("user{i}"))
                    .with_full_name(format!("User {i}"))
                    .with_password_hash("$2b$10$topsecret"),
            )
            .unwrap();
    }
    graph
}

fn id(i: usize) -> AccountId {
    AccountId::from(format!("u{i}"))
}

// ============================================================================
// 1. Never self, never already-followed
// ============================================================================

#[tokio::test]
async fn test_excludes_self_and_followed() {
    let graph = graph_with(12, GraphConfig::default()).await;
    let me = id(0);
    let followed: HashSet<AccountId> = [1, 3, 5, 7].into_iter().map(id).collect();
    for target in &followed {
        graph.toggle_follow(&me, target).await.unwrap();
    }

    for _ in 0..DRAWS {
        let picked = graph.suggest_users(&me).await.unwrap();
        assert!(picked.len() <= 4);
        for s in &picked {
            assert_ne!(s.id, me);
            assert!(!followed.contains(&s.id), "suggested already-followed {}", s.id);
        }
        let unique: HashSet<_> = picked.iter().map(|s| s.id.clone()).collect();
        assert_eq!(unique.len(), picked.len());
    }
}

// ============================================================================
// 2. Large eligible pool: exactly 4
// ============================================================================

#[tokio::test]
async fn test_returns_four_when_plenty_eligible() {
    let graph = graph_with(40, GraphConfig::default()).await;
    for _ in 0..DRAWS {
        assert_eq!(graph.suggest_users(&id(0)).await.unwrap().len(), 4);
    }
}

// ============================================================================
// 3. Small eligible pool: everything eligible, no padding
// ============================================================================

#[tokio::test]
async fn test_returns_all_when_few_eligible() {
    let graph = graph_with(4, GraphConfig::default()).await;
    let me = id(0);
    graph.toggle_follow(&me, &id(1)).await.unwrap();

    for _ in 0..DRAWS {
        let picked: HashSet<AccountId> = graph
            .suggest_users(&me)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(picked, [2, 3].into_iter().map(id).collect::<HashSet<_>>());
    }
}

#[tokio::test]
async fn test_following_everyone_yields_empty() {
    let graph = graph_with(5, GraphConfig::default()).await;
    let me = id(0);
    for i in 1..5 {
        graph.toggle_follow(&me, &id(i)).await.unwrap();
    }
    assert!(graph.suggest_users(&me).await.unwrap().is_empty());
}

// ============================================================================
// 4. Followers of the actor are still eligible
// ============================================================================

#[tokio::test]
async fn test_followers_remain_eligible() {
    let graph = graph_with(3, GraphConfig::default()).await;
    let me = id(0);
    graph.toggle_follow(&id(1), &me).await.unwrap();
    graph.toggle_follow(&id(2), &me).await.unwrap();

    let picked = graph.suggest_users(&me).await.unwrap();
    assert_eq!(picked.len(), 2);
}

// ============================================================================
// 5. Credential never exposed
// ============================================================================

#[tokio::test]
async fn test_summaries_carry_no_secret() {
    let graph = graph_with(10, GraphConfig::default()).await;
    let picked = graph.suggest_users(&id(0)).await.unwrap();
    assert!(!picked.is_empty());

    let json = serde_json::to_string(&picked).unwrap();
    assert!(!json.contains("topsecret"));
    assert!(json.contains("User "));
}

// ============================================================================
// 6. Unknown actor
// ============================================================================

#[tokio::test]
async fn test_unknown_actor() {
    let graph = graph_with(3, GraphConfig::default()).await;
    let err = graph.suggest_users(&AccountId::from("ghost")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// 7. Store-side exclusion fills the result where post-filtering cannot
// ============================================================================

#[tokio::test]
async fn test_store_exclusion_avoids_wasted_draws() {
    // Pool of 2 out of 6 candidates; the actor follows 4 of them.
    let post = GraphConfig {
        suggestions: SuggestConfig { pool_size: 2, result_size: 2, strategy: SamplingStrategy::PostFilter },
        ..Default::default()
    };
    let store = GraphConfig {
        suggestions: SuggestConfig { pool_size: 2, result_size: 2, strategy: SamplingStrategy::StoreExclusion },
        ..Default::default()
    };

    for config in [post, store.clone()] {
        let graph = graph_with(7, config.clone()).await;
        let me = id(0);
        for i in 1..5 {
            graph.toggle_follow(&me, &id(i)).await.unwrap();
        }
        for _ in 0..DRAWS {
            let picked = graph.suggest_users(&me).await.unwrap();
            assert!(picked.iter().all(|s| s.id == id(5) || s.id == id(6)));
            if config == store {
                assert_eq!(picked.len(), 2);
            }
        }
    }
}

// ============================================================================
// 8. Config from JSON drives the graph
// ============================================================================

#[tokio::test]
async fn test_open_from_json_config() {
    let config = GraphConfig::from_json(r#"{ "suggestions": { "pool_size": 3, "result_size": 2 } }"#).unwrap();
    let graph = SocialGraph::open(config).unwrap();
    for i in 0..10 {
        graph.accounts().register(Account::new(format!("u{i}"), format!("user{i}"))).unwrap();
    }
    assert_eq!(graph.config().suggestions.result_size, 2);
    assert_eq!(graph.suggest_users(&id(0)).await.unwrap().len(), 2);

    let bad = GraphConfig {
        suggestions: SuggestConfig { pool_size: 1, result_size: 3, ..Default::default() },
        ..Default::default()
    };
    assert!(matches!(SocialGraph::open(bad), Err(Error::Config(_))));
}
