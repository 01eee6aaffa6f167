//! Query Property Tests
//!
//! Properties that hold across requests: the session gate runs before
//! any query, searches are idempotent, and filters only ever narrow.

mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use sheetdesk::backend::MemoryBackend;
use support::*;

fn results(body: &Value) -> Vec<Value> {
    body["results"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_no_query_without_session() {
    let sessions = Arc::new(seeded_backend());
    let store = Arc::new(CountingStore::new(seeded_backend()));

    for token in [None, Some("forged")] {
        let router = router_with(sessions.clone(), store.clone());
        let (status, _) = send(router, search_request("S1", token, "{}")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let router = router_with(sessions.clone(), store.clone());
        let (status, _) = send(router, stats_request("S1", token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_authenticated_requests_reach_store() {
    let sessions = Arc::new(seeded_backend());
    let store = Arc::new(CountingStore::new(seeded_backend()));

    let router = router_with(sessions.clone(), store.clone());
    send(router, search_request("S1", Some(GOOD_TOKEN), "{}")).await;
    let router = router_with(sessions, store.clone());
    send(router, stats_request("S1", Some(GOOD_TOKEN))).await;

    assert_eq!(store.queries(), 2);
}

#[tokio::test]
async fn test_malformed_body_never_queries() {
    let sessions = Arc::new(seeded_backend());
    let store = Arc::new(CountingStore::new(seeded_backend()));

    let router = router_with(sessions, store.clone());
    let (status, _) = send(router, search_request("S1", Some(GOOD_TOKEN), "[1, 2")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_count_matches_results() {
    let bodies = [
        "{}",
        r#"{"search_term": "run"}"#,
        r#"{"column_filters": {"streak": "3"}}"#,
        r#"{"search_term": "nothing-like-this"}"#,
    ];

    for raw in bodies {
        let (status, body) = send(router(), search_request("habits", Some(GOOD_TOKEN), raw)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"].as_u64(), Some(results(&body).len() as u64), "body {}", raw);
    }
}

#[tokio::test]
async fn test_unconstrained_search_returns_store_order() {
    let (_, body) = send(router(), search_request("habits", Some(GOOD_TOKEN), "{}")).await;

    let names: Vec<_> = results(&body)
        .iter()
        .map(|row| row["habit"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Morning run", "Read", "Evening run", "Stretch"]);
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let raw = r#"{"search_term": "run", "column_filters": {"done": "true"}}"#;

    let (_, first) = send(router(), search_request("habits", Some(GOOD_TOKEN), raw)).await;
    let (_, second) = send(router(), search_request("habits", Some(GOOD_TOKEN), raw)).await;
    assert_eq!(first, second);

    let (_, first) = send(router(), stats_request("habits", Some(GOOD_TOKEN))).await;
    let (_, second) = send(router(), stats_request("habits", Some(GOOD_TOKEN))).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_combined_constraints_narrow_each_side() {
    let (_, by_term) = send(
        router(),
        search_request("habits", Some(GOOD_TOKEN), r#"{"search_term": "run"}"#),
    )
    .await;
    let (_, by_filter) = send(
        router(),
        search_request("habits", Some(GOOD_TOKEN), r#"{"column_filters": {"streak": "3"}}"#),
    )
    .await;
    let (_, both) = send(
        router(),
        search_request(
            "habits",
            Some(GOOD_TOKEN),
            r#"{"search_term": "run", "column_filters": {"streak": "3"}}"#,
        ),
    )
    .await;

    let by_term = results(&by_term);
    let by_filter = results(&by_filter);
    let both = results(&both);

    assert_eq!(by_term.len(), 2);
    assert_eq!(by_filter.len(), 2);
    assert_eq!(both.len(), 1);
    for row in &both {
        assert!(by_term.contains(row));
        assert!(by_filter.contains(row));
    }
    assert_eq!(both[0]["habit"], "Evening run");
}

#[tokio::test]
async fn test_empty_filter_values_do_not_constrain() {
    let (_, all) = send(router(), search_request("habits", Some(GOOD_TOKEN), "{}")).await;
    let (status, blank) = send(
        router(),
        search_request(
            "habits",
            Some(GOOD_TOKEN),
            r#"{"search_term": "  ", "column_filters": {"habit": "", "streak": null}}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, blank);
}

#[tokio::test]
async fn test_stats_not_found_without_rows() {
    let backend = Arc::new(seeded_backend().with_sheet("fresh", Vec::new()));
    let router = router_with(backend.clone(), backend);

    let (status, body) = send(router, stats_request("fresh", Some(GOOD_TOKEN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Stats not found");
}

#[tokio::test]
async fn test_sheets_are_isolated() {
    let backend = Arc::new(
        MemoryBackend::new()
            .with_sheet("a", inventory_rows())
            .with_sheet("b", habit_rows())
            .with_session(
                GOOD_TOKEN,
                sheetdesk::auth::AuthenticatedUser::new(uuid::Uuid::new_v4()),
            ),
    );

    let router = router_with(backend.clone(), backend.clone());
    let (_, body) = send(router, search_request("a", Some(GOOD_TOKEN), r#"{"search_term": "run"}"#)).await;
    assert_eq!(body["count"], 0);

    let router = router_with(backend.clone(), backend);
    let (_, body) = send(router, search_request("b", Some(GOOD_TOKEN), r#"{"search_term": "bolt"}"#)).await;
    assert_eq!(body["count"], 0);
}
