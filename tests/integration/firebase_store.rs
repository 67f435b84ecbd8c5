//! Integration tests for the Firebase REST client against an in-process server.

use axum::http::StatusCode;
use demo_reset::error::StoreError;
use demo_reset::executor::DeletionOutcome;
use demo_reset::interrupt::InterruptAfter;
use demo_reset::inventory::take_inventory;
use demo_reset::store::{FirebaseRestStore, RemoteStore};
use demo_reset::workflow::{ResetWorkflow, RunOutcome};
use serde_json::json;
use std::time::{Duration, Instant};

use crate::integration::{
    collection_payload, names, run_reset, spawn_fake_database, FakeDatabase, ScriptedPrompt,
};

fn client(base_url: &str) -> FirebaseRestStore {
    FirebaseRestStore::new(base_url, Duration::from_secs(2), Duration::from_secs(1)).unwrap()
}

#[tokio::test]
async fn test_fetch_counts_top_level_keys_and_null_is_empty() {
    let db = FakeDatabase::default();
    db.put("tailoring_customers", collection_payload(3));
    let base_url = spawn_fake_database(db.clone()).await;
    let store = client(&base_url);

    let customers = store.fetch("tailoring_customers").await.unwrap().unwrap();
    assert_eq!(customers.as_object().unwrap().len(), 3);
    assert_eq!(store.fetch("tailoring_sales").await.unwrap(), None);

    assert_eq!(
        db.requests(),
        vec![
            "GET /tailoring_customers.json",
            "GET /tailoring_sales.json"
        ]
    );
}

#[tokio::test]
async fn test_delete_removes_collection() {
    let db = FakeDatabase::default();
    db.put("tailoring_masters", json!({ "-a": { "name": "Ravi" } }));
    let base_url = spawn_fake_database(db.clone()).await;
    let store = client(&format!("{}/", base_url));

    store.delete("tailoring_masters").await.unwrap();
    assert!(!db.contains("tailoring_masters"));

    // Deleting again is still a success.
    store.delete("tailoring_masters").await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_are_reported() {
    let db = FakeDatabase::default();
    db.put("locked", collection_payload(1));
    db.fail_with("locked", StatusCode::UNAUTHORIZED);
    let base_url = spawn_fake_database(db.clone()).await;
    let store = client(&base_url);

    match store.fetch("locked").await {
        Err(StoreError::Status { status, url }) => {
            assert_eq!(status, 401);
            assert!(url.ends_with("/locked.json"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(matches!(
        store.delete("locked").await,
        Err(StoreError::Status { status: 401, .. })
    ));
    assert!(db.contains("locked"));
}

#[tokio::test]
async fn test_slow_read_times_out_and_counts_as_zero() {
    let db = FakeDatabase::default();
    db.put("slow", collection_payload(5));
    db.put("fast", collection_payload(2));
    db.delay("slow", Duration::from_secs(3));
    let base_url = spawn_fake_database(db).await;
    let store = client(&base_url);

    let inventory = take_inventory(&store, &names(&["slow", "fast"])).await;

    assert_eq!(inventory.count_of("slow"), Some(0));
    assert_eq!(inventory.count_of("fast"), Some(2));
    let failed = inventory.read_failures().next().unwrap();
    assert_eq!(failed.name, "slow");
    assert!(matches!(failed.read_error, Some(StoreError::Timeout(_))));
}

#[tokio::test]
async fn test_full_reset_over_http() {
    let db = FakeDatabase::default();
    db.put("tailoring_customers", collection_payload(10));
    db.put("tailoring_masters", collection_payload(2));
    db.put("tailoring_work_entries", collection_payload(7));
    db.fail_with("tailoring_work_entries", StatusCode::INTERNAL_SERVER_ERROR);
    let base_url = spawn_fake_database(db.clone()).await;
    let store = client(&base_url);
    let collections = names(&[
        "tailoring_customers",
        "tailoring_sales",
        "tailoring_masters",
        "tailoring_work_entries",
    ]);

    let prompt = ScriptedPrompt::answering("DELETE");
    let (outcome, output) = run_reset(&store, &prompt, &collections).await;

    // The failing collection is unreadable, so it is counted as empty and skipped.
    let report = outcome.report().unwrap();
    assert_eq!(report.total_deleted(), 12);
    assert_eq!(
        report.outcome_of("tailoring_work_entries"),
        Some(&DeletionOutcome::SkippedEmpty)
    );
    assert!(output.contains("Could not get count for tailoring_work_entries"));
    assert!(!db.contains("tailoring_customers"));
    assert!(!db.contains("tailoring_masters"));
    assert!(db.contains("tailoring_work_entries"));

    let deletes: Vec<String> = db
        .requests()
        .into_iter()
        .filter(|r| r.starts_with("DELETE"))
        .collect();
    assert_eq!(
        deletes,
        vec![
            "DELETE /tailoring_customers.json",
            "DELETE /tailoring_masters.json"
        ]
    );
}

#[tokio::test]
async fn test_interrupt_while_store_is_slow_exits_cleanly() {
    let db = FakeDatabase::default();
    db.put("tailoring_customers", collection_payload(4));
    db.delay("tailoring_customers", Duration::from_secs(5));
    let base_url = spawn_fake_database(db.clone()).await;
    let store = FirebaseRestStore::new(&base_url, Duration::from_secs(10), Duration::from_secs(10))
        .unwrap();
    let prompt = ScriptedPrompt::silent();
    let interrupt = InterruptAfter(Duration::from_millis(200));
    let collections = names(&["tailoring_customers", "tailoring_sales"]);
    let mut out = Vec::new();

    let started = Instant::now();
    let outcome = ResetWorkflow::new(&store, &prompt, &collections)
        .with_interrupt(&interrupt)
        .run(&mut out)
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Interrupted { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(prompt.times_asked(), 0);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Operation cancelled by user"));
    assert!(output.contains("No data was deleted."));
    assert!(db.contains("tailoring_customers"));
    assert!(db.requests().iter().all(|r| !r.starts_with("DELETE")));
}
