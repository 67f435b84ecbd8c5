//! End-to-end workflow scenarios against the in-memory store.

use demo_reset::confirm::PromptReply;
use demo_reset::executor::DeletionOutcome;
use demo_reset::workflow::RunOutcome;

use crate::integration::{names, run_reset, FakeStore, ScriptedPrompt, StoreCall};

fn demo_collections() -> Vec<String> {
    names(&["customers", "sales", "masters", "work_entries"])
}

#[tokio::test]
async fn test_demo_reset_deletes_all_non_empty_collections() {
    let store = FakeStore::with_counts(&[
        ("customers", 10),
        ("sales", 0),
        ("masters", 2),
        ("work_entries", 7),
    ]);
    let prompt = ScriptedPrompt::answering("DELETE");

    let (outcome, output) = run_reset(&store, &prompt, &demo_collections()).await;

    assert_eq!(
        store.delete_calls(),
        vec!["customers", "masters", "work_entries"]
    );
    let report = outcome.report().expect("run should complete");
    assert_eq!(report.total_deleted(), 19);
    assert_eq!(
        report.deleted().collect::<Vec<_>>(),
        vec![("customers", 10), ("masters", 2), ("work_entries", 7)]
    );
    assert_eq!(
        report.outcome_of("sales"),
        Some(&DeletionOutcome::SkippedEmpty)
    );

    assert!(output.contains("⏭️  Skipped sales: already empty"));
    assert!(output.contains("Total items deleted: 19"));
    assert!(output.contains("   - customers: 10 items"));
    assert!(output.contains("   - masters: 2 items"));
    assert!(output.contains("   - work_entries: 7 items"));
    assert!(!output.contains("   - sales"));
    assert!(output.contains("ready for a new demo"));
}

#[tokio::test]
async fn test_one_failed_delete_does_not_block_the_rest() {
    let store = FakeStore::with_counts(&[("A", 3), ("C", 5)]).fail_delete("A");
    let prompt = ScriptedPrompt::answering("DELETE");

    let (outcome, output) = run_reset(&store, &prompt, &names(&["A", "B", "C"])).await;

    let report = outcome.report().unwrap();
    assert!(matches!(
        report.outcome_of("A"),
        Some(DeletionOutcome::Failed { .. })
    ));
    assert_eq!(report.outcome_of("B"), Some(&DeletionOutcome::SkippedEmpty));
    assert_eq!(
        report.outcome_of("C"),
        Some(&DeletionOutcome::Deleted { count: 5 })
    );
    assert_eq!(report.total_deleted(), 5);
    assert!(store.holds("A"));
    assert!(!store.holds("C"));

    assert!(output.contains("❌ Failed to delete A"));
    assert!(!output.contains("   - A:"));
    assert!(output.contains("could not be deleted: A"));
}

#[tokio::test]
async fn test_declined_confirmation_deletes_nothing() {
    for input in ["delete", "Delete ", "DELETE!", "", "no"] {
        let store = FakeStore::with_counts(&[("customers", 4)]);
        let prompt = ScriptedPrompt::answering(input);

        let (outcome, output) = run_reset(&store, &prompt, &names(&["customers"])).await;

        assert!(
            matches!(outcome, RunOutcome::Declined { .. }),
            "{:?} should decline",
            input
        );
        assert!(store.delete_calls().is_empty());
        assert!(output.contains("Database reset cancelled."));
        assert!(output.contains("No data was deleted."));
    }
}

#[tokio::test]
async fn test_surrounding_whitespace_is_ignored() {
    let store = FakeStore::with_counts(&[("customers", 1)]);
    let prompt = ScriptedPrompt::answering("  DELETE \n");

    let (outcome, _) = run_reset(&store, &prompt, &names(&["customers"])).await;

    assert_eq!(outcome.label(), "completed");
    assert_eq!(store.delete_calls(), vec!["customers"]);
}

#[tokio::test]
async fn test_interrupt_at_prompt_is_a_clean_exit() {
    let store = FakeStore::with_counts(&[("customers", 4)]);
    let prompt = ScriptedPrompt::new(vec![PromptReply::Interrupted]);

    let (outcome, output) = run_reset(&store, &prompt, &names(&["customers"])).await;

    assert!(matches!(outcome, RunOutcome::Interrupted { .. }));
    assert!(store.delete_calls().is_empty());
    assert!(output.contains("No data was deleted."));
}

#[tokio::test]
async fn test_second_run_finds_nothing_to_delete() {
    let store = FakeStore::with_counts(&[("customers", 3), ("masters", 1)]);
    let collections = names(&["customers", "masters"]);

    let first = ScriptedPrompt::answering("DELETE");
    let (outcome, _) = run_reset(&store, &first, &collections).await;
    assert_eq!(outcome.report().unwrap().total_deleted(), 4);

    let second = ScriptedPrompt::silent();
    let (outcome, output) = run_reset(&store, &second, &collections).await;

    assert!(matches!(outcome, RunOutcome::NothingToDelete { .. }));
    assert_eq!(second.times_asked(), 0);
    assert_eq!(store.delete_calls().len(), 2, "no new deletes on second run");
    assert!(output.contains("Nothing to delete"));
}

#[tokio::test]
async fn test_unreadable_collection_is_warned_and_never_deleted() {
    let store = FakeStore::with_counts(&[("customers", 2), ("sales", 9)]).fail_read("sales");
    let prompt = ScriptedPrompt::answering("DELETE");

    let (outcome, output) = run_reset(&store, &prompt, &names(&["customers", "sales"])).await;

    assert!(output.contains("Warning: Could not get count for sales"));
    assert_eq!(outcome.inventory().count_of("sales"), Some(0));
    assert_eq!(store.delete_calls(), vec!["customers"]);
    assert_eq!(
        outcome.report().unwrap().outcome_of("sales"),
        Some(&DeletionOutcome::SkippedEmpty)
    );
}

#[tokio::test]
async fn test_inventory_reads_every_collection_once_in_order() {
    let store = FakeStore::with_counts(&[("b", 1)]);
    let prompt = ScriptedPrompt::answering("nope");

    run_reset(&store, &prompt, &names(&["c", "a", "b"])).await;

    assert_eq!(
        store.calls(),
        vec![
            StoreCall::Fetch("c".into()),
            StoreCall::Fetch("a".into()),
            StoreCall::Fetch("b".into()),
        ]
    );
}
