//! End-to-end pipeline tests over the in-memory store.

#![allow(clippy::expect_used)]

use idxsweep_auditor::run_audit;
use idxsweep_core::{
    Classification, Error, IndexDescriptor, IndexKeyType, RemediationOutcome, PRIMARY_KEY_INDEX,
};
use idxsweep_store::mock::MockStore;
use pretty_assertions::assert_eq;

fn primary_key() -> IndexDescriptor {
    IndexDescriptor::new(
        PRIMARY_KEY_INDEX,
        vec![("_id".to_string(), IndexKeyType::Ascending)],
    )
}

fn ascending(name: &str, field: &str) -> IndexDescriptor {
    IndexDescriptor::new(name, vec![(field.to_string(), IndexKeyType::Ascending)])
}

fn text(name: &str, field: &str) -> IndexDescriptor {
    IndexDescriptor::new(name, vec![(field.to_string(), IndexKeyType::Text)])
}

#[tokio::test]
async fn test_users_collection_with_text_index_is_remediated() {
    let store = MockStore::new().with_collection(
        "users",
        vec![
            primary_key(),
            text("name_text", "name").with_default_language("english"),
        ],
    );

    let report = run_audit(&store).await.expect("run should complete");

    assert_eq!(report.collections.len(), 1);
    let record = &report.collections[0];
    assert_eq!(record.collection_name, "users");
    assert_eq!(record.indexes.len(), 2);
    assert_eq!(record.dropped_names, vec!["name_text".to_string()]);
    assert!(record.drop_errors.is_empty());
    assert_eq!(record.outcome(), RemediationOutcome::Remediated);

    // Only the text index is gone from the store.
    let remaining = store.indexes("users").expect("collection exists");
    assert_eq!(remaining, vec![primary_key()]);
}

#[tokio::test]
async fn test_logs_collection_without_text_indexes_is_untouched() {
    let store = MockStore::new()
        .with_collection("logs", vec![primary_key(), ascending("ts_idx", "ts")]);

    let report = run_audit(&store).await.expect("run should complete");

    let record = &report.collections[0];
    assert_eq!(record.dropped_names, Vec::<String>::new());
    assert_eq!(record.outcome(), RemediationOutcome::NotNeeded);

    // Allowed indexes are never passed to dropIndex at all.
    assert!(store.drop_calls().is_empty());
}

#[tokio::test]
async fn test_orders_drop_failure_is_recorded_and_run_continues() {
    let store = MockStore::new()
        .with_collection("orders", vec![primary_key(), text("title_text", "title")])
        .with_drop_failure("orders", "title_text", "lock timeout")
        .with_collection("users", vec![primary_key(), text("name_text", "name")]);

    let report = run_audit(&store).await.expect("run should complete");

    let orders = &report.collections[0];
    assert_eq!(orders.dropped_names, Vec::<String>::new());
    assert_eq!(orders.drop_errors.len(), 1);
    assert_eq!(orders.drop_errors[0].index_name, "title_text");
    assert_eq!(orders.drop_errors[0].message, "lock timeout");

    // The next collection is still fully remediated.
    let users = &report.collections[1];
    assert_eq!(users.dropped_names, vec!["name_text".to_string()]);
}

#[tokio::test]
async fn test_partial_failure_within_one_collection_is_isolated() {
    let store = MockStore::new()
        .with_collection(
            "posts",
            vec![
                primary_key(),
                text("title_text", "title"),
                text("body_text", "body"),
            ],
        )
        .with_drop_failure("posts", "title_text", "index in use");

    let report = run_audit(&store).await.expect("run should complete");

    let record = &report.collections[0];
    assert_eq!(record.dropped_names, vec!["body_text".to_string()]);
    assert_eq!(record.drop_errors.len(), 1);
    assert_eq!(record.drop_errors[0].index_name, "title_text");
    assert_eq!(record.outcome(), RemediationOutcome::Partial);
}

#[tokio::test]
async fn test_second_run_has_nothing_left_to_drop() {
    let store = MockStore::new()
        .with_collection("users", vec![primary_key(), text("name_text", "name")])
        .with_collection("logs", vec![primary_key(), ascending("ts_idx", "ts")]);

    let first = run_audit(&store).await.expect("first run");
    assert_eq!(first.total_dropped(), 1);

    let second = run_audit(&store).await.expect("second run");
    assert_eq!(second.total_dropped(), 0);
    for record in &second.collections {
        assert!(record.dropped_names.is_empty());
        assert!(record.drop_errors.is_empty());
        assert_eq!(record.disallowed_count(), 0);
    }
}

#[tokio::test]
async fn test_listing_failure_annotates_record_and_run_continues() {
    let store = MockStore::new()
        .with_collection("archive", vec![primary_key()])
        .with_listing_failure("archive", "cursor exhausted")
        .with_collection("users", vec![primary_key(), text("name_text", "name")]);

    let report = run_audit(&store).await.expect("run should complete");

    let archive = &report.collections[0];
    assert!(archive.indexes.is_empty());
    let note = archive.note.as_deref().expect("note should be set");
    assert!(note.contains("cursor exhausted"));

    let users = &report.collections[1];
    assert_eq!(users.dropped_names, vec!["name_text".to_string()]);

    assert_eq!(report.total_listing_failures(), 1);
    assert!(!report.is_clean());
}

#[tokio::test]
async fn test_unreachable_store_aborts_the_run() {
    let store = MockStore::new()
        .with_collection("users", vec![primary_key(), text("name_text", "name")])
        .unreachable();

    let err = run_audit(&store).await.expect_err("run should abort");
    assert!(matches!(err, Error::Connection(_)));
    assert!(store.drop_calls().is_empty());
}

#[tokio::test]
async fn test_report_preserves_discovery_order_and_classifications() {
    let store = MockStore::new()
        .with_collection("a", vec![primary_key()])
        .with_collection("b", vec![primary_key(), text("q_text", "q")])
        .with_collection("c", vec![primary_key(), ascending("k_idx", "k")]);

    let report = run_audit(&store).await.expect("run should complete");

    let names: Vec<&str> = report
        .collections
        .iter()
        .map(|record| record.collection_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let b = &report.collections[1];
    assert_eq!(b.indexes[0].classification, Classification::Allowed);
    assert_eq!(b.indexes[1].classification, Classification::DisallowedText);
}
