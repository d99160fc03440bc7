//! Tests for the selection controller and bulk delete.

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: i64,
    title: &'static str,
}

impl ListItem for Row {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

fn rows(ids: &[i64]) -> Vec<Row> {
    ids.iter().map(|&id| Row { id, title: "row" }).collect()
}

fn ids(items: &[Row]) -> Vec<i64> {
    items.iter().map(|r| r.id).collect()
}

/// In-memory remote that fails deletes for chosen ids and counts calls.
struct FakeRemote {
    items: Mutex<Vec<Row>>,
    failing: HashSet<i64>,
    list_fails: bool,
    list_calls: AtomicUsize,
    delete_calls: Mutex<Vec<i64>>,
}

impl FakeRemote {
    fn new(ids: &[i64]) -> Self {
        Self {
            items: Mutex::new(rows(ids)),
            failing: HashSet::new(),
            list_fails: false,
            list_calls: AtomicUsize::new(0),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(mut self, ids: &[i64]) -> Self {
        self.failing = ids.iter().copied().collect();
        self
    }

    fn with_broken_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn delete_calls(&self) -> Vec<i64> {
        let mut calls = self.delete_calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl RemoteCollection for FakeRemote {
    type Item = Row;

    async fn list(&self) -> Result<Vec<Row>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(ClientError::Api {
                status: 500,
                detail: "Failed to fetch notes".to_string(),
            });
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.delete_calls.lock().unwrap().push(id);
        if self.failing.contains(&id) {
            return Err(ClientError::Api {
                status: 500,
                detail: "Failed to delete note".to_string(),
            });
        }
        self.items.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

fn controller(ids: &[i64]) -> SelectionController<Row> {
    SelectionController::new(rows(ids))
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_toggle_flips_membership() {
    let mut c = controller(&[1, 2, 3]);
    c.toggle(2);
    assert!(c.is_selected(2));
    c.toggle(2);
    assert!(!c.is_selected(2));
}

#[test]
fn test_toggle_ignores_unknown_id() {
    let mut c = controller(&[1, 2]);
    c.toggle(9);
    assert_eq!(c.selected_count(), 0);
}

#[test]
fn test_remove_local_prunes_selection() {
    let mut c = controller(&[1, 2, 3]);
    c.toggle(3);
    c.remove_local(3);
    assert!(!c.is_selected(3));
    assert_eq!(ids(c.items()), vec![1, 2]);
}

#[test]
fn test_remove_local_unselected_keeps_other_selection() {
    let mut c = controller(&[1, 2, 3]);
    c.toggle(1);
    c.remove_local(2);
    assert_eq!(c.selected().iter().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_toggle_all_direction_follows_cardinality() {
    let mut c = controller(&[1, 2, 3]);
    c.toggle(1);
    c.toggle_all();
    assert_eq!(c.selected_count(), 3);
    assert!(c.all_selected());
    c.toggle_all();
    assert_eq!(c.selected_count(), 0);
}

#[test]
fn test_toggle_all_twice_restores_full_and_empty_selection() {
    let mut empty = controller(&[1, 2]);
    empty.toggle_all();
    empty.toggle_all();
    assert!(empty.selected().is_empty());

    let mut full = controller(&[1, 2]);
    full.select_all();
    let before = full.selected().clone();
    full.toggle_all();
    full.toggle_all();
    assert_eq!(full.selected(), &before);
}

#[test]
fn test_empty_view_counts_as_all_selected() {
    let mut c = controller(&[]);
    assert!(c.all_selected());
    c.toggle_all();
    assert_eq!(c.selected_count(), 0);
}

#[test]
fn test_replace_items_prunes_missing_ids() {
    let mut c = controller(&[1, 2, 3]);
    c.select_all();
    c.replace_items(rows(&[2, 4]));
    assert_eq!(c.selected().iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(ids(c.items()), vec![2, 4]);
}

// ============================================================================
// Bulk Delete
// ============================================================================

#[tokio::test]
async fn test_bulk_delete_with_empty_selection_is_noop() {
    let remote = FakeRemote::new(&[1, 2]);
    let mut c = controller(&[1, 2]);

    let outcome = c.bulk_delete(&remote).await.unwrap();

    assert!(matches!(outcome, BulkDeleteOutcome::Skipped));
    assert!(remote.delete_calls().is_empty());
    assert_eq!(remote.list_calls(), 0);
}

#[tokio::test]
async fn test_bulk_delete_all_succeed_removes_locally_without_reload() {
    let remote = FakeRemote::new(&[1, 2, 3, 4]);
    let mut c = controller(&[1, 2, 3, 4]);
    for id in [1, 2, 3] {
        c.toggle(id);
    }

    let outcome = c.bulk_delete(&remote).await.unwrap();

    assert!(matches!(outcome, BulkDeleteOutcome::Deleted { count: 3 }));
    assert_eq!(ids(c.items()), vec![4]);
    assert!(c.selected().is_empty());
    assert_eq!(remote.delete_calls(), vec![1, 2, 3]);
    assert_eq!(remote.list_calls(), 0);
}

#[tokio::test]
async fn test_bulk_delete_keeps_survivor_order() {
    let remote = FakeRemote::new(&[5, 1, 4, 2, 3]);
    let mut c = controller(&[5, 1, 4, 2, 3]);
    c.toggle(1);
    c.toggle(2);

    c.bulk_delete(&remote).await.unwrap();

    assert_eq!(ids(c.items()), vec![5, 4, 3]);
}

#[tokio::test]
async fn test_bulk_delete_partial_failure_reloads_instead_of_trimming() {
    let remote = FakeRemote::new(&[1, 2, 3]).failing(&[2]);
    let mut c = controller(&[1, 2, 3]);
    c.select_all();

    let outcome = c.bulk_delete(&remote).await.unwrap();

    // Every delete was attempted despite the failure.
    assert_eq!(remote.delete_calls(), vec![1, 2, 3]);
    assert_eq!(remote.list_calls(), 1);
    assert_eq!(outcome.failed(), 1);
    match outcome {
        BulkDeleteOutcome::Reconciled {
            attempted,
            failed,
            failures,
        } => {
            assert_eq!(attempted, 3);
            assert_eq!(failed, 1);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, 2);
            assert_eq!(failures[0].1.to_string(), "Failed to delete note");
        }
        other => panic!("expected reconciliation, got {:?}", other),
    }
    // Local state is the reloaded remote truth, with the selection pruned.
    assert_eq!(ids(c.items()), vec![2]);
    assert_eq!(c.selected().iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn test_bulk_delete_reload_failure_leaves_state_untouched() {
    let remote = FakeRemote::new(&[1, 2, 3]).failing(&[1]).with_broken_list();
    let mut c = controller(&[1, 2, 3]);
    c.toggle(1);
    c.toggle(3);

    let err = c.bulk_delete(&remote).await.unwrap_err();

    assert!(matches!(err, SelectionError::Reconcile { failed: 1, .. }));
    assert_eq!(ids(c.items()), vec![1, 2, 3]);
    assert_eq!(c.selected_count(), 2);
}

#[tokio::test]
async fn test_bulk_delete_dispatches_concurrently() {
    use std::sync::Arc;
    use tokio::sync::Barrier;

    /// Each delete waits until all of them have started; a sequential
    /// dispatcher would deadlock here.
    struct Gate {
        barrier: Arc<Barrier>,
    }

    #[async_trait]
    impl RemoteCollection for Gate {
        type Item = Row;

        async fn list(&self) -> Result<Vec<Row>, ClientError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: i64) -> Result<(), ClientError> {
            self.barrier.wait().await;
            Ok(())
        }
    }

    let remote = Gate {
        barrier: Arc::new(Barrier::new(3)),
    };
    let mut c = controller(&[1, 2, 3]);
    c.select_all();

    let outcome = tokio::time::timeout(std::time::Duration::from_secs(5), c.bulk_delete(&remote))
        .await
        .expect("deletes should run concurrently")
        .unwrap();
    assert!(matches!(outcome, BulkDeleteOutcome::Deleted { count: 3 }));
}

#[tokio::test]
async fn test_controller_works_over_notes() {
    use crate::models::Note;
    use chrono::Utc;

    let note = |id: i64| Note {
        id,
        title: format!("note {}", id),
        content: String::new(),
        user_id: None,
        group_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        references: Default::default(),
    };
    let mut c = SelectionController::new(vec![note(1), note(2)]);
    c.toggle(2);
    c.remove_local(2);
    assert_eq!(c.items().len(), 1);
    assert!(c.selected().is_empty());
}
