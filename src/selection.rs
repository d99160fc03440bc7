//! Multi-select and bulk delete for list views.
//!
//! A [`SelectionController`] owns the items a list view displays and the set
//! of ids the user has ticked. Bulk delete fans out one request per selected
//! id, waits for every one of them, and only then touches local state.

use crate::error::{ClientError, SelectionError};
use crate::models::{Group, GroupId, Note, NoteId};
use async_trait::async_trait;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

// ============================================================================
// Collection Contracts
// ============================================================================

/// Anything a list view can show and select.
pub trait ListItem: Clone + Send + Sync {
    type Id: Copy + Eq + Hash + Debug + Send + Sync;

    fn id(&self) -> Self::Id;
}

impl ListItem for Note {
    type Id = NoteId;

    fn id(&self) -> NoteId {
        self.id
    }
}

impl ListItem for Group {
    type Id = GroupId;

    fn id(&self) -> GroupId {
        self.id
    }
}

/// The authoritative remote copy of a collection.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    type Item: ListItem;

    /// Fetch the whole collection, in display order.
    async fn list(&self) -> Result<Vec<Self::Item>, ClientError>;

    /// Delete one item. Independent of any other delete in flight.
    async fn delete(&self, id: <Self::Item as ListItem>::Id) -> Result<(), ClientError>;
}

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug)]
pub enum BulkDeleteOutcome<Id> {
    /// Nothing was selected; no requests were made.
    Skipped,
    /// Every delete succeeded and the items were dropped locally.
    Deleted { count: usize },
    /// At least one delete failed; the collection was reloaded from the API.
    Reconciled {
        attempted: usize,
        failed: usize,
        failures: Vec<(Id, ClientError)>,
    },
}

impl<Id> BulkDeleteOutcome<Id> {
    pub fn failed(&self) -> usize {
        match self {
            BulkDeleteOutcome::Reconciled { failed, .. } => *failed,
            _ => 0,
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

#[derive(Debug, Clone)]
pub struct SelectionController<T: ListItem> {
    items: Vec<T>,
    selected: HashSet<T::Id>,
}

impl<T: ListItem> SelectionController<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            selected: HashSet::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> &HashSet<T::Id> {
        &self.selected
    }

    pub fn is_selected(&self, id: T::Id) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether the select-all control would currently clear the selection.
    pub fn all_selected(&self) -> bool {
        self.selected.len() == self.items.len()
    }

    fn contains(&self, id: T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Flip one id in or out of the selection. Ids that are not displayed
    /// are ignored so the selection never points at a missing item.
    pub fn toggle(&mut self, id: T::Id) {
        if !self.contains(id) {
            tracing::debug!(?id, "ignoring toggle for id not in view");
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.items.iter().map(T::id).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// The single select-all / deselect-all control: clears when everything
    /// is selected, selects everything otherwise.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    /// Drop an item after a confirmed single delete.
    pub fn remove_local(&mut self, id: T::Id) {
        self.items.retain(|item| item.id() != id);
        self.selected.remove(&id);
    }

    /// Replace the displayed items with a fresh list, pruning any selected
    /// id that no longer exists.
    pub fn replace_items(&mut self, items: Vec<T>) {
        let present: HashSet<T::Id> = items.iter().map(T::id).collect();
        self.selected.retain(|id| present.contains(id));
        self.items = items;
    }

    /// Delete every selected item concurrently.
    ///
    /// All requests are started together and all are awaited; a failure
    /// never cancels its siblings. If every delete succeeds the items are
    /// removed locally and the selection cleared. If any fails, local state
    /// is not guessed at: the collection is re-fetched and replaces `items`.
    pub async fn bulk_delete<C>(
        &mut self,
        remote: &C,
    ) -> Result<BulkDeleteOutcome<T::Id>, SelectionError>
    where
        C: RemoteCollection<Item = T> + ?Sized,
    {
        if self.selected.is_empty() {
            return Ok(BulkDeleteOutcome::Skipped);
        }

        // Display order, so request dispatch is deterministic.
        let targets: Vec<T::Id> = self
            .items
            .iter()
            .map(T::id)
            .filter(|id| self.selected.contains(id))
            .collect();
        let attempted = targets.len();
        tracing::info!(count = attempted, "bulk delete started");

        let results = join_all(targets.iter().map(|&id| async move { (id, remote.delete(id).await) })).await;

        let failures: Vec<(T::Id, ClientError)> = results
            .into_iter()
            .filter_map(|(id, result)| result.err().map(|e| (id, e)))
            .collect();

        if failures.is_empty() {
            let deleted: HashSet<T::Id> = targets.into_iter().collect();
            self.items.retain(|item| !deleted.contains(&item.id()));
            self.selected.clear();
            tracing::info!(count = attempted, "bulk delete finished");
            return Ok(BulkDeleteOutcome::Deleted { count: attempted });
        }

        let failed = failures.len();
        tracing::warn!(failed, attempted, "bulk delete partially failed, reloading");

        match remote.list().await {
            Ok(items) => {
                self.replace_items(items);
                Ok(BulkDeleteOutcome::Reconciled {
                    attempted,
                    failed,
                    failures,
                })
            }
            Err(source) => Err(SelectionError::Reconcile { failed, source }),
        }
    }
}
