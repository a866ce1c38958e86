//! View state for the dashboard: the load/submit state machine, the shared
//! read-through cache of the last full fetch, and the per-session set of
//! expanded parent rows.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

/// Lifecycle of the locally held category collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CategoryViewState {
    #[default]
    Idle,
    /// A full fetch is in flight.
    Loading,
    /// Result of the last full fetch, served until the next reload
    /// replaces it wholesale.
    Loaded(Vec<Category>),
    /// A mutation is in flight; the previous collection is retained so a
    /// failed submit falls back to it.
    Submitting(Vec<Category>),
    /// The last fetch failed; carries the surfaced message.
    Error(String),
}

impl CategoryViewState {
    /// The collection currently available for rendering, if any.
    pub fn categories(&self) -> Option<&[Category]> {
        match self {
            Self::Loaded(categories) | Self::Submitting(categories) => Some(categories),
            _ => None,
        }
    }
}

/// Shared store holding the view state across request handlers.
///
/// State is replaced wholesale, so when overlapping reloads race the last
/// response to resolve wins; nothing is coordinated or cancelled.
#[derive(Default)]
pub struct CategoryStore {
    state: RwLock<CategoryViewState>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CategoryViewState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The cached collection, when one is loaded.
    pub fn loaded(&self) -> Option<Vec<Category>> {
        self.snapshot().categories().map(<[Category]>::to_vec)
    }

    fn replace(&self, next: CategoryViewState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// `Idle/Error → Loading`; a refresh re-enters from `Loaded` too.
    pub fn begin_load(&self) {
        self.replace(CategoryViewState::Loading);
    }

    pub fn finish_load(&self, outcome: Result<Vec<Category>, String>) {
        self.replace(match outcome {
            Ok(categories) => CategoryViewState::Loaded(categories),
            Err(message) => CategoryViewState::Error(message),
        });
    }

    /// `Loaded → Submitting`, keeping the current collection.
    pub fn begin_submit(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let CategoryViewState::Loaded(categories) = &*state {
            *state = CategoryViewState::Submitting(categories.clone());
        }
    }

    /// `Submitting → Loaded`: the mutation failed and the previous
    /// collection stays untouched.
    pub fn rollback_submit(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let CategoryViewState::Submitting(categories) = &*state {
            *state = CategoryViewState::Loaded(categories.clone());
        }
    }
}

/// Per-session set of expanded parent-category rows.
///
/// Stored in the cookie session and pruned against the loaded collection at
/// render time, so ids absent after a reload disappear implicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedNodes(BTreeSet<CategoryId>);

impl ExpandedNodes {
    /// Flips the expansion of one row; returns the new expanded flag.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.0.contains(&id)
    }

    /// Drops ids no longer present in `categories`.
    pub fn prune(&mut self, categories: &[Category]) {
        let live: BTreeSet<CategoryId> = categories.iter().map(|c| c.id).collect();
        self.0.retain(|id| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::ParentLinks;
    use crate::domain::types::{CategoryName, ShortDescription};

    fn category(id: i64) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(format!("Category {id}")).unwrap(),
            short_description: ShortDescription::new("A shelf").unwrap(),
            long_description: None,
            cover_image: None,
            parents: ParentLinks::Root,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn load_cycle_reaches_loaded() {
        let store = CategoryStore::new();
        assert_eq!(store.snapshot(), CategoryViewState::Idle);

        store.begin_load();
        assert_eq!(store.snapshot(), CategoryViewState::Loading);

        store.finish_load(Ok(vec![category(1)]));
        assert!(matches!(store.snapshot(), CategoryViewState::Loaded(c) if c.len() == 1));
    }

    #[test]
    fn failed_load_surfaces_the_message() {
        let store = CategoryStore::new();
        store.begin_load();
        store.finish_load(Err("network unavailable".to_string()));
        assert_eq!(
            store.snapshot(),
            CategoryViewState::Error("network unavailable".to_string())
        );
    }

    #[test]
    fn failed_submit_falls_back_to_the_previous_collection() {
        let store = CategoryStore::new();
        store.finish_load(Ok(vec![category(1), category(2)]));

        store.begin_submit();
        assert!(matches!(store.snapshot(), CategoryViewState::Submitting(_)));

        store.rollback_submit();
        let CategoryViewState::Loaded(categories) = store.snapshot() else {
            panic!("expected Loaded");
        };
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn last_finished_load_wins() {
        let store = CategoryStore::new();
        store.begin_load();
        store.begin_load();
        store.finish_load(Ok(vec![category(1)]));
        store.finish_load(Ok(vec![category(2)]));

        let loaded = store.loaded().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }

    #[test]
    fn toggle_expands_then_collapses() {
        let mut expanded = ExpandedNodes::default();
        let id = CategoryId::new(1).unwrap();
        assert!(expanded.toggle(id));
        assert!(expanded.contains(id));
        assert!(!expanded.toggle(id));
        assert!(expanded.is_empty());
    }

    #[test]
    fn prune_drops_ids_missing_after_a_reload() {
        let mut expanded = ExpandedNodes::default();
        expanded.toggle(CategoryId::new(1).unwrap());
        expanded.toggle(CategoryId::new(9).unwrap());

        expanded.prune(&[category(1)]);

        assert!(expanded.contains(CategoryId::new(1).unwrap()));
        assert!(!expanded.contains(CategoryId::new(9).unwrap()));
        assert_eq!(expanded.len(), 1);
    }
}
