//! Progression store - the single source of truth for how far the player got.
//!
//! All mutation goes through the four named operations ([`ProgressionStore::advance_to`],
//! [`ProgressionStore::unlock`], [`ProgressionStore::complete_loading`] and
//! [`ProgressionStore::set_on_board`]). Readers either query the store directly or
//! subscribe to change notifications.

use case_rules::{CaseFile, TabId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("chapter {0} does not exist")]
    UnknownTab(TabId),

    #[error("chapter {0} is still locked")]
    TabLocked(TabId),
}

/// A point-in-time copy of the progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub current_tab: TabId,
    /// Ascending.
    pub unlocked_tabs: Vec<TabId>,
    pub loading_complete: bool,
    pub on_board: bool,
}

impl ProgressionSnapshot {
    /// Serialize for a rendering layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Handle returned by [`ProgressionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

type Listener = Box<dyn FnMut(&ProgressionSnapshot)>;

/// Session-wide progression state.
///
/// Invariants:
/// - the first chapter is always unlocked;
/// - the unlocked set only ever grows;
/// - the current chapter is always unlocked;
/// - loading, once complete, stays complete.
pub struct ProgressionStore {
    tab_count: usize,
    current_tab: TabId,
    unlocked: BTreeSet<TabId>,
    loading_complete: bool,
    on_board: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ProgressionStore {
    /// Create the initial state for a case with `tab_count` chapters.
    pub fn new(tab_count: usize) -> Self {
        Self {
            tab_count: tab_count.max(1),
            current_tab: TabId::FIRST,
            unlocked: BTreeSet::from([TabId::FIRST]),
            loading_complete: false,
            on_board: false,
            listeners: Vec::new(),
        }
    }

    pub fn for_case(case: &CaseFile) -> Self {
        Self::new(case.tab_count())
    }

    pub fn current_tab(&self) -> TabId {
        self.current_tab
    }

    pub fn is_unlocked(&self, tab: TabId) -> bool {
        self.unlocked.contains(&tab)
    }

    /// Unlocked chapters, ascending.
    pub fn unlocked_tabs(&self) -> impl Iterator<Item = TabId> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn is_loading_complete(&self) -> bool {
        self.loading_complete
    }

    pub fn is_on_board(&self) -> bool {
        self.on_board
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            current_tab: self.current_tab,
            unlocked_tabs: self.unlocked.iter().copied().collect(),
            loading_complete: self.loading_complete,
            on_board: self.on_board,
        }
    }

    /// Navigate to `tab`. The chapter must already be unlocked.
    pub fn advance_to(&mut self, tab: TabId) -> Result<(), ProgressionError> {
        self.check_exists(tab)?;
        if !self.is_unlocked(tab) {
            return Err(ProgressionError::TabLocked(tab));
        }
        if self.current_tab != tab {
            tracing::debug!(from = %self.current_tab, to = %tab, "chapter changed");
            self.current_tab = tab;
            self.notify();
        }
        Ok(())
    }

    /// Unlock `tab`. Unlocking an already unlocked chapter is a no-op.
    ///
    /// Returns whether the chapter was newly unlocked. Ordering is not enforced
    /// here; the case file viewer only ever unlocks the next chapter.
    pub fn unlock(&mut self, tab: TabId) -> Result<bool, ProgressionError> {
        self.check_exists(tab)?;
        let added = self.unlocked.insert(tab);
        if added {
            tracing::info!(chapter = %tab, "chapter unlocked");
            self.notify();
        }
        Ok(added)
    }

    /// Latch loading as complete.
    pub fn complete_loading(&mut self) {
        if !self.loading_complete {
            tracing::info!("loading complete");
            self.loading_complete = true;
            self.notify();
        }
    }

    /// Enter or leave board mode.
    pub fn set_on_board(&mut self, value: bool) {
        if self.on_board != value {
            tracing::info!(on_board = value, "board mode changed");
            self.on_board = value;
            self.notify();
        }
    }

    /// Register a listener called with a fresh snapshot after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressionSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }

    fn check_exists(&self, tab: TabId) -> Result<(), ProgressionError> {
        if tab.index() < self.tab_count {
            Ok(())
        } else {
            Err(ProgressionError::UnknownTab(tab))
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl std::fmt::Debug for ProgressionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionStore")
            .field("tab_count", &self.tab_count)
            .field("current_tab", &self.current_tab)
            .field("unlocked", &self.unlocked)
            .field("loading_complete", &self.loading_complete)
            .field("on_board", &self.on_board)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_state() {
        let store = ProgressionStore::new(5);

        assert_eq!(store.current_tab(), TabId(0));
        assert_eq!(store.unlocked_tabs().collect::<Vec<_>>(), vec![TabId(0)]);
        assert!(!store.is_loading_complete());
        assert!(!store.is_on_board());
        for tab in 1..5 {
            assert!(!store.is_unlocked(TabId(tab)));
        }
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut once = ProgressionStore::new(5);
        let mut twice = ProgressionStore::new(5);

        assert!(once.unlock(TabId(2)).unwrap());
        assert!(twice.unlock(TabId(2)).unwrap());
        assert!(!twice.unlock(TabId(2)).unwrap());

        assert_eq!(once.snapshot(), twice.snapshot());
        assert_eq!(twice.snapshot().unlocked_tabs, vec![TabId(0), TabId(2)]);
    }

    #[test]
    fn test_unlock_does_not_enforce_order() {
        let mut store = ProgressionStore::new(5);
        store.unlock(TabId(4)).unwrap();

        assert!(store.is_unlocked(TabId(4)));
        assert!(!store.is_unlocked(TabId(1)));
    }

    #[test]
    fn test_unknown_tab_rejected() {
        let mut store = ProgressionStore::new(5);

        assert_eq!(store.unlock(TabId(5)), Err(ProgressionError::UnknownTab(TabId(5))));
        assert_eq!(
            store.advance_to(TabId(9)),
            Err(ProgressionError::UnknownTab(TabId(9)))
        );
    }

    #[test]
    fn test_advance_to_locked_tab_rejected() {
        let mut store = ProgressionStore::new(5);

        assert_eq!(
            store.advance_to(TabId(1)),
            Err(ProgressionError::TabLocked(TabId(1)))
        );
        assert_eq!(store.current_tab(), TabId(0));

        store.unlock(TabId(1)).unwrap();
        store.advance_to(TabId(1)).unwrap();
        assert_eq!(store.current_tab(), TabId(1));
    }

    #[test]
    fn test_complete_loading_latches() {
        let mut store = ProgressionStore::new(5);

        store.complete_loading();
        store.complete_loading();
        store.complete_loading();

        assert!(store.is_loading_complete());
    }

    #[test]
    fn test_set_on_board_toggles_freely() {
        let mut store = ProgressionStore::new(5);

        store.set_on_board(true);
        assert!(store.is_on_board());
        store.set_on_board(false);
        assert!(!store.is_on_board());
        store.set_on_board(true);
        assert!(store.is_on_board());
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let mut store = ProgressionStore::new(5);
        let seen: Rc<RefCell<Vec<ProgressionSnapshot>>> = Rc::default();

        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

        store.unlock(TabId(1)).unwrap();
        store.unlock(TabId(1)).unwrap();
        store.advance_to(TabId(1)).unwrap();
        store.advance_to(TabId(1)).unwrap();
        store.complete_loading();
        store.complete_loading();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].current_tab, TabId(1));
        assert!(seen[2].loading_complete);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = ProgressionStore::new(5);
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.set_on_board(true);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_on_board(false);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut store = ProgressionStore::new(5);
        store.unlock(TabId(1)).unwrap();

        let json = store.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["current_tab"], 0);
        assert_eq!(value["unlocked_tabs"], serde_json::json!([0, 1]));
        assert_eq!(value["on_board"], false);
    }
}
