//! Case file viewer - sequential chapter reading gated by the progression store.
//!
//! The viewer drives three transitions:
//! 1. **Next**: on a non-final chapter, after a short pause, unlock the following
//!    chapter and move to it
//! 2. **Finish**: on the final chapter, switch the session into board mode
//! 3. **Select**: jump to any chapter that is already unlocked; locked ones are inert
//!
//! It also remembers which chapters were read and left, so returning to them
//! shows the text at once instead of replaying the typewriter reveal.

mod reveal;

pub use reveal::*;

use case_rules::{CaseFile, TabContent, TabId};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::events::TimerTask;
use crate::progression::{ProgressionError, ProgressionStore};
use crate::timers::{MountId, Timers};

/// What the "Next" button does on the current chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Next,
    OpenBoard,
}

/// Result of pressing "Next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// The following chapter unlocks once the timer fires.
    Scheduled { target: TabId, delay: Duration },
    /// A transition is already under way.
    AlreadyPending,
    /// The final chapter was finished; board mode is on.
    OpenedBoard,
}

/// Display state of a chapter header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Active,
    Unlocked,
    /// `pulsing` is set while this chapter is about to unlock.
    Locked { pulsing: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHeader<'a> {
    pub id: TabId,
    pub title: &'a str,
    pub state: TabState,
}

impl TabHeader<'_> {
    pub fn is_clickable(&self) -> bool {
        !matches!(self.state, TabState::Locked { .. })
    }
}

/// The chapter currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub tab: TabId,
    pub content: &'a TabContent,
    pub reveal: RevealPlan,
}

/// One mounted instance of the case file screen.
///
/// Read-tracking lives and dies with the instance: leaving for the board and
/// coming back starts with a clean slate.
#[derive(Debug, Clone)]
pub struct CaseFileViewer {
    mount: MountId,
    last_tab: TabId,
    transition_delay: Duration,
    reveal: RevealTiming,

    /// Chapter on screen as of the last observation of the store.
    shown_tab: TabId,

    /// Chapters that were displayed and then left.
    visited: BTreeSet<TabId>,

    /// Target of the transition waiting on its timer.
    pending: Option<TabId>,
}

impl CaseFileViewer {
    pub fn new(
        case: &CaseFile,
        store: &ProgressionStore,
        transition_delay: Duration,
        reveal: RevealTiming,
    ) -> Self {
        Self {
            mount: MountId::new(),
            last_tab: case.last_tab(),
            transition_delay,
            reveal,
            shown_tab: store.current_tab(),
            visited: BTreeSet::new(),
            pending: None,
        }
    }

    pub fn mount(&self) -> MountId {
        self.mount
    }

    /// Press "Next" (or "Finish" on the last chapter).
    pub fn press_next(
        &mut self,
        store: &mut ProgressionStore,
        timers: &mut Timers<TimerTask>,
    ) -> NextOutcome {
        let current = store.current_tab();

        if current >= self.last_tab {
            store.set_on_board(true);
            return NextOutcome::OpenedBoard;
        }

        if self.pending.is_some() {
            return NextOutcome::AlreadyPending;
        }

        let target = current.next();
        timers.schedule(
            self.mount,
            self.transition_delay,
            TimerTask::AdvanceChapter { target },
        );
        self.pending = Some(target);
        tracing::debug!(%target, delay = ?self.transition_delay, "chapter transition scheduled");

        NextOutcome::Scheduled {
            target,
            delay: self.transition_delay,
        }
    }

    /// Finish a transition started by [`CaseFileViewer::press_next`].
    pub fn complete_transition(
        &mut self,
        target: TabId,
        store: &mut ProgressionStore,
    ) -> Result<(), ProgressionError> {
        if self.pending == Some(target) {
            self.pending = None;
        }
        store.unlock(target)?;
        store.advance_to(target)?;
        self.observe(store);
        Ok(())
    }

    /// Click a chapter header. Returns false when the chapter is locked or unknown.
    pub fn select_tab(&mut self, tab: TabId, store: &mut ProgressionStore) -> bool {
        if !store.is_unlocked(tab) {
            tracing::trace!(chapter = %tab, "locked chapter clicked");
            return false;
        }
        match store.advance_to(tab) {
            Ok(()) => {
                self.observe(store);
                true
            }
            Err(_) => false,
        }
    }

    /// Catch up with the store: leaving a chapter marks it as read.
    pub fn observe(&mut self, store: &ProgressionStore) {
        let current = store.current_tab();
        if current != self.shown_tab {
            if self.visited.insert(self.shown_tab) {
                tracing::trace!(chapter = %self.shown_tab, "chapter marked as read");
            }
            self.shown_tab = current;
        }
    }

    /// Cancel anything this viewer still has scheduled.
    pub fn teardown(&mut self, timers: &mut Timers<TimerTask>) {
        timers.cancel_owned_by(self.mount);
        self.pending = None;
    }

    pub fn is_visited(&self, tab: TabId) -> bool {
        self.visited.contains(&tab)
    }

    pub fn visited_tabs(&self) -> impl Iterator<Item = TabId> + '_ {
        self.visited.iter().copied()
    }

    /// Chapter that will unlock when the pending transition fires.
    pub fn pending_target(&self) -> Option<TabId> {
        self.pending
    }

    pub fn reveal_for(&self, tab: TabId) -> RevealPlan {
        if self.is_visited(tab) {
            RevealPlan::Immediate
        } else {
            RevealPlan::animated(self.reveal)
        }
    }

    pub fn next_action(&self, store: &ProgressionStore) -> NextAction {
        if store.current_tab() >= self.last_tab {
            NextAction::OpenBoard
        } else {
            NextAction::Next
        }
    }

    pub fn current_page<'a>(&self, case: &'a CaseFile, store: &ProgressionStore) -> Option<Page<'a>> {
        let tab = store.current_tab();
        case.content(tab).map(|content| Page {
            tab,
            content,
            reveal: self.reveal_for(tab),
        })
    }

    pub fn tab_headers<'a>(&self, case: &'a CaseFile, store: &ProgressionStore) -> Vec<TabHeader<'a>> {
        let pulsing = self.pending_target();
        case.tabs()
            .iter()
            .map(|tab| {
                let state = if tab.id == store.current_tab() {
                    TabState::Active
                } else if store.is_unlocked(tab.id) {
                    TabState::Unlocked
                } else {
                    TabState::Locked {
                        pulsing: pulsing == Some(tab.id),
                    }
                };
                TabHeader {
                    id: tab.id,
                    title: &tab.title,
                    state,
                }
            })
            .collect()
    }
}
