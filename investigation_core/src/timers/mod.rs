//! One-shot timers driven by an explicit clock.
//!
//! Every timer belongs to a mount - one lifetime of a screen component. When
//! the component goes away its timers are cancelled, so a late firing can
//! never touch state that no longer exists.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Identity of one mounted screen component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountId(pub Uuid);

impl MountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    owner: MountId,
    due: Duration,
    task: T,
}

/// A timer that came due during [`Timers::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub owner: MountId,
    pub task: T,
}

/// Scheduler of one-shot tasks against a virtual clock.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` from now, on behalf of `owner`.
    pub fn schedule(&mut self, owner: MountId, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now.checked_add(delay).unwrap_or(Duration::MAX);
        tracing::trace!(timer = id.0, %owner, ?due, "timer scheduled");

        self.pending.push(Scheduled {
            id,
            owner,
            due,
            task,
        });
        id
    }

    /// Cancel a single timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        before != self.pending.len()
    }

    /// Cancel everything scheduled by `owner`. Returns how many timers were dropped.
    pub fn cancel_owned_by(&mut self, owner: MountId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|s| s.owner != owner);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            tracing::debug!(%owner, dropped, "cancelled timers of unmounted component");
        }
        dropped
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and hand back every timer that came due,
    /// earliest first. Ties fire in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Fired<T>> {
        self.now = self.now.checked_add(elapsed).unwrap_or(Duration::MAX);

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = waiting;

        due.sort_by_key(|s| (s.due, s.id));
        due.into_iter()
            .map(|s| Fired {
                id: s.id,
                owner: s.owner,
                task: s.task,
            })
            .collect()
    }
}
