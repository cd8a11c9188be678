//! Loading gate - the splash screen that opens the case file.

use std::time::Duration;

use crate::events::TimerTask;
use crate::progression::ProgressionStore;
use crate::timers::{MountId, Timers};

/// One mounted splash screen. Completes loading once, after a fixed delay.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    mount: MountId,
}

impl LoadingGate {
    /// Mount the splash screen and start its countdown.
    pub fn mount_with(timers: &mut Timers<TimerTask>, delay: Duration) -> Self {
        let mount = MountId::new();
        timers.schedule(mount, delay, TimerTask::CompleteLoading);
        tracing::debug!(?delay, "loading gate mounted");
        Self { mount }
    }

    pub fn mount(&self) -> MountId {
        self.mount
    }

    /// The countdown ran out.
    pub fn finish(&self, store: &mut ProgressionStore) {
        store.complete_loading();
    }

    pub fn teardown(&self, timers: &mut Timers<TimerTask>) {
        timers.cancel_owned_by(self.mount);
    }
}
