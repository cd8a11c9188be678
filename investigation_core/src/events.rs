//! Events flowing into the session: user actions, their outcomes, and timer tasks.

use case_rules::{SuspectId, TabId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::accusation::Verdict;
use crate::board::{CardId, ConnectionId, Position};

/// Something the player did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    // Case files
    SelectTab(TabId),
    PressNext,

    // Investigation board
    AddNote,
    EditNote { note: CardId, text: String },
    MoveCard { card: CardId, position: Position },
    Connect { source: CardId, target: CardId },
    Disconnect(ConnectionId),
    RemoveNote(CardId),
    ReturnToFiles,
    SolveCase,

    // Accusation form
    SelectKiller(SuspectId),
    EnterWeapon(String),
    EnterExplanation(String),
    SubmitAccusation,
    RetryAccusation,
    CloseAccusation,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// The action does not apply right now (locked tab, wrong screen, ...).
    Ignored,
    /// A chapter transition will complete after `delay`.
    TransitionScheduled { target: TabId, delay: Duration },
    NoteAdded(CardId),
    Connected(ConnectionId),
    Verdict(Verdict),
}

/// Work deferred by a one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// The splash screen has been shown long enough.
    CompleteLoading,
    /// Unlock `target` and navigate to it.
    AdvanceChapter { target: TabId },
}
