//! Session - one play-through, from the splash screen to the accusation.
//!
//! The session owns the progression store, the timers, and whichever screen is
//! currently mounted. Which screen that is follows from the store alone:
//! loading incomplete → splash; on board → investigation board; otherwise →
//! case files. Every user action and every timer firing is followed by a
//! remount check, so leaving a screen always tears it down (cancelling its
//! timers and dropping its per-instance state).

use case_rules::CaseFile;
use std::time::Duration;
use thiserror::Error;

use crate::accusation::{suspect_options, AccusationError, AccusationForm, SuspectOption};
use crate::board::{BoardError, InvestigationBoard};
use crate::config::SessionConfig;
use crate::events::{Outcome, TimerTask, UserAction};
use crate::loading::LoadingGate;
use crate::progression::{ProgressionError, ProgressionSnapshot, ProgressionStore, SubscriptionId};
use crate::timers::{MountId, Timers};
use crate::viewer::{CaseFileViewer, NextAction, NextOutcome, Page, TabHeader};

/// The screen on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    CaseFiles,
    Board,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Accusation(#[from] AccusationError),
}

#[derive(Debug)]
enum Mounted {
    Loading(LoadingGate),
    CaseFiles(CaseFileViewer),
    Board(InvestigationBoard),
}

impl Mounted {
    fn screen(&self) -> Screen {
        match self {
            Mounted::Loading(_) => Screen::Loading,
            Mounted::CaseFiles(_) => Screen::CaseFiles,
            Mounted::Board(_) => Screen::Board,
        }
    }

    fn mount(&self) -> MountId {
        match self {
            Mounted::Loading(gate) => gate.mount(),
            Mounted::CaseFiles(viewer) => viewer.mount(),
            Mounted::Board(board) => board.mount(),
        }
    }

    fn teardown(&mut self, timers: &mut Timers<TimerTask>) {
        match self {
            Mounted::Loading(gate) => gate.teardown(timers),
            Mounted::CaseFiles(viewer) => viewer.teardown(timers),
            Mounted::Board(board) => {
                timers.cancel_owned_by(board.mount());
            }
        }
    }
}

/// A single play-through of a case.
#[derive(Debug)]
pub struct Session {
    case: CaseFile,
    config: SessionConfig,
    store: ProgressionStore,
    timers: Timers<TimerTask>,
    mounted: Mounted,
}

impl Session {
    /// Start a play-through on the splash screen.
    pub fn new(case: CaseFile, config: SessionConfig) -> Self {
        let store = ProgressionStore::for_case(&case);
        let mut timers = Timers::new();
        let gate = LoadingGate::mount_with(&mut timers, config.loading_delay());

        tracing::info!(case = case.case_number(), "session started");

        Self {
            case,
            config,
            store,
            timers,
            mounted: Mounted::Loading(gate),
        }
    }

    pub fn case(&self) -> &CaseFile {
        &self.case
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only view of the progression store.
    pub fn store(&self) -> &ProgressionStore {
        &self.store
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ProgressionSnapshot) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Time elapsed on the session clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn screen(&self) -> Screen {
        if !self.store.is_loading_complete() {
            Screen::Loading
        } else if self.store.is_on_board() {
            Screen::Board
        } else {
            Screen::CaseFiles
        }
    }

    pub fn viewer(&self) -> Option<&CaseFileViewer> {
        match &self.mounted {
            Mounted::CaseFiles(viewer) => Some(viewer),
            _ => None,
        }
    }

    pub fn board(&self) -> Option<&InvestigationBoard> {
        match &self.mounted {
            Mounted::Board(board) => Some(board),
            _ => None,
        }
    }

    pub fn tab_headers(&self) -> Vec<TabHeader<'_>> {
        self.viewer()
            .map(|viewer| viewer.tab_headers(&self.case, &self.store))
            .unwrap_or_default()
    }

    pub fn current_page(&self) -> Option<Page<'_>> {
        self.viewer()
            .and_then(|viewer| viewer.current_page(&self.case, &self.store))
    }

    pub fn next_action(&self) -> Option<NextAction> {
        self.viewer().map(|viewer| viewer.next_action(&self.store))
    }

    /// The accusation form, while it is open on the board.
    pub fn accusation(&self) -> Option<&AccusationForm> {
        self.board().and_then(|board| board.accusation())
    }

    pub fn suspect_options(&self) -> Vec<SuspectOption> {
        suspect_options(&self.case)
    }

    /// The full solution, once a correct accusation has been made.
    pub fn revealed_solution(&self) -> Option<&str> {
        self.accusation()
            .and_then(|form| form.revealed_solution(self.case.solution()))
    }

    /// Apply a user action to the mounted screen.
    ///
    /// Actions meant for another screen are ignored rather than rejected.
    pub fn dispatch(&mut self, action: UserAction) -> Result<Outcome, SessionError> {
        tracing::trace!(?action, "dispatch");

        let outcome = match &mut self.mounted {
            Mounted::Loading(_) => Outcome::Ignored,
            Mounted::CaseFiles(viewer) => {
                on_case_files(viewer, action, &mut self.store, &mut self.timers)
            }
            Mounted::Board(board) => on_board(board, action, &self.case, &mut self.store)?,
        };

        self.sync_mount()?;
        Ok(outcome)
    }

    /// Move the session clock forward, firing every timer that comes due.
    ///
    /// Returns the tasks that took effect. Timers whose component has been
    /// unmounted in the meantime are dropped.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Result<Vec<TimerTask>, SessionError> {
        let mut applied = Vec::new();

        for fired in self.timers.advance(elapsed) {
            if fired.owner != self.mounted.mount() {
                tracing::trace!(task = ?fired.task, "timer of unmounted component discarded");
                continue;
            }

            match (&mut self.mounted, fired.task) {
                (Mounted::Loading(gate), TimerTask::CompleteLoading) => {
                    gate.finish(&mut self.store);
                }
                (Mounted::CaseFiles(viewer), TimerTask::AdvanceChapter { target }) => {
                    viewer.complete_transition(target, &mut self.store)?;
                }
                (_, task) => {
                    tracing::warn!(?task, "timer task does not belong to its owner");
                    continue;
                }
            }

            applied.push(fired.task);
            self.sync_mount()?;
        }

        Ok(applied)
    }

    /// Mount the screen the store asks for, if it is not mounted already.
    fn sync_mount(&mut self) -> Result<(), SessionError> {
        let wanted = self.screen();
        if self.mounted.screen() == wanted {
            return Ok(());
        }

        let next = match wanted {
            Screen::Loading => Mounted::Loading(LoadingGate::mount_with(
                &mut self.timers,
                self.config.loading_delay(),
            )),
            Screen::CaseFiles => Mounted::CaseFiles(CaseFileViewer::new(
                &self.case,
                &self.store,
                self.config.transition_delay(),
                self.config.reveal,
            )),
            Screen::Board => Mounted::Board(InvestigationBoard::new(
                &self.case,
                self.config.note_seed,
            )?),
        };

        let mut previous = std::mem::replace(&mut self.mounted, next);
        previous.teardown(&mut self.timers);
        tracing::info!(from = ?previous.screen(), to = ?wanted, "screen changed");
        Ok(())
    }
}

fn on_case_files(
    viewer: &mut CaseFileViewer,
    action: UserAction,
    store: &mut ProgressionStore,
    timers: &mut Timers<TimerTask>,
) -> Outcome {
    match action {
        UserAction::SelectTab(tab) => {
            if viewer.select_tab(tab, store) {
                Outcome::Applied
            } else {
                Outcome::Ignored
            }
        }
        UserAction::PressNext => match viewer.press_next(store, timers) {
            NextOutcome::Scheduled { target, delay } => {
                Outcome::TransitionScheduled { target, delay }
            }
            NextOutcome::AlreadyPending => Outcome::Ignored,
            NextOutcome::OpenedBoard => Outcome::Applied,
        },
        _ => Outcome::Ignored,
    }
}

fn on_board(
    board: &mut InvestigationBoard,
    action: UserAction,
    case: &CaseFile,
    store: &mut ProgressionStore,
) -> Result<Outcome, SessionError> {
    let outcome = match action {
        UserAction::AddNote => Outcome::NoteAdded(board.add_note()?),
        UserAction::EditNote { note, text } => {
            board.edit_note(&note, text)?;
            Outcome::Applied
        }
        UserAction::MoveCard { card, position } => {
            board.move_card(&card, position)?;
            Outcome::Applied
        }
        UserAction::Connect { source, target } => Outcome::Connected(board.connect(source, target)?),
        UserAction::Disconnect(id) => {
            board.disconnect(id)?;
            Outcome::Applied
        }
        UserAction::RemoveNote(note) => {
            board.remove_note(&note)?;
            Outcome::Applied
        }
        UserAction::ReturnToFiles => {
            board.return_to_files(store);
            Outcome::Applied
        }
        UserAction::SolveCase => {
            board.open_accusation();
            Outcome::Applied
        }
        UserAction::CloseAccusation => {
            if !board.is_accusation_open() {
                return Ok(Outcome::Ignored);
            }
            board.close_accusation();
            Outcome::Applied
        }
        UserAction::SelectKiller(id) => match board.accusation_mut() {
            Some(form) => {
                form.select_killer(case, id)?;
                Outcome::Applied
            }
            None => Outcome::Ignored,
        },
        UserAction::EnterWeapon(text) => match board.accusation_mut() {
            Some(form) => {
                form.set_weapon(text)?;
                Outcome::Applied
            }
            None => Outcome::Ignored,
        },
        UserAction::EnterExplanation(text) => match board.accusation_mut() {
            Some(form) => {
                form.set_explanation(text)?;
                Outcome::Applied
            }
            None => Outcome::Ignored,
        },
        UserAction::SubmitAccusation => match board.accusation_mut() {
            Some(form) => Outcome::Verdict(form.submit(case.solution())?),
            None => Outcome::Ignored,
        },
        UserAction::RetryAccusation => match board.accusation_mut() {
            Some(form) => {
                form.retry()?;
                Outcome::Applied
            }
            None => Outcome::Ignored,
        },
        UserAction::SelectTab(_) | UserAction::PressNext => Outcome::Ignored,
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::TabId;

    fn session() -> Session {
        let config = SessionConfig {
            note_seed: Some(1),
            ..SessionConfig::default()
        };
        Session::new(CaseFile::builtin().unwrap(), config)
    }

    fn loaded() -> Session {
        let mut session = session();
        session.advance_clock(Duration::from_secs(2)).unwrap();
        session
    }

    #[test]
    fn test_starts_on_splash() {
        let mut session = session();

        assert_eq!(session.screen(), Screen::Loading);
        assert!(session.viewer().is_none());
        assert_eq!(
            session.dispatch(UserAction::PressNext).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_loading_opens_case_files() {
        let mut session = session();

        let applied = session.advance_clock(Duration::from_millis(1999)).unwrap();
        assert!(applied.is_empty());
        assert_eq!(session.screen(), Screen::Loading);

        let applied = session.advance_clock(Duration::from_millis(1)).unwrap();
        assert_eq!(applied, vec![TimerTask::CompleteLoading]);
        assert_eq!(session.screen(), Screen::CaseFiles);
        assert!(session.viewer().is_some());
        assert_eq!(session.next_action(), Some(NextAction::Next));
    }

    #[test]
    fn test_next_then_timer() {
        let mut session = loaded();

        let outcome = session.dispatch(UserAction::PressNext).unwrap();
        assert_eq!(
            outcome,
            Outcome::TransitionScheduled {
                target: TabId(1),
                delay: Duration::from_millis(600)
            }
        );

        let applied = session.advance_clock(Duration::from_millis(600)).unwrap();
        assert_eq!(applied, vec![TimerTask::AdvanceChapter { target: TabId(1) }]);
        assert_eq!(session.store().current_tab(), TabId(1));
    }

    #[test]
    fn test_board_actions_ignored_on_case_files() {
        let mut session = loaded();

        assert_eq!(session.dispatch(UserAction::AddNote).unwrap(), Outcome::Ignored);
        assert_eq!(
            session.dispatch(UserAction::SubmitAccusation).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_locked_tab_ignored() {
        let mut session = loaded();

        assert_eq!(
            session.dispatch(UserAction::SelectTab(TabId(3))).unwrap(),
            Outcome::Ignored
        );
        assert_eq!(session.store().current_tab(), TabId(0));
    }

    #[test]
    fn test_accusation_actions_need_open_form() {
        let mut session = loaded();
        for _ in 0..4 {
            session.dispatch(UserAction::PressNext).unwrap();
            session.advance_clock(Duration::from_millis(600)).unwrap();
        }
        session.dispatch(UserAction::PressNext).unwrap();
        assert_eq!(session.screen(), Screen::Board);

        assert_eq!(
            session
                .dispatch(UserAction::EnterWeapon("book".into()))
                .unwrap(),
            Outcome::Ignored
        );

        session.dispatch(UserAction::SolveCase).unwrap();
        assert!(matches!(
            session.dispatch(UserAction::SubmitAccusation),
            Err(SessionError::Accusation(AccusationError::IncompleteForm))
        ));
    }
}
