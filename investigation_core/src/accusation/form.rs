//! The accusation form and its result screen.

use case_rules::{CaseFile, Solution, SuspectId};
use thiserror::Error;

use super::{evaluate, Verdict};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccusationError {
    /// Submitting needs a killer, a weapon and an explanation.
    #[error("the accusation form is incomplete")]
    IncompleteForm,

    #[error("`{0}` is not one of the suspects")]
    UnknownSuspect(SuspectId),

    #[error("the form is showing a verdict and cannot be edited")]
    NotEditing,

    #[error("only a wrong accusation can be retried")]
    NothingToRetry,
}

/// Where the form is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Answered(Verdict),
}

/// One entry of the suspect picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspectOption {
    pub id: SuspectId,
    pub label: String,
}

/// List the suspects as the picker shows them.
pub fn suspect_options(case: &CaseFile) -> Vec<SuspectOption> {
    case.suspects()
        .iter()
        .map(|s| SuspectOption {
            id: s.id.clone(),
            label: s.option_label(),
        })
        .collect()
}

/// A single accusation attempt.
///
/// Closing the form, from any phase, clears every field so the next opening
/// cannot mix answers from an earlier attempt.
#[derive(Debug, Clone, Default)]
pub struct AccusationForm {
    killer: Option<SuspectId>,
    weapon: String,
    explanation: String,
    verdict: Option<Verdict>,
}

impl AccusationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        match self.verdict {
            Some(verdict) => FormPhase::Answered(verdict),
            None => FormPhase::Editing,
        }
    }

    pub fn killer(&self) -> Option<&SuspectId> {
        self.killer.as_ref()
    }

    pub fn weapon(&self) -> &str {
        &self.weapon
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_blank(&self) -> bool {
        self.killer.is_none()
            && self.weapon.is_empty()
            && self.explanation.is_empty()
            && self.verdict.is_none()
    }

    pub fn select_killer(&mut self, case: &CaseFile, id: SuspectId) -> Result<(), AccusationError> {
        self.ensure_editing()?;
        if !case.is_suspect(&id) {
            return Err(AccusationError::UnknownSuspect(id));
        }
        self.killer = Some(id);
        Ok(())
    }

    pub fn set_weapon(&mut self, text: impl Into<String>) -> Result<(), AccusationError> {
        self.ensure_editing()?;
        self.weapon = text.into();
        Ok(())
    }

    pub fn set_explanation(&mut self, text: impl Into<String>) -> Result<(), AccusationError> {
        self.ensure_editing()?;
        self.explanation = text.into();
        Ok(())
    }

    /// Presence check only; content is judged on submit.
    pub fn can_submit(&self) -> bool {
        self.verdict.is_none()
            && self.killer.is_some()
            && !self.weapon.is_empty()
            && !self.explanation.is_empty()
    }

    /// Judge the accusation and move to the verdict screen.
    pub fn submit(&mut self, solution: &Solution) -> Result<Verdict, AccusationError> {
        self.ensure_editing()?;
        let killer = match &self.killer {
            Some(killer) if self.can_submit() => killer,
            _ => return Err(AccusationError::IncompleteForm),
        };

        let verdict = evaluate(solution, killer, &self.weapon, &self.explanation);
        tracing::info!(?verdict, accused = %killer, "accusation submitted");

        self.verdict = Some(verdict);
        Ok(verdict)
    }

    /// The full account of the crime, once it has been earned.
    pub fn revealed_solution<'a>(&self, solution: &'a Solution) -> Option<&'a str> {
        match self.verdict {
            Some(Verdict::Correct) => Some(&solution.explanation),
            _ => None,
        }
    }

    /// After a wrong verdict, go back to a blank form.
    pub fn retry(&mut self) -> Result<(), AccusationError> {
        if self.verdict != Some(Verdict::Wrong) {
            return Err(AccusationError::NothingToRetry);
        }
        self.reset();
        Ok(())
    }

    /// Close the form from any phase.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.killer = None;
        self.weapon.clear();
        self.explanation.clear();
        self.verdict = None;
    }

    fn ensure_editing(&self) -> Result<(), AccusationError> {
        match self.verdict {
            None => Ok(()),
            Some(_) => Err(AccusationError::NotEditing),
        }
    }
}
