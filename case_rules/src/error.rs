//! Errors raised while loading case documents.

use thiserror::Error;

use crate::chapters::TabId;
use crate::suspects::SuspectId;

/// Everything that can be wrong with a case document.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("malformed TOML case document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed JSON case document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("case has no chapters")]
    NoChapters,

    /// Chapters must be numbered 0..N-1 in the order they are listed.
    #[error("chapter at position {position} has id {found}")]
    ChapterOutOfOrder { position: usize, found: TabId },

    #[error("chapter {0} has no content")]
    MissingContent(TabId),

    #[error("content given for unknown chapter {0}")]
    OrphanContent(TabId),

    #[error("chapter {0} has content listed twice")]
    DuplicateContent(TabId),

    #[error("suspect with an empty id")]
    EmptySuspectId,

    #[error("suspect `{0}` is listed twice")]
    DuplicateSuspect(SuspectId),

    #[error("solution names `{0}`, who is not a suspect")]
    UnknownKiller(SuspectId),

    #[error("solution lists no {0}")]
    EmptySolutionList(&'static str),

    #[error("solution contains a blank entry in its {0}")]
    BlankSolutionTerm(&'static str),
}
