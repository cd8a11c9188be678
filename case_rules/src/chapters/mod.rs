//! Chapters of the case file ("tabs") and their content.

use serde::{Deserialize, Serialize};

/// Index of a chapter. Chapters are numbered 0..N-1 in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub usize);

impl TabId {
    /// The opening chapter; always unlocked.
    pub const FIRST: TabId = TabId(0);

    pub fn index(self) -> usize {
        self.0
    }

    /// The chapter that follows this one.
    pub fn next(self) -> TabId {
        TabId(self.0 + 1)
    }
}

impl From<usize> for TabId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chapter header as shown in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDefinition {
    pub id: TabId,
    pub title: String,
}

/// One titled block of text inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub subtitle: String,
    pub content: String,
}

impl Section {
    pub fn new(subtitle: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subtitle: subtitle.into(),
            content: content.into(),
        }
    }
}

/// The body of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabContent {
    pub title: String,

    /// Short note displayed above the sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preface: Option<String>,

    pub sections: Vec<Section>,
}

impl TabContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            preface: None,
            sections: Vec::new(),
        }
    }

    pub fn with_preface(mut self, preface: impl Into<String>) -> Self {
        self.preface = Some(preface.into());
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Total number of characters across every section body.
    pub fn body_len(&self) -> usize {
        self.sections.iter().map(|s| s.content.chars().count()).sum()
    }
}
