//! The complete case file - the validated bundle every other component reads from.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::chapters::{Section, TabContent, TabDefinition, TabId};
use crate::error::CaseError;
use crate::solution::Solution;
use crate::suspects::{Suspect, SuspectId, Victim};

/// The case shipped with the game.
const BUILTIN_CASE: &str = include_str!("../../data/case_409b.toml");

/// On-disk shape of a case, before validation.
///
/// Chapter headers and chapter bodies are listed separately, mirroring the
/// tab strip and the content pane they feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDocument {
    pub case_number: String,
    pub title: String,
    pub victim: Victim,
    pub suspects: Vec<Suspect>,
    pub tabs: Vec<TabDefinition>,
    pub content: Vec<ContentEntry>,
    pub solution: Solution,
}

/// The body of one chapter, keyed by the chapter it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub tab: TabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preface: Option<String>,
    pub sections: Vec<Section>,
}

impl ContentEntry {
    pub fn new(tab: TabId, content: TabContent) -> Self {
        Self {
            tab,
            title: content.title,
            preface: content.preface,
            sections: content.sections,
        }
    }

    fn into_content(self) -> (TabId, TabContent) {
        (
            self.tab,
            TabContent {
                title: self.title,
                preface: self.preface,
                sections: self.sections,
            },
        )
    }
}

/// A validated, immutable case.
///
/// Construction guarantees that chapters are numbered 0..N-1, each chapter has
/// content, suspect ids are unique, and the solution names a real suspect.
#[derive(Debug, Clone)]
pub struct CaseFile {
    case_number: String,
    title: String,
    victim: Victim,
    suspects: Vec<Suspect>,
    tabs: Vec<TabDefinition>,
    content: HashMap<TabId, TabContent>,
    solution: Solution,
}

impl CaseFile {
    /// Load the case that ships with the game.
    pub fn builtin() -> Result<Self, CaseError> {
        Self::from_toml_str(BUILTIN_CASE)
    }

    /// Parse and validate a TOML case document.
    pub fn from_toml_str(source: &str) -> Result<Self, CaseError> {
        let document: CaseDocument = toml::from_str(source)?;
        Self::from_document(document)
    }

    /// Parse and validate a JSON case document.
    pub fn from_json_str(source: &str) -> Result<Self, CaseError> {
        let document: CaseDocument = serde_json::from_str(source)?;
        Self::from_document(document)
    }

    /// Validate an already-parsed document.
    pub fn from_document(document: CaseDocument) -> Result<Self, CaseError> {
        let CaseDocument {
            case_number,
            title,
            victim,
            suspects,
            tabs,
            content,
            solution,
        } = document;

        validate_tabs(&tabs)?;
        let content = index_content(&tabs, content)?;
        validate_suspects(&suspects)?;
        validate_solution(&solution, &suspects)?;

        Ok(Self {
            case_number,
            title,
            victim,
            suspects,
            tabs,
            content,
            solution,
        })
    }

    pub fn case_number(&self) -> &str {
        &self.case_number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn victim(&self) -> &Victim {
        &self.victim
    }

    /// Suspects in document order.
    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| s.id == *id)
    }

    pub fn is_suspect(&self, id: &SuspectId) -> bool {
        self.suspect(id).is_some()
    }

    /// Chapter headers in reading order.
    pub fn tabs(&self) -> &[TabDefinition] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// The final chapter; finishing it opens the investigation board.
    pub fn last_tab(&self) -> TabId {
        TabId(self.tabs.len().saturating_sub(1))
    }

    pub fn contains_tab(&self, tab: TabId) -> bool {
        tab.index() < self.tabs.len()
    }

    pub fn tab(&self, tab: TabId) -> Option<&TabDefinition> {
        self.tabs.get(tab.index())
    }

    pub fn content(&self, tab: TabId) -> Option<&TabContent> {
        self.content.get(&tab)
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }
}

fn validate_tabs(tabs: &[TabDefinition]) -> Result<(), CaseError> {
    if tabs.is_empty() {
        return Err(CaseError::NoChapters);
    }

    for (position, tab) in tabs.iter().enumerate() {
        if tab.id.index() != position {
            return Err(CaseError::ChapterOutOfOrder {
                position,
                found: tab.id,
            });
        }
    }

    Ok(())
}

fn index_content(
    tabs: &[TabDefinition],
    entries: Vec<ContentEntry>,
) -> Result<HashMap<TabId, TabContent>, CaseError> {
    let mut content = HashMap::with_capacity(entries.len());

    for entry in entries {
        let (tab, body) = entry.into_content();
        if tab.index() >= tabs.len() {
            return Err(CaseError::OrphanContent(tab));
        }
        if content.insert(tab, body).is_some() {
            return Err(CaseError::DuplicateContent(tab));
        }
    }

    if let Some(missing) = tabs.iter().find(|t| !content.contains_key(&t.id)) {
        return Err(CaseError::MissingContent(missing.id));
    }

    Ok(content)
}

fn validate_suspects(suspects: &[Suspect]) -> Result<(), CaseError> {
    let mut seen = HashSet::new();

    for suspect in suspects {
        if suspect.id.as_str().trim().is_empty() {
            return Err(CaseError::EmptySuspectId);
        }
        if !seen.insert(&suspect.id) {
            return Err(CaseError::DuplicateSuspect(suspect.id.clone()));
        }
    }

    Ok(())
}

fn validate_solution(solution: &Solution, suspects: &[Suspect]) -> Result<(), CaseError> {
    if !suspects.iter().any(|s| s.id == solution.killer) {
        return Err(CaseError::UnknownKiller(solution.killer.clone()));
    }

    validate_terms(&solution.weapons, "weapon synonyms")?;
    validate_terms(&solution.explanation_keywords, "explanation keywords")?;

    Ok(())
}

fn validate_terms(terms: &[String], what: &'static str) -> Result<(), CaseError> {
    if terms.is_empty() {
        return Err(CaseError::EmptySolutionList(what));
    }
    // A blank term would be a substring of every answer.
    if terms.iter().any(|t| t.trim().is_empty()) {
        return Err(CaseError::BlankSolutionTerm(what));
    }
    Ok(())
}
