//! The fixed solution of the case.

use serde::{Deserialize, Serialize};

use crate::suspects::SuspectId;

/// What actually happened. Accusations are checked against this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub killer: SuspectId,

    /// Accepted names for the murder weapon; any one of them is enough.
    pub weapons: Vec<String>,

    /// Terms describing the murder method; an explanation needs at least one.
    pub explanation_keywords: Vec<String>,

    /// Full account revealed after a correct accusation.
    pub explanation: String,
}

impl Solution {
    pub fn new(killer: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            killer: SuspectId::new(killer),
            weapons: Vec::new(),
            explanation_keywords: Vec::new(),
            explanation: explanation.into(),
        }
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapons.push(weapon.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.explanation_keywords.push(keyword.into());
        self
    }

    pub fn is_killer(&self, suspect: &SuspectId) -> bool {
        self.killer == *suspect
    }
}
