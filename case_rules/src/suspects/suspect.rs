//! Suspect definitions.

use serde::{Deserialize, Serialize};

use super::SuspectId;

/// A suspect as presented in the case file and on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: SuspectId,
    pub name: String,
    /// How the suspect is related to the victim.
    pub relation: String,
    pub motive: String,
}

impl Suspect {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        relation: impl Into<String>,
        motive: impl Into<String>,
    ) -> Self {
        Self {
            id: SuspectId::new(id),
            name: name.into(),
            relation: relation.into(),
            motive: motive.into(),
        }
    }

    /// Label used by the accusation form's suspect picker.
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.name, self.relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_label() {
        let suspect = Suspect::new("samir", "Samir", "book dealer", "forgery");
        assert_eq!(suspect.option_label(), "Samir - book dealer");
        assert_eq!(suspect.id.as_str(), "samir");
    }
}
