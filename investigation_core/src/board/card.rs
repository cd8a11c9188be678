//! Cards pinned to the investigation board.

use case_rules::{Suspect, SuspectId, Victim};
use serde::{Deserialize, Serialize};

/// Identifier of a card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardId {
    Victim,
    Suspect(SuspectId),
    /// Sticky notes are numbered from 1 in creation order.
    Note(u32),
}

impl CardId {
    pub fn is_note(&self) -> bool {
        matches!(self, CardId::Note(_))
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardId::Victim => write!(f, "victim"),
            CardId::Suspect(id) => write!(f, "{}", id),
            CardId::Note(n) => write!(f, "note-{}", n),
        }
    }
}

/// Canvas coordinates of a card's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    Victim {
        name: String,
        description: String,
    },
    Suspect {
        name: String,
        relation: String,
        motive: String,
    },
    Note {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub position: Position,
}

impl Card {
    pub fn victim(victim: &Victim, position: Position) -> Self {
        Self {
            id: CardId::Victim,
            kind: CardKind::Victim {
                name: victim.name.clone(),
                description: victim.description.clone(),
            },
            position,
        }
    }

    pub fn suspect(suspect: &Suspect, position: Position) -> Self {
        Self {
            id: CardId::Suspect(suspect.id.clone()),
            kind: CardKind::Suspect {
                name: suspect.name.clone(),
                relation: suspect.relation.clone(),
                motive: suspect.motive.clone(),
            },
            position,
        }
    }

    pub fn note(number: u32, position: Position) -> Self {
        Self {
            id: CardId::Note(number),
            kind: CardKind::Note {
                text: String::new(),
            },
            position,
        }
    }

    /// Victim and suspect cards are part of the case and cannot be removed.
    pub fn is_fixed(&self) -> bool {
        !self.id.is_note()
    }

    /// Text of a sticky note.
    pub fn note_text(&self) -> Option<&str> {
        match &self.kind {
            CardKind::Note { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_display() {
        assert_eq!(CardId::Victim.to_string(), "victim");
        assert_eq!(CardId::Suspect(SuspectId::new("samir")).to_string(), "samir");
        assert_eq!(CardId::Note(3).to_string(), "note-3");
    }

    #[test]
    fn test_fixed_cards() {
        let victim = Card::victim(&Victim::new("V", "collector"), Position::default());
        let suspect = Card::suspect(
            &Suspect::new("s", "S", "dealer", "money"),
            Position::new(1.0, 2.0),
        );
        let note = Card::note(1, Position::default());

        assert!(victim.is_fixed());
        assert!(suspect.is_fixed());
        assert!(!note.is_fixed());
        assert_eq!(note.note_text(), Some(""));
        assert_eq!(suspect.note_text(), None);
    }
}
