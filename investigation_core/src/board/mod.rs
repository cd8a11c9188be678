//! Investigation board - a free-form canvas of case cards and sticky notes.
//!
//! The board opens seeded with the victim in the middle, the suspects around
//! them, and a string from the victim to each suspect. The player can drag
//! cards, add and write on sticky notes, and pin new strings between any two
//! cards. Two actions reach outside the board: going back to the case files,
//! and opening the accusation form.

mod canvas;
mod card;

pub use canvas::*;
pub use card::*;

use case_rules::CaseFile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use thiserror::Error;

use crate::accusation::AccusationForm;
use crate::progression::ProgressionStore;
use crate::timers::MountId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no card `{0}` on the board")]
    UnknownCard(CardId),

    #[error("no connection {0} on the board")]
    UnknownConnection(ConnectionId),

    #[error("card `{0}` is already on the board")]
    DuplicateCard(CardId),

    #[error("card `{0}` belongs to the case and cannot be removed")]
    FixedCard(CardId),

    #[error("card `{0}` is not a sticky note")]
    NotANote(CardId),
}

const VICTIM_POSITION: Position = Position { x: 250.0, y: 0.0 };

/// Above, right, below and left of the victim.
const SUSPECT_SLOTS: [Position; 4] = [
    Position { x: 250.0, y: -200.0 },
    Position { x: 550.0, y: 0.0 },
    Position { x: 250.0, y: 200.0 },
    Position { x: -50.0, y: 0.0 },
];

/// Radius of the ring used once the four slots are taken.
const OVERFLOW_RADIUS: f32 = 450.0;

/// Area where new sticky notes land, below the suspects.
const NOTE_AREA_X: Range<f32> = 200.0..700.0;
const NOTE_AREA_Y: Range<f32> = 400.0..700.0;

fn suspect_position(index: usize, total: usize) -> Position {
    if let Some(slot) = SUSPECT_SLOTS.get(index) {
        return *slot;
    }
    let overflow = (total - SUSPECT_SLOTS.len()).max(1) as f32;
    let step = std::f32::consts::TAU / overflow;
    let angle = step * (index - SUSPECT_SLOTS.len()) as f32 + step / 2.0;
    Position::new(
        VICTIM_POSITION.x + OVERFLOW_RADIUS * angle.cos(),
        VICTIM_POSITION.y + OVERFLOW_RADIUS * angle.sin(),
    )
}

/// One mounted instance of the board screen. Notes and strings added here
/// are lost when the player goes back to the case files.
#[derive(Debug, Clone)]
pub struct InvestigationBoard {
    mount: MountId,
    canvas: Canvas,
    next_note: u32,
    rng: StdRng,
    accusation: AccusationForm,
    accusation_open: bool,
}

impl InvestigationBoard {
    /// Lay out the case on a fresh board. `seed` fixes where sticky notes land.
    pub fn new(case: &CaseFile, seed: Option<u64>) -> Result<Self, BoardError> {
        let mut canvas = Canvas::new();
        canvas.add_card(Card::victim(case.victim(), VICTIM_POSITION))?;

        let total = case.suspects().len();
        for (index, suspect) in case.suspects().iter().enumerate() {
            canvas.add_card(Card::suspect(suspect, suspect_position(index, total)))?;
            canvas.connect(CardId::Victim, CardId::Suspect(suspect.id.clone()))?;
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            mount: MountId::new(),
            canvas,
            next_note: 1,
            rng,
            accusation: AccusationForm::new(),
            accusation_open: false,
        })
    }

    pub fn mount(&self) -> MountId {
        self.mount
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Pin an empty sticky note somewhere in the note area.
    pub fn add_note(&mut self) -> Result<CardId, BoardError> {
        let number = self.next_note;
        self.next_note += 1;

        let position = Position::new(
            self.rng.gen_range(NOTE_AREA_X),
            self.rng.gen_range(NOTE_AREA_Y),
        );
        let card = Card::note(number, position);
        let id = card.id.clone();

        self.canvas.add_card(card)?;
        tracing::debug!(note = %id, "sticky note added");
        Ok(id)
    }

    pub fn edit_note(&mut self, id: &CardId, text: impl Into<String>) -> Result<(), BoardError> {
        let card = self
            .canvas
            .card_mut(id)
            .ok_or_else(|| BoardError::UnknownCard(id.clone()))?;
        match &mut card.kind {
            CardKind::Note { text: current } => {
                *current = text.into();
                Ok(())
            }
            _ => Err(BoardError::NotANote(id.clone())),
        }
    }

    /// Drag a card.
    pub fn move_card(&mut self, id: &CardId, position: Position) -> Result<(), BoardError> {
        self.canvas.move_card(id, position)
    }

    pub fn connect(&mut self, source: CardId, target: CardId) -> Result<ConnectionId, BoardError> {
        let id = self.canvas.connect(source, target)?;
        tracing::trace!(connection = %id, "cards connected");
        Ok(id)
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> Result<(), BoardError> {
        self.canvas.disconnect(id).map(|_| ())
    }

    /// Remove a sticky note and its strings.
    pub fn remove_note(&mut self, id: &CardId) -> Result<(), BoardError> {
        let card = self
            .canvas
            .card(id)
            .ok_or_else(|| BoardError::UnknownCard(id.clone()))?;
        if card.is_fixed() {
            return Err(BoardError::FixedCard(id.clone()));
        }
        self.canvas.remove_card(id).map(|_| ())
    }

    /// "Back to the case files".
    pub fn return_to_files(&mut self, store: &mut ProgressionStore) {
        self.close_accusation();
        store.set_on_board(false);
    }

    /// "Solve the case" - open the accusation form.
    pub fn open_accusation(&mut self) {
        self.accusation_open = true;
    }

    /// Close the accusation form, clearing whatever was in it.
    pub fn close_accusation(&mut self) {
        self.accusation.close();
        self.accusation_open = false;
    }

    pub fn is_accusation_open(&self) -> bool {
        self.accusation_open
    }

    /// The accusation form, while it is open.
    pub fn accusation(&self) -> Option<&AccusationForm> {
        self.accusation_open.then_some(&self.accusation)
    }

    pub fn accusation_mut(&mut self) -> Option<&mut AccusationForm> {
        if self.accusation_open {
            Some(&mut self.accusation)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::SuspectId;

    fn board() -> (CaseFile, InvestigationBoard) {
        let case = CaseFile::builtin().unwrap();
        let board = InvestigationBoard::new(&case, Some(409)).unwrap();
        (case, board)
    }

    #[test]
    fn test_seeded_layout() {
        let (case, board) = board();
        let canvas = board.canvas();

        assert_eq!(canvas.cards().len(), 1 + case.suspects().len());
        assert_eq!(canvas.cards()[0].id, CardId::Victim);
        assert_eq!(canvas.cards()[0].position, Position::new(250.0, 0.0));
        assert_eq!(canvas.cards()[1].position, Position::new(250.0, -200.0));
        assert_eq!(canvas.cards()[4].position, Position::new(-50.0, 0.0));

        assert_eq!(canvas.connections().len(), case.suspects().len());
        assert!(canvas
            .connections()
            .iter()
            .all(|c| c.source == CardId::Victim));
    }

    #[test]
    fn test_overflow_suspects_on_ring() {
        let position = suspect_position(4, 6);
        let dx = position.x - VICTIM_POSITION.x;
        let dy = position.y - VICTIM_POSITION.y;
        assert!(((dx * dx + dy * dy).sqrt() - OVERFLOW_RADIUS).abs() < 0.01);
        assert_ne!(suspect_position(4, 6), suspect_position(5, 6));
    }

    #[test]
    fn test_notes_numbered_and_placed() {
        let (_, mut board) = board();

        let first = board.add_note().unwrap();
        let second = board.add_note().unwrap();
        assert_eq!(first, CardId::Note(1));
        assert_eq!(second, CardId::Note(2));

        for id in [&first, &second] {
            let position = board.canvas().card(id).unwrap().position;
            assert!(NOTE_AREA_X.contains(&position.x));
            assert!(NOTE_AREA_Y.contains(&position.y));
        }
    }

    #[test]
    fn test_same_seed_same_placement() {
        let (case, mut a) = board();
        let mut b = InvestigationBoard::new(&case, Some(409)).unwrap();

        let na = a.add_note().unwrap();
        let nb = b.add_note().unwrap();
        assert_eq!(
            a.canvas().card(&na).unwrap().position,
            b.canvas().card(&nb).unwrap().position
        );
    }

    #[test]
    fn test_edit_note() {
        let (_, mut board) = board();
        let note = board.add_note().unwrap();

        board.edit_note(&note, "gloves?").unwrap();
        assert_eq!(board.canvas().card(&note).unwrap().note_text(), Some("gloves?"));

        assert_eq!(
            board.edit_note(&CardId::Victim, "x"),
            Err(BoardError::NotANote(CardId::Victim))
        );
    }

    #[test]
    fn test_fixed_cards_cannot_be_removed() {
        let (_, mut board) = board();
        let samir = CardId::Suspect(SuspectId::new("samir"));

        assert_eq!(
            board.remove_note(&samir),
            Err(BoardError::FixedCard(samir.clone()))
        );

        let note = board.add_note().unwrap();
        board.connect(note.clone(), samir.clone()).unwrap();
        board.remove_note(&note).unwrap();
        assert!(board.canvas().card(&note).is_none());
        assert_eq!(board.canvas().connections_of(&samir).len(), 1);
    }

    #[test]
    fn test_accusation_only_while_open() {
        let (case, mut board) = board();
        assert!(board.accusation().is_none());
        assert!(board.accusation_mut().is_none());

        board.open_accusation();
        board
            .accusation_mut()
            .unwrap()
            .select_killer(&case, SuspectId::new("karim"))
            .unwrap();
        board.close_accusation();

        board.open_accusation();
        assert!(board.accusation().unwrap().is_blank());
    }

    #[test]
    fn test_return_to_files() {
        let (_, mut board) = board();
        let mut store = ProgressionStore::new(5);
        store.set_on_board(true);
        board.open_accusation();

        board.return_to_files(&mut store);

        assert!(!store.is_on_board());
        assert!(!board.is_accusation_open());
    }
}
