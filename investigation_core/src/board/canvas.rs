//! The canvas - cards and the red strings between them.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::{BoardError, Card, CardId, Position};

/// Unique identifier for connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A string pinned between two cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: CardId,
    pub target: CardId,
}

/// Cards in paint order plus the connections between them.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    cards: Vec<Card>,
    connections: Vec<Connection>,

    /// Index: card -> connections touching it.
    by_card: HashMap<CardId, HashSet<ConnectionId>>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), BoardError> {
        if self.contains(&card.id) {
            return Err(BoardError::DuplicateCard(card.id));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|c| c.id == *id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == *id)
    }

    pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == *id)
    }

    /// Cards in paint order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn move_card(&mut self, id: &CardId, position: Position) -> Result<(), BoardError> {
        let card = self
            .card_mut(id)
            .ok_or_else(|| BoardError::UnknownCard(id.clone()))?;
        card.position = position;
        Ok(())
    }

    /// Connect two cards.
    ///
    /// Connecting the same source and target twice returns the existing connection.
    pub fn connect(&mut self, source: CardId, target: CardId) -> Result<ConnectionId, BoardError> {
        for id in [&source, &target] {
            if !self.contains(id) {
                return Err(BoardError::UnknownCard(id.clone()));
            }
        }

        if let Some(existing) = self
            .connections
            .iter()
            .find(|c| c.source == source && c.target == target)
        {
            return Ok(existing.id);
        }

        let id = ConnectionId::new();
        self.by_card.entry(source.clone()).or_default().insert(id);
        self.by_card.entry(target.clone()).or_default().insert(id);
        self.connections.push(Connection { id, source, target });
        Ok(id)
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> Result<Connection, BoardError> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or(BoardError::UnknownConnection(id))?;

        let connection = self.connections.remove(index);
        for card in [&connection.source, &connection.target] {
            if let Some(ids) = self.by_card.get_mut(card) {
                ids.remove(&id);
            }
        }
        Ok(connection)
    }

    /// Connections touching a card.
    pub fn connections_of(&self, card: &CardId) -> Vec<&Connection> {
        self.by_card
            .get(card)
            .map(|ids| {
                self.connections
                    .iter()
                    .filter(|c| ids.contains(&c.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove a card together with every connection touching it.
    pub fn remove_card(&mut self, id: &CardId) -> Result<Card, BoardError> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == *id)
            .ok_or_else(|| BoardError::UnknownCard(id.clone()))?;

        let attached: Vec<ConnectionId> = self
            .by_card
            .remove(id)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default();
        for connection in attached {
            // Already detached from `id`; this clears the other end.
            let _ = self.disconnect(connection);
        }

        Ok(self.cards.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{Suspect, Victim};

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas
            .add_card(Card::victim(&Victim::new("V", "collector"), Position::default()))
            .unwrap();
        canvas
            .add_card(Card::suspect(
                &Suspect::new("s", "S", "dealer", "money"),
                Position::new(100.0, 0.0),
            ))
            .unwrap();
        canvas.add_card(Card::note(1, Position::new(0.0, 100.0))).unwrap();
        canvas
    }

    fn suspect() -> CardId {
        CardId::Suspect("s".into())
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let mut canvas = canvas();
        let err = canvas
            .add_card(Card::note(1, Position::default()))
            .unwrap_err();
        assert_eq!(err, BoardError::DuplicateCard(CardId::Note(1)));
        assert_eq!(canvas.cards().len(), 3);
    }

    #[test]
    fn test_connect_and_lookup() {
        let mut canvas = canvas();

        let id = canvas.connect(CardId::Victim, suspect()).unwrap();
        canvas.connect(CardId::Note(1), suspect()).unwrap();

        assert_eq!(canvas.connections().len(), 2);
        assert_eq!(canvas.connections_of(&suspect()).len(), 2);
        assert_eq!(canvas.connections_of(&CardId::Victim).len(), 1);
        assert_eq!(canvas.connection(id).unwrap().target, suspect());
    }

    #[test]
    fn test_duplicate_connection_ignored() {
        let mut canvas = canvas();

        let first = canvas.connect(CardId::Victim, suspect()).unwrap();
        let second = canvas.connect(CardId::Victim, suspect()).unwrap();

        assert_eq!(first, second);
        assert_eq!(canvas.connections().len(), 1);

        // The reverse direction is a different string.
        canvas.connect(suspect(), CardId::Victim).unwrap();
        assert_eq!(canvas.connections().len(), 2);
    }

    #[test]
    fn test_connect_unknown_card() {
        let mut canvas = canvas();
        assert_eq!(
            canvas.connect(CardId::Victim, CardId::Note(9)),
            Err(BoardError::UnknownCard(CardId::Note(9)))
        );
    }

    #[test]
    fn test_disconnect() {
        let mut canvas = canvas();
        let id = canvas.connect(CardId::Victim, suspect()).unwrap();

        let removed = canvas.disconnect(id).unwrap();
        assert_eq!(removed.source, CardId::Victim);
        assert!(canvas.connections_of(&CardId::Victim).is_empty());
        assert_eq!(canvas.disconnect(id), Err(BoardError::UnknownConnection(id)));
    }

    #[test]
    fn test_remove_card_cascades() {
        let mut canvas = canvas();
        canvas.connect(CardId::Note(1), suspect()).unwrap();
        canvas.connect(CardId::Victim, suspect()).unwrap();

        canvas.remove_card(&CardId::Note(1)).unwrap();

        assert!(!canvas.contains(&CardId::Note(1)));
        assert_eq!(canvas.connections().len(), 1);
        assert_eq!(canvas.connections_of(&suspect()).len(), 1);
    }

    #[test]
    fn test_move_card() {
        let mut canvas = canvas();
        canvas
            .move_card(&CardId::Victim, Position::new(10.0, -5.0))
            .unwrap();

        assert_eq!(
            canvas.card(&CardId::Victim).unwrap().position,
            Position::new(10.0, -5.0)
        );
        assert!(canvas
            .move_card(&CardId::Note(7), Position::default())
            .is_err());
    }
}
