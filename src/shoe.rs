use crate::{Card, TableError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Undealt cards plus the discard pile for one shoe lifetime.
///
/// Drawing moves a card out of the shoe into the live round; settlement
/// returns the round's cards through `collect`. The shoe, the discard and
/// the cards in the live round always add up to one full 52-card deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
    discard: Vec<Card>,
    hands_played: u32,
}

impl Shoe {
    /// Freshly shuffled single deck.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            discard: Vec::new(),
            hands_played: 0,
        };
        shoe.reset(rng);
        shoe
    }

    /// Rebuild the full deck, shuffle it, clear the discard and the
    /// hands-played counter.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.cards = Card::DECK.to_vec();
        self.cards.shuffle(rng);
        self.discard.clear();
        self.hands_played = 0;
    }

    /// Take the top card (end of the sequence).
    pub fn draw(&mut self) -> Result<Card, TableError> {
        self.cards.pop().ok_or(TableError::ShoeEmpty)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn record_hand_played(&mut self) {
        self.hands_played += 1;
    }

    /// Sweep a settled round's cards into the discard.
    pub fn collect(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Replace the undealt cards with a fixed sequence; draws still come
    /// from the end.
    #[cfg(test)]
    pub(crate) fn stack(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}
