use crate::Card;
use serde::{Deserialize, Serialize};

/// Hi-Lo counter over the cards the player could actually see.
///
/// Fed exactly once per card, at the moment it becomes visible: face-up
/// draws immediately, the dealer hole card when it is turned over. A card
/// that is never revealed never contributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardCounter {
    running: i32,
    /// Visible-dealt tally per rank, index 0 = Ace .. 12 = King.
    seen: [u8; 13],
    seen_total: u32,
}

impl CardCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_card_revealed(&mut self, card: Card) {
        self.running += card.count_value();
        self.seen[(card.rank() - 1) as usize] += 1;
        self.seen_total += 1;
    }

    /// Back to a fresh shoe: count and tallies to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn running_count(&self) -> i32 {
        self.running
    }

    /// Running count normalized by decks remaining in the shoe; 0 once the
    /// shoe is exhausted.
    pub fn true_count(&self, shoe_remaining: usize) -> f64 {
        if shoe_remaining == 0 {
            return 0.0;
        }
        self.running as f64 / (shoe_remaining as f64 / 52.0)
    }

    pub fn seen_by_rank(&self) -> &[u8; 13] {
        &self.seen
    }

    pub fn seen_total(&self) -> u32 {
        self.seen_total
    }
}
