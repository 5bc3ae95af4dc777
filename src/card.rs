use serde::{Deserialize, Serialize};

/// One card of a standard 52-card deck, suit-major order.
/// The discriminant encodes the card: `index = suit * 13 + (rank - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    AceSpades, TwoSpades, ThreeSpades, FourSpades, FiveSpades, SixSpades, SevenSpades,
    EightSpades, NineSpades, TenSpades, JackSpades, QueenSpades, KingSpades,
    AceHearts, TwoHearts, ThreeHearts, FourHearts, FiveHearts, SixHearts, SevenHearts,
    EightHearts, NineHearts, TenHearts, JackHearts, QueenHearts, KingHearts,
    AceDiamonds, TwoDiamonds, ThreeDiamonds, FourDiamonds, FiveDiamonds, SixDiamonds, SevenDiamonds,
    EightDiamonds, NineDiamonds, TenDiamonds, JackDiamonds, QueenDiamonds, KingDiamonds,
    AceClubs, TwoClubs, ThreeClubs, FourClubs, FiveClubs, SixClubs, SevenClubs,
    EightClubs, NineClubs, TenClubs, JackClubs, QueenClubs, KingClubs,
}

const RANK_LABELS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

const SUIT_SYMBOLS: [&str; 4] = ["♠", "♥", "♦", "♣"];

impl Card {
    /// All 52 cards in discriminant order.
    pub const DECK: [Card; 52] = [
        Card::AceSpades, Card::TwoSpades, Card::ThreeSpades, Card::FourSpades,
        Card::FiveSpades, Card::SixSpades, Card::SevenSpades, Card::EightSpades,
        Card::NineSpades, Card::TenSpades, Card::JackSpades, Card::QueenSpades,
        Card::KingSpades, Card::AceHearts, Card::TwoHearts, Card::ThreeHearts,
        Card::FourHearts, Card::FiveHearts, Card::SixHearts, Card::SevenHearts,
        Card::EightHearts, Card::NineHearts, Card::TenHearts, Card::JackHearts,
        Card::QueenHearts, Card::KingHearts, Card::AceDiamonds, Card::TwoDiamonds,
        Card::ThreeDiamonds, Card::FourDiamonds, Card::FiveDiamonds, Card::SixDiamonds,
        Card::SevenDiamonds, Card::EightDiamonds, Card::NineDiamonds, Card::TenDiamonds,
        Card::JackDiamonds, Card::QueenDiamonds, Card::KingDiamonds, Card::AceClubs,
        Card::TwoClubs, Card::ThreeClubs, Card::FourClubs, Card::FiveClubs,
        Card::SixClubs, Card::SevenClubs, Card::EightClubs, Card::NineClubs,
        Card::TenClubs, Card::JackClubs, Card::QueenClubs, Card::KingClubs,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::DECK[index]
    }

    /// Rank 1 (Ace) through 13 (King).
    pub fn rank(self) -> u8 {
        (self as u8) % 13 + 1
    }

    /// Blackjack point value: Ace counts 11 here, the hand evaluator
    /// demotes aces to 1 as needed.
    pub fn value(self) -> u8 {
        match self.rank() {
            1 => 11,
            r if r >= 10 => 10,
            r => r,
        }
    }

    /// Hi-Lo count contribution: 2-6 are +1, 7-9 neutral, tens and aces -1.
    pub fn count_value(self) -> i32 {
        match self.value() {
            2..=6 => 1,
            7..=9 => 0,
            _ => -1,
        }
    }

    pub fn is_ace(self) -> bool {
        self.rank() == 1
    }

    pub fn is_ten_value(self) -> bool {
        self.value() == 10
    }

    pub fn rank_label(self) -> &'static str {
        RANK_LABELS[(self as usize) % 13]
    }

    pub fn to_display(self) -> String {
        format!("{}{}", self.rank_label(), SUIT_SYMBOLS[(self as usize) / 13])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, card) in Card::DECK.iter().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(Card::from_index(i), *card);
        }
    }

    #[test]
    fn test_rank_and_value() {
        assert_eq!(Card::AceClubs.rank(), 1);
        assert_eq!(Card::AceClubs.value(), 11);
        assert_eq!(Card::KingHearts.rank(), 13);
        assert_eq!(Card::KingHearts.value(), 10);
        assert_eq!(Card::TenSpades.value(), 10);
        assert_eq!(Card::NineDiamonds.value(), 9);
        assert_eq!(Card::TwoSpades.value(), 2);
    }

    #[test]
    fn test_count_values() {
        assert_eq!(Card::FiveHearts.count_value(), 1);
        assert_eq!(Card::TwoClubs.count_value(), 1);
        assert_eq!(Card::SevenSpades.count_value(), 0);
        assert_eq!(Card::NineHearts.count_value(), 0);
        assert_eq!(Card::TenDiamonds.count_value(), -1);
        assert_eq!(Card::QueenClubs.count_value(), -1);
        assert_eq!(Card::AceSpades.count_value(), -1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::AceSpades.to_display(), "A♠");
        assert_eq!(Card::TenHearts.to_display(), "10♥");
        assert_eq!(Card::KingClubs.to_display(), "K♣");
    }
}
