//! Single-deck blackjack rules engine: shoe, hands, action legality, dealer
//! policy, settlement, Hi-Lo counting and a visible-information odds table.

mod card;
mod hand;
mod rules;
mod error;
mod shoe;
mod count;
mod odds;
mod table;

pub use card::Card;
pub use hand::{can_split_cards, hand_total, is_blackjack, Hand, HandState, HandTotal};
pub use rules::{TableRules, DEALER_STAND_TOTAL, MAX_HANDS, SHOE_REFILL_FLOOR};
pub use error::TableError;
pub use shoe::Shoe;
pub use count::CardCounter;
pub use odds::{OddsTable, RankCounts, CATEGORY_LABELS};
pub use table::{DealerHand, DealerStep, HandOutcome, RoundPhase, Table};
