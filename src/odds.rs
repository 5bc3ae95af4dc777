use serde::{Deserialize, Serialize};

/// Remaining-card counts by blackjack value category.
/// Index 0=Ace, 1=Two, ..., 8=Nine, 9=ten-valued bucket (10/J/Q/K).
pub type RankCounts = [u8; 10];

pub const CATEGORY_LABELS: [&str; 10] = ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10+"];

/// Single deck: four of each rank, sixteen ten-values.
const INITIAL_COUNTS: RankCounts = [4, 4, 4, 4, 4, 4, 4, 4, 4, 16];

/// Player-information projection of the shoe: the initial single deck minus
/// only the cards dealt face up. A hidden hole card stays "possibly in the
/// shoe", so its rank can never be recovered by elimination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsTable {
    pub remaining: RankCounts,
    /// 52 minus the visibly dealt cards.
    pub unseen_total: u8,
}

impl OddsTable {
    /// Build from a visible-dealt tally per rank (index 0 = Ace .. 12 = King).
    pub fn from_seen(seen: &[u8; 13]) -> Self {
        let mut remaining = INITIAL_COUNTS;
        let mut dealt = 0u8;
        for (rank_idx, &n) in seen.iter().enumerate() {
            remaining[category_for_rank_index(rank_idx)] -= n;
            dealt += n;
        }
        Self {
            remaining,
            unseen_total: 52 - dealt,
        }
    }

    pub fn remaining_in(&self, category: usize) -> u8 {
        self.remaining[category]
    }

    /// Chance the next unseen card falls in the category; 0 once every card
    /// has been seen.
    pub fn probability(&self, category: usize) -> f64 {
        if self.unseen_total == 0 {
            return 0.0;
        }
        self.remaining[category] as f64 / self.unseen_total as f64
    }

    pub fn probabilities(&self) -> [f64; 10] {
        let mut out = [0.0; 10];
        for (category, slot) in out.iter_mut().enumerate() {
            *slot = self.probability(category);
        }
        out
    }
}

/// Ranks ten through king share the ten-value bucket.
fn category_for_rank_index(rank_idx: usize) -> usize {
    rank_idx.min(9)
}
