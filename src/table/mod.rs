use crate::hand::{hand_total, is_blackjack, HandState, HandTotal};
use crate::rules::{validate_reshuffle_after, DEALER_STAND_TOTAL, MAX_HANDS, SHOE_REFILL_FLOOR};
use crate::{Card, CardCounter, Hand, OddsTable, Shoe, TableError, TableRules};
use log::{debug, info};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Phase of the single live round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NoRound,
    PlayerActing,
    DealerActing,
    RoundOver,
}

/// Settled result of one player hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
}

/// What one dealer step did. The presentation layer paces these; the engine
/// never waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerStep {
    HoleRevealed(Card),
    Drew(Card),
    /// Dealer reached 17 or better (soft 17 included) and the round settled.
    Stood,
}

/// Dealer cards plus hole-card visibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealerHand {
    pub cards: Vec<Card>,
    pub hole_revealed: bool,
}

impl DealerHand {
    pub fn upcard(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// The cards a player may see: everything once the hole is turned over,
    /// otherwise just the upcard.
    pub fn visible_cards(&self) -> &[Card] {
        if self.hole_revealed || self.cards.len() < 2 {
            &self.cards
        } else {
            &self.cards[..1]
        }
    }

    pub fn total(&self) -> HandTotal {
        hand_total(&self.cards)
    }

    /// Draws below 17; stands on every 17, soft included.
    pub fn should_hit(&self) -> bool {
        self.total().total < DEALER_STAND_TOTAL
    }

    fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

/// The engine: one table, one seat, one live round at a time.
///
/// Owns the shoe, the counter, the RNG, the bankroll and the round state.
/// All mutation goes through the operations below; each either completes or
/// refuses with a [`TableError`] leaving state untouched.
#[derive(Debug, Clone)]
pub struct Table {
    rules: TableRules,
    shoe: Shoe,
    counter: CardCounter,
    rng: ChaCha8Rng,
    dealer: DealerHand,
    hands: Vec<Hand>,
    active: usize,
    phase: RoundPhase,
    dealer_blackjack: bool,
    bankroll: u64,
    pending_bet: u64,
    outcomes: Vec<HandOutcome>,
    reshuffles: u32,
}

impl Table {
    pub fn new(rules: TableRules) -> Self {
        Self::with_rng(rules, ChaCha8Rng::from_entropy())
    }

    /// Seeded construction for reproducible shoes.
    pub fn with_rng(rules: TableRules, mut rng: ChaCha8Rng) -> Self {
        let shoe = Shoe::new(&mut rng);
        Self {
            rules,
            shoe,
            counter: CardCounter::new(),
            rng,
            dealer: DealerHand::default(),
            hands: Vec::new(),
            active: 0,
            phase: RoundPhase::NoRound,
            dealer_blackjack: false,
            bankroll: rules.starting_bankroll,
            pending_bet: 0,
            outcomes: Vec::new(),
            reshuffles: 0,
        }
    }

    // ── Snapshot accessors ──

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    pub fn dealer_has_blackjack(&self) -> bool {
        self.dealer_blackjack
    }

    pub fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Index of the hand awaiting a decision; `None` outside the player
    /// phase.
    pub fn active_hand_index(&self) -> Option<usize> {
        (self.phase == RoundPhase::PlayerActing).then_some(self.active)
    }

    pub fn active_hand(&self) -> Option<&Hand> {
        self.active_hand_index().map(|i| &self.hands[i])
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn pending_bet(&self) -> u64 {
        self.pending_bet
    }

    pub fn rules(&self) -> TableRules {
        self.rules
    }

    pub fn running_count(&self) -> i32 {
        self.counter.running_count()
    }

    pub fn true_count(&self) -> f64 {
        self.counter.true_count(self.shoe.remaining())
    }

    /// Remaining-card projection from the player's information only.
    pub fn odds(&self) -> OddsTable {
        OddsTable::from_seen(self.counter.seen_by_rank())
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Cards dealt face up (or since revealed) this shoe.
    pub fn cards_seen(&self) -> u32 {
        self.counter.seen_total()
    }

    pub fn hands_played(&self) -> u32 {
        self.shoe.hands_played()
    }

    /// Monotonic reshuffle counter; the presentation layer watches it to
    /// announce a fresh shoe.
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Per-hand results of the settled round; empty while a round is live.
    pub fn outcomes(&self) -> &[HandOutcome] {
        &self.outcomes
    }

    // ── Legality predicates ──

    pub fn can_deal(&self) -> bool {
        !self.mid_round() && self.pending_bet > 0 && self.bankroll >= self.pending_bet
    }

    pub fn can_hit(&self) -> bool {
        self.phase == RoundPhase::PlayerActing
    }

    pub fn can_stand(&self) -> bool {
        self.phase == RoundPhase::PlayerActing
    }

    pub fn can_double(&self) -> bool {
        self.phase == RoundPhase::PlayerActing
            && self.hands[self.active].can_double()
            && self.bankroll >= self.hands[self.active].bet
    }

    pub fn can_split(&self) -> bool {
        self.phase == RoundPhase::PlayerActing
            && self.hands.len() < MAX_HANDS
            && self.hands[self.active].can_split()
            && self.bankroll >= self.hands[self.active].bet
    }

    // ── Configuration & betting (between rounds) ──

    /// Change the hands-per-shoe threshold (4 or 5); applies to the current
    /// shoe as well.
    pub fn set_reshuffle_after(&mut self, hands: u32) -> Result<(), TableError> {
        validate_reshuffle_after(hands)?;
        self.rules.reshuffle_after = hands;
        Ok(())
    }

    /// Stage chips for the next deal. Cumulative; capped by the bankroll.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), TableError> {
        if self.mid_round() {
            return Err(TableError::InvalidBet("bets are locked during a round"));
        }
        if amount == 0 {
            return Err(TableError::InvalidBet("bet must be positive"));
        }
        let staged = self
            .pending_bet
            .checked_add(amount)
            .filter(|&staged| staged <= self.bankroll)
            .ok_or(TableError::InvalidBet("bet exceeds bankroll"))?;
        self.pending_bet = staged;
        Ok(())
    }

    pub fn clear_bet(&mut self) -> Result<(), TableError> {
        if self.mid_round() {
            return Err(TableError::InvalidBet("bets are locked during a round"));
        }
        self.pending_bet = 0;
        Ok(())
    }

    // ── Round operations ──

    /// Start a round: escrow the staged bet and deal player, dealer up,
    /// player, dealer hole. A dealer two-card 21 settles on the spot.
    pub fn deal_initial(&mut self) -> Result<(), TableError> {
        if self.mid_round() {
            return Err(TableError::IllegalAction("round already in progress"));
        }
        if self.pending_bet == 0 {
            return Err(TableError::InvalidBet("no bet staged"));
        }
        if self.bankroll < self.pending_bet {
            return Err(TableError::InvalidBet("bet exceeds bankroll"));
        }

        if self.shoe.remaining() < SHOE_REFILL_FLOOR {
            self.reshuffle();
        }

        self.clear_round();
        self.bankroll -= self.pending_bet;
        self.hands.push(Hand::new(self.pending_bet));

        let first = self.draw_visible()?;
        self.hands[0].add_card(first);
        let upcard = self.draw_visible()?;
        self.dealer.cards.push(upcard);
        let second = self.draw_visible()?;
        self.hands[0].add_card(second);
        let hole = self.draw_hidden()?;
        self.dealer.cards.push(hole);

        debug!(
            "dealt round: player {} {}, dealer shows {}",
            self.hands[0].cards[0].to_display(),
            self.hands[0].cards[1].to_display(),
            upcard.to_display()
        );

        if is_blackjack(&self.dealer.cards) {
            self.reveal_hole_card();
            self.dealer_blackjack = true;
            info!("dealer blackjack, round settles immediately");
            self.settle();
        } else {
            self.phase = RoundPhase::PlayerActing;
        }
        Ok(())
    }

    /// One more card on the active hand; busting closes it and play moves
    /// on.
    pub fn hit(&mut self) -> Result<(), TableError> {
        self.require_player_turn()?;
        let card = self.draw_visible()?;
        let hand = &mut self.hands[self.active];
        hand.add_card(card);
        if hand.is_busted() {
            hand.state = HandState::Busted;
            self.advance();
        }
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), TableError> {
        self.require_player_turn()?;
        self.hands[self.active].state = HandState::Stood;
        self.advance();
        Ok(())
    }

    /// Double the stake on a fresh two-card hard 9, 10 or 11: one card,
    /// then a forced stand.
    pub fn double(&mut self) -> Result<(), TableError> {
        self.require_player_turn()?;
        if !self.hands[self.active].can_double() {
            return Err(TableError::IllegalAction(
                "double requires a fresh two-card 9, 10 or 11",
            ));
        }
        let stake = self.hands[self.active].bet;
        if self.bankroll < stake {
            return Err(TableError::InvalidBet("cannot fund the doubled stake"));
        }
        let card = self.draw_visible()?;
        self.bankroll -= stake;
        let hand = &mut self.hands[self.active];
        hand.bet *= 2;
        hand.add_card(card);
        hand.state = if hand.is_busted() {
            HandState::Busted
        } else {
            HandState::DoubledStood
        };
        self.advance();
        Ok(())
    }

    /// Split a pair (equal rank or both ten-valued) into two funded hands,
    /// one card dealt to each; play stays on the first.
    pub fn split(&mut self) -> Result<(), TableError> {
        self.require_player_turn()?;
        if self.hands.len() >= MAX_HANDS {
            return Err(TableError::IllegalAction("table limit of four hands reached"));
        }
        if !self.hands[self.active].can_split() {
            return Err(TableError::IllegalAction("split requires a two-card pair"));
        }
        let stake = self.hands[self.active].bet;
        if self.bankroll < stake {
            return Err(TableError::InvalidBet("cannot fund the split stake"));
        }
        if self.shoe.remaining() < 2 {
            return Err(TableError::ShoeEmpty);
        }

        let parent = self.hands.remove(self.active);
        let depth = parent.split_depth + 1;
        let mut first = Hand::split_child(parent.cards[0], stake, depth);
        let mut second = Hand::split_child(parent.cards[1], stake, depth);
        first.add_card(self.draw_visible()?);
        second.add_card(self.draw_visible()?);
        self.bankroll -= stake;
        self.hands.insert(self.active, first);
        self.hands.insert(self.active + 1, second);
        Ok(())
    }

    /// One dealer step: turn the hole card, or draw below 17, or stand and
    /// settle. Callers that animate pace these themselves.
    pub fn dealer_step(&mut self) -> Result<DealerStep, TableError> {
        if self.phase != RoundPhase::DealerActing {
            return Err(TableError::IllegalAction("dealer is not acting"));
        }
        if !self.dealer.hole_revealed {
            self.reveal_hole_card();
            let hole = self.dealer.cards[1];
            debug!("dealer turns over {}", hole.to_display());
            return Ok(DealerStep::HoleRevealed(hole));
        }
        if self.dealer.should_hit() {
            let card = self.draw_visible()?;
            self.dealer.cards.push(card);
            debug!("dealer draws {}", card.to_display());
            return Ok(DealerStep::Drew(card));
        }
        self.settle();
        Ok(DealerStep::Stood)
    }

    /// Run the dealer to completion in one call.
    pub fn resolve_dealer(&mut self) -> Result<(), TableError> {
        while self.phase == RoundPhase::DealerActing {
            self.dealer_step()?;
        }
        Ok(())
    }

    /// Clear the settled round; the shoe, count and bankroll carry over.
    pub fn start_new_round(&mut self) -> Result<(), TableError> {
        if self.mid_round() {
            return Err(TableError::IllegalAction("round still in progress"));
        }
        self.clear_round();
        Ok(())
    }

    // ── Internals ──

    fn mid_round(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::PlayerActing | RoundPhase::DealerActing
        )
    }

    fn require_player_turn(&self) -> Result<(), TableError> {
        if self.phase != RoundPhase::PlayerActing {
            return Err(TableError::IllegalAction("no hand is awaiting a decision"));
        }
        Ok(())
    }

    fn clear_round(&mut self) {
        self.dealer.clear();
        self.hands.clear();
        self.active = 0;
        self.dealer_blackjack = false;
        self.outcomes.clear();
        self.phase = RoundPhase::NoRound;
    }

    fn draw_visible(&mut self) -> Result<Card, TableError> {
        let card = self.shoe.draw()?;
        self.counter.on_card_revealed(card);
        Ok(card)
    }

    fn draw_hidden(&mut self) -> Result<Card, TableError> {
        self.shoe.draw()
    }

    /// Feed the counter exactly once, at the moment the hole card becomes
    /// visible.
    fn reveal_hole_card(&mut self) {
        if self.dealer.hole_revealed {
            return;
        }
        if let Some(&hole) = self.dealer.cards.get(1) {
            self.counter.on_card_revealed(hole);
        }
        self.dealer.hole_revealed = true;
    }

    /// Move to the next decidable hand, hand the round to the dealer, or
    /// settle outright when every hand busted.
    fn advance(&mut self) {
        for i in self.active + 1..self.hands.len() {
            if self.hands[i].is_active() {
                self.active = i;
                return;
            }
        }
        if self.hands.iter().all(|h| h.is_busted()) {
            // Dealer never plays against a dead table; the hole card stays
            // face down and out of the count.
            self.settle();
        } else {
            self.phase = RoundPhase::DealerActing;
        }
    }

    fn outcome_for_hand(hand: &Hand, dealer_total: u8) -> HandOutcome {
        let player_total = hand.value();
        if player_total > 21 {
            return HandOutcome::Loss;
        }
        if dealer_total > 21 {
            return HandOutcome::Win;
        }
        match player_total.cmp(&dealer_total) {
            std::cmp::Ordering::Greater => HandOutcome::Win,
            std::cmp::Ordering::Less => HandOutcome::Loss,
            std::cmp::Ordering::Equal => HandOutcome::Push,
        }
    }

    /// Pay every hand against the final dealer total, sweep the round's
    /// cards to the discard, and reshuffle once the shoe has served its
    /// configured hand count.
    fn settle(&mut self) {
        let dealer_total = self.dealer.total().total;
        self.outcomes = self
            .hands
            .iter()
            .map(|hand| Self::outcome_for_hand(hand, dealer_total))
            .collect();

        let mut credit = 0u64;
        for (hand, outcome) in self.hands.iter().zip(self.outcomes.iter()) {
            credit += match outcome {
                HandOutcome::Win => hand.bet * 2,
                HandOutcome::Push => hand.bet,
                HandOutcome::Loss => 0,
            };
        }
        self.bankroll += credit;

        let mut swept = self.dealer.cards.clone();
        for hand in &self.hands {
            swept.extend_from_slice(&hand.cards);
        }
        self.shoe.collect(swept);

        self.shoe.record_hand_played();
        self.phase = RoundPhase::RoundOver;
        info!(
            "round settled: dealer {}, outcomes {:?}, bankroll {}",
            dealer_total, self.outcomes, self.bankroll
        );

        if self.shoe.hands_played() >= self.rules.reshuffle_after {
            self.reshuffle();
        }
    }

    fn reshuffle(&mut self) {
        self.shoe.reset(&mut self.rng);
        self.counter.reset();
        self.reshuffles += 1;
        info!("shoe reshuffled (#{}), count reset", self.reshuffles);
    }
}
