use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::betting::{validate_bet, BetContext, BetError, BetIntent, BettingConfig};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{ActionError, EngineError};
use crate::hand::{compare_hands, find_best_hand, EvaluatedHand};
use crate::logger::{ActionRecord, HandRecord, HandSummary};
use crate::player::{Participant, PlayerAction, Seat};
use crate::pot::{calculate_side_pot, SidePotContext};

/// Lifecycle of a hand:
/// `Idle → Dealing → Preflop → Flop → Turn → River → Showdown → Result`,
/// with `Fold` reachable from any betting phase and resolved straight into `Result`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Dealing,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Fold,
    Result,
}

impl Phase {
    pub fn is_betting(self) -> bool {
        self.street().is_some()
    }

    /// The betting round played in this phase, if any.
    pub fn street(self) -> Option<Street> {
        match self {
            Phase::Preflop => Some(Street::Preflop),
            Phase::Flop => Some(Street::Flop),
            Phase::Turn => Some(Street::Turn),
            Phase::River => Some(Street::River),
            _ => None,
        }
    }
}

/// A betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Hole cards dealt, no board.
    Preflop,
    /// Three community cards.
    Flop,
    /// Fourth community card.
    Turn,
    /// Fifth community card.
    River,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Dealer,
    Tie,
}

impl From<Participant> for Winner {
    fn from(p: Participant) -> Self {
        match p {
            Participant::Player => Winner::Player,
            Participant::Dealer => Winner::Dealer,
        }
    }
}

/// Read-only snapshot handed to callers. Owns copies of every card list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicEngineState {
    pub phase: Phase,
    pub betting_round: Option<Street>,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub player_bet: u32,
    pub dealer_bet: u32,
    pub current_bet: u32,
    pub player_stack: u32,
    pub dealer_stack: u32,
    /// Chips the player has put in over the whole hand.
    pub player_contributed: u32,
    pub dealer_contributed: u32,
    pub deck_size: usize,
    pub burned: usize,
    pub winner: Option<Winner>,
}

impl PublicEngineState {
    pub fn to_call(&self, who: Participant) -> u32 {
        let own = match who {
            Participant::Player => self.player_bet,
            Participant::Dealer => self.dealer_bet,
        };
        self.current_bet.saturating_sub(own)
    }
}

/// Outcome of an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub action: PlayerAction,
    /// Chips the action moved into the pot (raise: the new round total).
    pub amount: Option<u32>,
    pub new_phase: Phase,
    pub hand_ended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandResult {
    pub winner: Winner,
    /// `None` when the hand ended on a fold and nothing was evaluated.
    pub player_hand: Option<EvaluatedHand>,
    pub dealer_hand: Option<EvaluatedHand>,
    pub pot: u32,
    pub winnings: u32,
}

impl HandResult {
    pub fn folded(&self) -> bool {
        self.player_hand.is_none() && self.dealer_hand.is_none()
    }
}

#[derive(Debug, Clone)]
struct EngineState {
    phase: Phase,
    deck: Option<Deck>,
    player: Seat,
    dealer: Seat,
    community: Vec<Card>,
    burn_pile: Vec<Card>,
    pot: u32,
    current_bet: u32,
    winner: Option<Winner>,
    actions: Vec<ActionRecord>,
    result: Option<HandResult>,
}

impl EngineState {
    fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            deck: None,
            player: Seat::default(),
            dealer: Seat::default(),
            community: Vec::with_capacity(5),
            burn_pile: Vec::with_capacity(3),
            pot: 0,
            current_bet: 0,
            winner: None,
            actions: Vec::new(),
            result: None,
        }
    }
}

/// Heads-up Texas Hold'em state machine.
///
/// One engine plays one hand at a time; the state is owned here and only a
/// [`PublicEngineState`] copy ever leaves. Rejected actions and protocol errors leave the
/// state exactly as it was.
///
/// # Examples
///
/// ```
/// use meadow_engine::betting::BettingConfig;
/// use meadow_engine::engine::{Phase, PokerEngine};
/// use meadow_engine::player::PlayerAction;
///
/// let config = BettingConfig::new(100, 1000, 50, 100).unwrap();
/// let mut engine = PokerEngine::new(config, Some(7));
/// engine.start_hand(1000, 1000).unwrap();
/// engine.deal().unwrap();
///
/// assert!(engine.is_dealer_turn());
/// engine.dealer_action(PlayerAction::Call).unwrap();
/// assert!(engine.is_betting_round_complete());
///
/// engine.advance_phase().unwrap();
/// assert_eq!(engine.phase(), Phase::Flop);
/// assert_eq!(engine.state().community_cards.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PokerEngine {
    config: BettingConfig,
    seed: u64,
    state: EngineState,
}

impl PokerEngine {
    /// Without a seed, one is drawn from the thread RNG.
    pub fn new(config: BettingConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            seed: seed.unwrap_or_else(rand::random),
            state: EngineState::idle(),
        }
    }

    pub fn config(&self) -> &BettingConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed used by the next [`deal`](Self::deal).
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> PublicEngineState {
        let s = &self.state;
        PublicEngineState {
            phase: s.phase,
            betting_round: s.phase.street(),
            player_hand: s.player.hole.clone(),
            dealer_hand: s.dealer.hole.clone(),
            community_cards: s.community.clone(),
            pot: s.pot,
            player_bet: s.player.bet,
            dealer_bet: s.dealer.bet,
            current_bet: s.current_bet,
            player_stack: s.player.stack,
            dealer_stack: s.dealer.stack,
            player_contributed: s.player.contributed,
            dealer_contributed: s.dealer.contributed,
            deck_size: s.deck.as_ref().map_or(0, Deck::remaining),
            burned: s.burn_pile.len(),
            winner: s.winner,
        }
    }

    /// Actions taken so far in this hand, oldest first.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.state.actions
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.state.result.as_ref()
    }

    /// Discards everything and returns to `Idle`.
    pub fn reset(&mut self) {
        self.state = EngineState::idle();
    }

    /// Resets all hand state and waits for [`deal`](Self::deal).
    pub fn start_hand(&mut self, player_stack: u32, dealer_stack: u32) -> Result<(), EngineError> {
        if player_stack == 0 {
            return Err(EngineError::EmptyStack("player"));
        }
        if dealer_stack == 0 {
            return Err(EngineError::EmptyStack("dealer"));
        }
        // the pot and every stack stay below the combined total
        if player_stack.checked_add(dealer_stack).is_none() {
            return Err(EngineError::StackOverflow {
                player: player_stack,
                dealer: dealer_stack,
            });
        }
        let mut state = EngineState::idle();
        state.player = Seat::new(player_stack);
        state.dealer = Seat::new(dealer_stack);
        state.phase = Phase::Dealing;
        self.state = state;
        debug!(player_stack, dealer_stack, "hand started");
        Ok(())
    }

    /// Shuffles, deals two hole cards each and posts the blinds.
    ///
    /// Heads-up the dealer posts the small blind and the player the big blind. The big
    /// blind counts as the player's pre-flop action, so the dealer acts first and a call
    /// from the dealer closes the round.
    pub fn deal(&mut self) -> Result<(), EngineError> {
        if self.state.phase != Phase::Dealing {
            return Err(EngineError::InvalidPhase {
                operation: "deal",
                actual: self.state.phase,
            });
        }

        let mut deck = Deck::new_with_seed(self.seed);
        let player_hole = vec![deck.draw()?, deck.draw()?];
        let dealer_hole = vec![deck.draw()?, deck.draw()?];

        let s = &mut self.state;
        s.deck = Some(deck);
        s.player.hole = player_hole;
        s.dealer.hole = dealer_hole;

        s.dealer.commit(self.config.small_blind);
        s.player.commit(self.config.big_blind);
        s.pot = s.player.contributed + s.dealer.contributed;
        s.current_bet = s.player.bet.max(s.dealer.bet);

        s.player.acted = true;
        s.dealer.acted = false;
        s.phase = Phase::Preflop;
        self.mark_all_in_seats();

        debug!(
            seed = self.seed,
            pot = self.state.pot,
            current_bet = self.state.current_bet,
            "hole cards dealt and blinds posted"
        );
        Ok(())
    }

    pub fn is_player_turn(&self) -> bool {
        let s = &self.state;
        match s.phase {
            Phase::Preflop => s.dealer.acted && !s.player.acted,
            Phase::Flop | Phase::Turn | Phase::River => !s.player.acted,
            _ => false,
        }
    }

    pub fn is_dealer_turn(&self) -> bool {
        let s = &self.state;
        match s.phase {
            Phase::Preflop => !s.dealer.acted,
            Phase::Flop | Phase::Turn | Phase::River => s.player.acted && !s.dealer.acted,
            _ => false,
        }
    }

    /// Both parties have acted and the bets are level. A party that is all-in for less
    /// than the current bet counts as level.
    pub fn is_betting_round_complete(&self) -> bool {
        let s = &self.state;
        if !(s.player.acted && s.dealer.acted) {
            return false;
        }
        match s.player.bet.cmp(&s.dealer.bet) {
            std::cmp::Ordering::Equal => true,
            std::cmp::Ordering::Less => s.player.is_all_in(),
            std::cmp::Ordering::Greater => s.dealer.is_all_in(),
        }
    }

    /// Chips `who` needs to put in to match the current bet.
    pub fn to_call(&self, who: Participant) -> u32 {
        self.state
            .current_bet
            .saturating_sub(self.seat(who).bet)
    }

    pub fn player_action(&mut self, action: PlayerAction) -> Result<ActionResult, ActionError> {
        if !self.state.phase.is_betting() {
            return Err(ActionError::NotBettingPhase);
        }
        if !self.is_player_turn() {
            return Err(ActionError::NotYourTurn("player"));
        }
        self.execute(Participant::Player, action)
    }

    pub fn dealer_action(&mut self, action: PlayerAction) -> Result<ActionResult, ActionError> {
        if !self.state.phase.is_betting() {
            return Err(ActionError::NotBettingPhase);
        }
        if !self.is_dealer_turn() {
            return Err(ActionError::NotYourTurn("dealer"));
        }
        self.execute(Participant::Dealer, action)
    }

    /// Applies a dealer action, downgrading it to call (when behind) or check if the
    /// engine rejects it. Turn and phase errors are still returned.
    pub fn dealer_action_with_fallback(
        &mut self,
        action: PlayerAction,
    ) -> Result<ActionResult, ActionError> {
        match self.dealer_action(action) {
            Ok(result) => Ok(result),
            Err(e @ (ActionError::NotYourTurn(_) | ActionError::NotBettingPhase)) => Err(e),
            Err(e) => {
                let fallback = if self.to_call(Participant::Dealer) > 0 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Check
                };
                warn!(?action, ?fallback, error = %e, "dealer action rejected, falling back");
                self.dealer_action(fallback)
            }
        }
    }

    fn execute(
        &mut self,
        who: Participant,
        action: PlayerAction,
    ) -> Result<ActionResult, ActionError> {
        let to_call = self.to_call(who);
        let street = self.state.phase.street().ok_or(ActionError::NotBettingPhase)?;

        let amount = match action {
            PlayerAction::Fold => {
                self.state.phase = Phase::Fold;
                self.state.winner = Some(who.opponent().into());
                None
            }
            PlayerAction::Check => {
                if to_call > 0 {
                    return Err(ActionError::CannotCheck);
                }
                self.seat_mut(who).acted = true;
                None
            }
            PlayerAction::Call => {
                let paid = to_call.min(self.seat(who).stack);
                let seat = self.seat_mut(who);
                seat.commit(paid);
                seat.acted = true;
                self.state.pot += paid;
                Some(paid)
            }
            PlayerAction::Raise(total) => {
                let increase = self.validate_raise(who, total)?;
                let seat = self.seat_mut(who);
                seat.commit(increase);
                seat.acted = true;
                self.state.pot += increase;
                self.state.current_bet = total;
                self.seat_mut(who.opponent()).acted = false;
                Some(total)
            }
            PlayerAction::AllIn => {
                let seat = self.seat_mut(who);
                let shoved = seat.stack;
                seat.commit(shoved);
                seat.acted = true;
                let new_bet = seat.bet;
                self.state.pot += shoved;
                if new_bet > self.state.current_bet {
                    self.state.current_bet = new_bet;
                    self.seat_mut(who.opponent()).acted = false;
                }
                Some(shoved)
            }
        };
        self.mark_all_in_seats();

        self.state.actions.push(ActionRecord {
            actor: who,
            street,
            action,
            amount: amount.unwrap_or(0),
        });
        debug!(
            actor = %who,
            ?action,
            pot = self.state.pot,
            current_bet = self.state.current_bet,
            "action applied"
        );

        Ok(ActionResult {
            action,
            amount,
            new_phase: self.state.phase,
            hand_ended: self.state.phase == Phase::Fold,
        })
    }

    /// Returns the chips a raise to `total` moves from the stack.
    fn validate_raise(&self, who: Participant, total: u32) -> Result<u32, ActionError> {
        let current_bet = self.state.current_bet;
        if total <= current_bet {
            return Err(ActionError::RaiseTooSmall {
                minimum: current_bet + self.config.min_bet,
            });
        }
        let seat = self.seat(who);
        let ctx = BetContext {
            current_bet,
            own_bet: seat.bet,
            stack: seat.stack,
            config: self.config,
            intent: BetIntent::Wager,
        };
        validate_bet(total, &ctx)
            .map(|bet| bet.increase)
            .map_err(|e| match e {
                BetError::BelowMinimum { minimum } | BetError::RaiseTooSmall { minimum } => {
                    ActionError::RaiseTooSmall { minimum }
                }
                BetError::AboveMaximum { maximum } => ActionError::RaiseTooLarge { maximum },
                BetError::InsufficientChips { .. } => ActionError::InsufficientChips,
            })
    }

    /// Closes the round and deals the next street (burn + 3, burn + 1, burn + 1), or
    /// moves from the river to showdown.
    pub fn advance_phase(&mut self) -> Result<(), EngineError> {
        let next = match self.state.phase {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => Phase::Showdown,
            other => {
                return Err(EngineError::InvalidPhase {
                    operation: "advance",
                    actual: other,
                })
            }
        };
        if !self.is_betting_round_complete() {
            return Err(EngineError::RoundIncomplete);
        }

        let to_reveal = match next {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        };
        let mut burned = None;
        let mut revealed = Vec::with_capacity(to_reveal);
        if to_reveal > 0 {
            let mut deck = self.state.deck.clone().ok_or(EngineError::DeckExhausted)?;
            burned = Some(deck.draw()?);
            for _ in 0..to_reveal {
                revealed.push(deck.draw()?);
            }
            self.state.deck = Some(deck);
        }

        self.return_uncalled();
        let s = &mut self.state;
        s.burn_pile.extend(burned);
        s.community.extend(revealed);
        s.player.reset_round();
        s.dealer.reset_round();
        s.current_bet = 0;
        s.phase = next;

        if next.is_betting() && (s.player.is_all_in() || s.dealer.is_all_in()) {
            s.player.acted = true;
            s.dealer.acted = true;
        }

        debug!(phase = ?next, pot = self.state.pot, board = self.state.community.len(), "phase advanced");
        Ok(())
    }

    /// Hands the pot to the winner and moves to `Result`. A fold short-circuits without
    /// evaluating anything; a showdown compares both best 7-card hands by value.
    pub fn resolve_hand(&mut self) -> Result<HandResult, EngineError> {
        let result = match self.state.phase {
            Phase::Fold => {
                let winner = self.state.winner.ok_or(EngineError::InvalidPhase {
                    operation: "resolve",
                    actual: Phase::Fold,
                })?;
                HandResult {
                    winner,
                    player_hand: None,
                    dealer_hand: None,
                    pot: self.state.pot,
                    winnings: self.state.pot,
                }
            }
            Phase::Showdown => {
                let s = &self.state;
                let player_cards: Vec<Card> =
                    s.player.hole.iter().chain(&s.community).copied().collect();
                let dealer_cards: Vec<Card> =
                    s.dealer.hole.iter().chain(&s.community).copied().collect();
                let player_hand = find_best_hand(&player_cards)?;
                let dealer_hand = find_best_hand(&dealer_cards)?;
                let winner = match compare_hands(&player_hand, &dealer_hand) {
                    std::cmp::Ordering::Greater => Winner::Player,
                    std::cmp::Ordering::Less => Winner::Dealer,
                    std::cmp::Ordering::Equal => Winner::Tie,
                };
                HandResult {
                    winner,
                    player_hand: Some(player_hand),
                    dealer_hand: Some(dealer_hand),
                    pot: s.pot,
                    winnings: s.pot,
                }
            }
            Phase::Result => return Err(EngineError::HandAlreadyComplete),
            other => {
                return Err(EngineError::InvalidPhase {
                    operation: "resolve",
                    actual: other,
                })
            }
        };

        self.pay_out(result.winner);
        self.state.winner = Some(result.winner);
        self.state.phase = Phase::Result;
        self.state.result = Some(result.clone());
        debug!(winner = ?result.winner, pot = result.pot, "hand resolved");
        Ok(result)
    }

    /// Advances every completed round and resolves the hand once it reaches showdown or
    /// a fold. Returns `None` while somebody still has to act.
    pub fn settle(&mut self) -> Result<Option<HandResult>, EngineError> {
        loop {
            match self.state.phase {
                Phase::Showdown | Phase::Fold => return self.resolve_hand().map(Some),
                p if p.is_betting() && self.is_betting_round_complete() => self.advance_phase()?,
                _ => return Ok(None),
            }
        }
    }

    /// History record of the current hand for JSONL logging.
    pub fn hand_record(&self, hand_id: String) -> HandRecord {
        let s = &self.state;
        HandRecord {
            hand_id,
            seed: Some(self.seed),
            config: self.config,
            player_hole: s.player.hole.clone(),
            dealer_hole: s.dealer.hole.clone(),
            board: s.community.clone(),
            actions: s.actions.clone(),
            result: s.result.as_ref().map(HandSummary::from),
            ts: None,
        }
    }

    fn seat(&self, who: Participant) -> &Seat {
        match who {
            Participant::Player => &self.state.player,
            Participant::Dealer => &self.state.dealer,
        }
    }

    fn seat_mut(&mut self, who: Participant) -> &mut Seat {
        match who {
            Participant::Player => &mut self.state.player,
            Participant::Dealer => &mut self.state.dealer,
        }
    }

    /// A party with nothing behind cannot act again this hand.
    fn mark_all_in_seats(&mut self) {
        for seat in [&mut self.state.player, &mut self.state.dealer] {
            if seat.is_all_in() {
                seat.acted = true;
            }
        }
    }

    /// Gives back the part of a bet the all-in opponent could not match.
    fn return_uncalled(&mut self) {
        let s = &mut self.state;
        let (over, under) = if s.player.bet > s.dealer.bet {
            (&mut s.player, &s.dealer)
        } else if s.dealer.bet > s.player.bet {
            (&mut s.dealer, &s.player)
        } else {
            return;
        };
        let split = calculate_side_pot(&SidePotContext {
            player_all_in: over.bet,
            dealer_stack: under.bet,
            existing_pot: s.pot - over.bet - under.bet,
            third_party_all_in: None,
        });
        over.refund(split.return_to_player);
        s.pot -= split.return_to_player;
    }

    fn pay_out(&mut self, winner: Winner) {
        let s = &mut self.state;
        match winner {
            Winner::Player => s.player.stack += s.pot,
            Winner::Dealer => s.dealer.stack += s.pot,
            Winner::Tie => {
                let half = s.pot / 2;
                s.dealer.stack += half;
                s.player.stack += s.pot - half;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PokerEngine {
        let config = BettingConfig::new(100, 1000, 50, 100).unwrap();
        let mut e = PokerEngine::new(config, Some(42));
        e.start_hand(1000, 1000).unwrap();
        e.deal().unwrap();
        e
    }

    #[test]
    fn deal_posts_blinds() {
        let e = engine();
        let st = e.state();
        assert_eq!(st.phase, Phase::Preflop);
        assert_eq!((st.dealer_bet, st.player_bet), (50, 100));
        assert_eq!((st.dealer_stack, st.player_stack), (950, 900));
        assert_eq!(st.pot, 150);
        assert_eq!(st.deck_size, 48);
    }

    #[test]
    fn deal_twice_is_a_protocol_error() {
        let mut e = engine();
        assert!(matches!(
            e.deal(),
            Err(EngineError::InvalidPhase { operation: "deal", .. })
        ));
    }

    #[test]
    fn settle_runs_out_the_board_after_all_in_call() {
        let mut e = engine();
        e.dealer_action(PlayerAction::AllIn).unwrap();
        e.player_action(PlayerAction::Call).unwrap();
        let result = e.settle().unwrap().expect("hand resolves");
        assert_eq!(e.phase(), Phase::Result);
        assert_eq!(e.state().community_cards.len(), 5);
        assert_eq!(e.state().burned, 3);
        assert_eq!(result.pot, 2000);
        let st = e.state();
        assert_eq!(st.player_stack + st.dealer_stack, 2000);
    }

    #[test]
    fn start_hand_rejects_empty_stack() {
        let config = BettingConfig::new(100, 1000, 50, 100).unwrap();
        let mut e = PokerEngine::new(config, Some(1));
        assert_eq!(e.start_hand(0, 100), Err(EngineError::EmptyStack("player")));
        assert_eq!(e.phase(), Phase::Idle);
    }
}
