//! What a dealer sees when it is asked to act, and what it answers.

use meadow_engine::betting::BettingConfig;
use meadow_engine::cards::Card;
use meadow_engine::engine::{Phase, PublicEngineState, Street};
use meadow_engine::logger::ActionRecord;
use meadow_engine::player::{ActionKind, Participant, PlayerAction};
use serde::Serialize;

/// The table from the point of view of the seat the AI plays.
///
/// `own_*` fields describe the AI's seat, `opponent_*` fields the other one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameContext {
    pub hand: Vec<Card>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub opponent_bet: u32,
    pub own_bet: u32,
    pub phase: Phase,
    pub betting_round: Option<Street>,
    pub opponent_chips: u32,
    pub own_chips: u32,
    pub config: BettingConfig,
    /// Opponent actions seen so far this session, oldest first
    pub opponent_actions: Vec<ActionKind>,
}

impl GameContext {
    /// Context for an AI sitting in `seat`.
    pub fn for_seat(
        state: &PublicEngineState,
        config: BettingConfig,
        seat: Participant,
        opponent_actions: Vec<ActionKind>,
    ) -> Self {
        let (hand, own_bet, own_chips, opponent_bet, opponent_chips) = match seat {
            Participant::Dealer => (
                &state.dealer_hand,
                state.dealer_bet,
                state.dealer_stack,
                state.player_bet,
                state.player_stack,
            ),
            Participant::Player => (
                &state.player_hand,
                state.player_bet,
                state.player_stack,
                state.dealer_bet,
                state.dealer_stack,
            ),
        };
        Self {
            hand: hand.clone(),
            community: state.community_cards.clone(),
            pot: state.pot,
            opponent_bet,
            own_bet,
            phase: state.phase,
            betting_round: state.betting_round,
            opponent_chips,
            own_chips,
            config,
            opponent_actions,
        }
    }

    pub fn for_dealer(
        state: &PublicEngineState,
        config: BettingConfig,
        opponent_actions: Vec<ActionKind>,
    ) -> Self {
        Self::for_seat(state, config, Participant::Dealer, opponent_actions)
    }

    /// Mirror image of [`for_dealer`](Self::for_dealer), for an AI in the player's seat.
    pub fn for_player(
        state: &PublicEngineState,
        config: BettingConfig,
        opponent_actions: Vec<ActionKind>,
    ) -> Self {
        Self::for_seat(state, config, Participant::Player, opponent_actions)
    }

    pub fn to_call(&self) -> u32 {
        self.opponent_bet.saturating_sub(self.own_bet)
    }

    /// Highest bet on the table this round.
    pub fn current_bet(&self) -> u32 {
        self.opponent_bet.max(self.own_bet)
    }

    /// Largest round total the AI can reach.
    pub fn max_total(&self) -> u32 {
        self.own_bet + self.own_chips
    }
}

/// Opponent action kinds in a hand's log, as seen from `seat`.
pub fn opponent_actions(log: &[ActionRecord], seat: Participant) -> Vec<ActionKind> {
    log.iter()
        .filter(|r| r.actor == seat.opponent())
        .map(|r| r.action.kind())
        .collect()
}

/// Effects an opponent can put on the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AiModifiers {
    /// The dealer cannot read the opponent's action history.
    pub scrambled: bool,
    /// The strength estimate is scaled down by `skill_reduction`.
    pub distracted: bool,
    pub skill_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiDecision {
    pub action: ActionKind,
    /// Round total for raises, full commitment for all-ins
    pub amount: Option<u32>,
    pub confidence: f64,
    pub is_bluff: bool,
    pub reasoning: Option<&'static str>,
}

impl AiDecision {
    pub(crate) fn passive(action: ActionKind, confidence: f64) -> Self {
        Self {
            action,
            amount: None,
            confidence,
            is_bluff: false,
            reasoning: None,
        }
    }

    pub(crate) fn raise(amount: u32, confidence: f64, is_bluff: bool) -> Self {
        Self {
            action: ActionKind::Raise,
            amount: Some(amount),
            confidence,
            is_bluff,
            reasoning: None,
        }
    }

    pub(crate) fn because(mut self, reasoning: &'static str) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    /// The engine action this decision maps to.
    pub fn to_action(&self) -> PlayerAction {
        match self.action {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Raise => PlayerAction::Raise(self.amount.unwrap_or(0)),
            ActionKind::AllIn => PlayerAction::AllIn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_engine::engine::PokerEngine;

    #[test]
    fn seats_mirror_each_other() {
        let config = BettingConfig::new(100, 1000, 50, 100).unwrap();
        let mut engine = PokerEngine::new(config, Some(3));
        engine.start_hand(1000, 800).unwrap();
        engine.deal().unwrap();
        let state = engine.state();

        let dealer = GameContext::for_dealer(&state, config, Vec::new());
        assert_eq!(dealer.hand, state.dealer_hand);
        assert_eq!((dealer.own_bet, dealer.opponent_bet), (50, 100));
        assert_eq!(dealer.to_call(), 50);
        assert_eq!(dealer.max_total(), 800);

        let player = GameContext::for_player(&state, config, Vec::new());
        assert_eq!(player.hand, state.player_hand);
        assert_eq!(player.to_call(), 0);
        assert_eq!(player.own_chips, 900);
    }

    #[test]
    fn decisions_map_to_engine_actions() {
        assert_eq!(
            AiDecision::raise(300, 0.5, false).to_action(),
            PlayerAction::Raise(300)
        );
        assert_eq!(
            AiDecision::passive(ActionKind::AllIn, 0.9).to_action(),
            PlayerAction::AllIn
        );
    }
}
