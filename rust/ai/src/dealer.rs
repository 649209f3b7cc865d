use meadow_engine::betting::{BetContext, BetIntent, validate_bet};
use meadow_engine::player::ActionKind;
use meadow_engine::rng::Lcg;
use rand::RngCore;
use tracing::{debug, trace};

use crate::Difficulty;
use crate::context::{AiDecision, AiModifiers, GameContext};
use crate::personality::{Personality, personality};
use crate::strategy::{self, Brain};
use crate::strength::hand_strength;

/// An AI opponent of a fixed difficulty.
///
/// Every random choice comes from the dealer's own generator, so two dealers built with
/// the same seed make the same decisions for the same contexts.
///
/// # Example
///
/// ```rust
/// use meadow_ai::{create_ai_dealer, Difficulty, GameContext};
/// use meadow_engine::betting::BettingConfig;
/// use meadow_engine::engine::PokerEngine;
///
/// let config = BettingConfig::for_stake(100, Difficulty::Bloom.max_bet_multiplier());
/// let mut engine = PokerEngine::new(config, Some(42));
/// engine.start_hand(1000, 1000).unwrap();
/// engine.deal().unwrap();
///
/// let mut dealer = create_ai_dealer(Difficulty::Bloom, Some(7));
/// let ctx = GameContext::for_dealer(&engine.state(), config, Vec::new());
/// let decision = dealer.decide(&ctx, None);
/// engine.dealer_action_with_fallback(decision.to_action()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AiDealer<R: RngCore = Lcg> {
    difficulty: Difficulty,
    rng: R,
}

impl AiDealer<Lcg> {
    /// Without a seed, one is drawn from the thread RNG.
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self::with_rng(difficulty, Lcg::ansi(seed.unwrap_or_else(rand::random)))
    }
}

impl<R: RngCore> AiDealer<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn personality(&self) -> &'static Personality {
        personality(self.difficulty)
    }

    /// Chooses an action for `ctx`. The result is always legal for the context.
    pub fn decide(&mut self, ctx: &GameContext, modifiers: Option<&AiModifiers>) -> AiDecision {
        let mods = modifiers.copied().unwrap_or_default();
        let difficulty = self.difficulty;
        let mut brain = Brain {
            rng: &mut self.rng,
            personality: personality(difficulty),
        };

        let mut strength = hand_strength(&ctx.hand, &ctx.community);
        if brain.roll() < difficulty.mistake_rate() {
            let misread = brain.roll();
            debug!(?difficulty, strength, misread, "dealer misreads its hand");
            strength = misread;
        }

        let raw = match difficulty {
            Difficulty::Seedling => strategy::seedling(&mut brain, ctx, &mods, strength),
            Difficulty::Sprout => strategy::sprout(&mut brain, ctx, &mods, strength),
            Difficulty::Bloom => strategy::bloom(&mut brain, ctx, &mods, strength),
            Difficulty::Harvest => strategy::harvest(&mut brain, ctx, &mods, strength),
        };
        let decision = sanitize(raw, ctx);
        trace!(
            ?difficulty,
            strength,
            to_call = ctx.to_call(),
            action = %decision.action,
            amount = ?decision.amount,
            bluff = decision.is_bluff,
            "dealer decided"
        );
        decision
    }
}

/// Turns a strategy's wish into something the engine accepts: no check while owing, no
/// fold when checking is free, raises inside the table limits and the stack.
pub fn sanitize(mut decision: AiDecision, ctx: &GameContext) -> AiDecision {
    let to_call = ctx.to_call();
    let passive = if to_call > 0 { ActionKind::Call } else { ActionKind::Check };

    match decision.action {
        ActionKind::Check if to_call > 0 => decision.action = ActionKind::Call,
        ActionKind::Fold | ActionKind::Call if to_call == 0 => decision.action = ActionKind::Check,
        ActionKind::AllIn => decision.amount = Some(ctx.max_total()),
        ActionKind::Raise => {
            let current = ctx.current_bet();
            let min_raise = current.saturating_add(ctx.config.min_bet);
            let wanted = decision.amount.unwrap_or(0).max(min_raise);
            let total = wanted.min(ctx.max_total()).min(ctx.config.max_bet);
            let bet = BetContext {
                current_bet: current,
                own_bet: ctx.own_bet,
                stack: ctx.own_chips,
                config: ctx.config,
                intent: BetIntent::Wager,
            };
            if total > current && validate_bet(total, &bet).is_ok() {
                decision.amount = Some(total);
            } else if ctx.max_total() > current
                && ctx.max_total() < current + ctx.config.min_bet
            {
                // cannot afford a full raise; shove instead
                decision.action = ActionKind::AllIn;
                decision.amount = Some(ctx.max_total());
            } else {
                decision.action = passive;
                decision.amount = None;
            }
        }
        _ => {}
    }
    if decision.action != ActionKind::Raise && decision.action != ActionKind::AllIn {
        decision.amount = None;
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_engine::betting::BettingConfig;
    use meadow_engine::engine::{Phase, Street};

    fn ctx(opponent_bet: u32, own_bet: u32, own_chips: u32) -> GameContext {
        GameContext {
            hand: Vec::new(),
            community: Vec::new(),
            pot: opponent_bet + own_bet,
            opponent_bet,
            own_bet,
            phase: Phase::Preflop,
            betting_round: Some(Street::Preflop),
            opponent_chips: 1000,
            own_chips,
            config: BettingConfig::new(100, 1000, 50, 100).unwrap(),
            opponent_actions: Vec::new(),
        }
    }

    #[test]
    fn check_while_owing_becomes_call() {
        let d = sanitize(AiDecision::passive(ActionKind::Check, 0.5), &ctx(100, 50, 950));
        assert_eq!(d.action, ActionKind::Call);
    }

    #[test]
    fn free_fold_becomes_check() {
        let d = sanitize(AiDecision::passive(ActionKind::Fold, 0.5), &ctx(100, 100, 900));
        assert_eq!(d.action, ActionKind::Check);
    }

    #[test]
    fn raise_below_minimum_is_lifted_to_a_full_raise() {
        let d = sanitize(AiDecision::raise(150, 0.5, false), &ctx(100, 50, 950));
        assert_eq!(d.action, ActionKind::Raise);
        assert_eq!(d.amount, Some(200));
    }

    #[test]
    fn raise_above_table_limit_falls_back() {
        // a full raise would need 1100, past the 1000 limit
        let d = sanitize(AiDecision::raise(1100, 0.5, false), &ctx(1000, 500, 5000));
        assert_eq!(d.action, ActionKind::Call);
        assert_eq!(d.amount, None);
    }

    #[test]
    fn oversized_raise_is_clamped() {
        let d = sanitize(AiDecision::raise(5000, 0.5, false), &ctx(100, 50, 950));
        assert_eq!(d.action, ActionKind::Raise);
        assert_eq!(d.amount, Some(1000));
    }

    #[test]
    fn short_stack_raise_becomes_all_in() {
        let d = sanitize(AiDecision::raise(400, 0.5, false), &ctx(100, 50, 100));
        assert_eq!(d.action, ActionKind::AllIn);
        assert_eq!(d.amount, Some(150));
    }
}
