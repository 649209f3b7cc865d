//! Bet legality, pot odds and sizing presets.
//!
//! Everything here is pure arithmetic over a [`BetContext`]; the engine calls
//! [`validate_bet`] before it mutates any state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::EngineError;

/// Table limits for one hand. Immutable while the hand is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingConfig {
    pub min_bet: u32,
    pub max_bet: u32,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl BettingConfig {
    pub fn new(
        min_bet: u32,
        max_bet: u32,
        small_blind: u32,
        big_blind: u32,
    ) -> Result<Self, EngineError> {
        if small_blind == 0 || small_blind > big_blind {
            return Err(EngineError::InvalidConfig(format!(
                "blinds must satisfy 0 < small ({}) <= big ({})",
                small_blind, big_blind
            )));
        }
        if min_bet == 0 || min_bet > max_bet {
            return Err(EngineError::InvalidConfig(format!(
                "bets must satisfy 0 < min ({}) <= max ({})",
                min_bet, max_bet
            )));
        }
        Ok(Self {
            min_bet,
            max_bet,
            small_blind,
            big_blind,
        })
    }

    /// Limits derived from a stake: the big blind is at least 50, the small blind is half
    /// of it (at least 25), the minimum bet is one big blind and the maximum is
    /// `max_multiplier` big blinds.
    pub fn for_stake(stake: u32, max_multiplier: u32) -> Self {
        let big_blind = stake.max(50);
        let small_blind = (big_blind / 2).max(25);
        Self {
            min_bet: big_blind,
            max_bet: big_blind.saturating_mul(max_multiplier.max(1)),
            small_blind,
            big_blind,
        }
    }
}

/// What the bettor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetIntent {
    /// Bet or raise to the given total.
    Wager,
    Call,
    AllIn,
}

/// The bettor's view of the current round.
#[derive(Debug, Clone, Copy)]
pub struct BetContext {
    /// Highest total bet in the round.
    pub current_bet: u32,
    /// What the bettor has already put in this round.
    pub own_bet: u32,
    pub stack: u32,
    pub config: BettingConfig,
    pub intent: BetIntent,
}

impl BetContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.own_bet)
    }
}

/// An accepted bet: the bettor's new round total and the chips it moves from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidBet {
    pub total: u32,
    pub increase: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet must be at least the minimum of {minimum}")]
    BelowMinimum { minimum: u32 },
    #[error("Bet cannot exceed the maximum of {maximum}")]
    AboveMaximum { maximum: u32 },
    #[error("Not enough chips. You have {stack}")]
    InsufficientChips { stack: u32 },
    #[error("Raise must be at least {minimum}")]
    RaiseTooSmall { minimum: u32 },
}

/// Validates a bet of `amount` (a round total) against the context.
///
/// Calls always succeed, clamped to the stack. All-ins always succeed regardless of the
/// table limits. Wagers must sit inside `[min_bet, max_bet]`, be affordable, and a raise
/// must reach `current_bet + min_bet`.
pub fn validate_bet(amount: u32, ctx: &BetContext) -> Result<ValidBet, BetError> {
    match ctx.intent {
        BetIntent::Call => {
            let increase = ctx.to_call().min(ctx.stack);
            Ok(ValidBet {
                total: ctx.own_bet + increase,
                increase,
            })
        }
        BetIntent::AllIn => Ok(ValidBet {
            total: ctx.own_bet + ctx.stack,
            increase: ctx.stack,
        }),
        BetIntent::Wager => {
            let config = ctx.config;
            if amount < config.min_bet {
                return Err(BetError::BelowMinimum {
                    minimum: config.min_bet,
                });
            }
            if amount > config.max_bet {
                return Err(BetError::AboveMaximum {
                    maximum: config.max_bet,
                });
            }
            if amount < ctx.own_bet {
                return Err(BetError::BelowMinimum {
                    minimum: ctx.own_bet,
                });
            }
            let increase = amount - ctx.own_bet;
            if increase > ctx.stack {
                return Err(BetError::InsufficientChips { stack: ctx.stack });
            }
            if amount > ctx.current_bet {
                let minimum = ctx.current_bet + config.min_bet;
                if amount < minimum {
                    return Err(BetError::RaiseTooSmall { minimum });
                }
            }
            Ok(ValidBet {
                total: amount,
                increase,
            })
        }
    }
}

/// Pot odds for a call of `call_amount` into `pot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotOdds {
    /// `call / (pot + call)`, 0 when the call is free.
    pub pot_odds: f64,
    pub pot_odds_percent: f64,
    /// `call / (pot + call + implied)`
    pub implied_odds: f64,
    /// Minimum win probability for the call to break even.
    pub break_even_equity: f64,
}

impl PotOdds {
    /// Whether a call is profitable for the given win probability. Free calls always are.
    pub fn is_good_call(&self, equity: f64) -> bool {
        equity >= self.break_even_equity
    }
}

pub fn calculate_pot_odds(pot: u32, call_amount: u32, implied_value: u32) -> PotOdds {
    if call_amount == 0 {
        return PotOdds {
            pot_odds: 0.0,
            pot_odds_percent: 0.0,
            implied_odds: 0.0,
            break_even_equity: 0.0,
        };
    }
    let call = call_amount as f64;
    let pot_odds = call / (pot as f64 + call);
    let implied_odds = call / (pot as f64 + call + implied_value as f64);
    PotOdds {
        pot_odds,
        pot_odds_percent: pot_odds * 100.0,
        implied_odds,
        break_even_equity: pot_odds,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickBetPresets {
    pub quarter_pot: u32,
    pub half_pot: u32,
    pub three_quarter_pot: u32,
    pub pot: u32,
    /// `min(stack + own_bet, max_bet)`
    pub max_bet: u32,
}

/// Fractional pot sizes, each clamped to `[min_bet, min(stack + own_bet, max_bet)]`.
pub fn quick_bet_presets(pot: u32, ctx: &BetContext) -> QuickBetPresets {
    let effective_max = (ctx.stack + ctx.own_bet).min(ctx.config.max_bet);
    let fraction = |f: f64| (pot as f64 * f).round() as u32;
    let constrain = |bet: u32| bet.max(ctx.config.min_bet).min(effective_max);
    QuickBetPresets {
        quarter_pot: constrain(fraction(0.25)),
        half_pot: constrain(fraction(0.5)),
        three_quarter_pot: constrain(fraction(0.75)),
        pot: constrain(pot),
        max_bet: effective_max,
    }
}

/// Chips needed to call, limited by the stack.
pub fn call_amount(current_bet: u32, own_bet: u32, stack: u32) -> u32 {
    current_bet.saturating_sub(own_bet).min(stack)
}

pub fn can_afford_call(current_bet: u32, own_bet: u32, stack: u32) -> bool {
    stack > 0 || own_bet >= current_bet
}

pub fn is_all_in(stack: u32) -> bool {
    stack == 0
}

/// Chips added to reach `total` from `own_bet`.
pub fn raise_amount(total: u32, own_bet: u32) -> u32 {
    total.saturating_sub(own_bet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BettingConfig {
        BettingConfig::new(100, 1000, 50, 100).unwrap()
    }

    #[test]
    fn config_rejects_inverted_blinds() {
        assert!(BettingConfig::new(100, 1000, 200, 100).is_err());
        assert!(BettingConfig::new(0, 1000, 50, 100).is_err());
    }

    #[test]
    fn for_stake_applies_floors() {
        let c = BettingConfig::for_stake(10, 4);
        assert_eq!(c.big_blind, 50);
        assert_eq!(c.small_blind, 25);
        assert_eq!(c.min_bet, 50);
        assert_eq!(c.max_bet, 200);

        let c = BettingConfig::for_stake(300, 10);
        assert_eq!(c.small_blind, 150);
        assert_eq!(c.max_bet, 3000);
    }

    #[test]
    fn presets_clamp_to_limits() {
        let ctx = BetContext {
            current_bet: 0,
            own_bet: 0,
            stack: 500,
            config: cfg(),
            intent: BetIntent::Wager,
        };
        let p = quick_bet_presets(1000, &ctx);
        assert_eq!(p.quarter_pot, 250);
        assert_eq!(p.half_pot, 500);
        assert_eq!(p.three_quarter_pot, 500);
        assert_eq!(p.pot, 500);
        assert_eq!(p.max_bet, 500);

        let p = quick_bet_presets(100, &ctx);
        assert_eq!(p.quarter_pot, 100);
    }

    #[test]
    fn helper_arithmetic() {
        assert_eq!(call_amount(300, 100, 150), 150);
        assert_eq!(call_amount(100, 300, 150), 0);
        assert!(can_afford_call(100, 100, 0));
        assert!(!can_afford_call(200, 100, 0));
        assert!(is_all_in(0));
        assert_eq!(raise_amount(400, 100), 300);
    }
}
