//! The four decision policies. They share the primitives on [`Brain`] and differ only in
//! how they combine them.

use meadow_engine::engine::Street;
use meadow_engine::player::ActionKind;
use rand::RngCore;

use crate::context::{AiDecision, AiModifiers, GameContext};
use crate::personality::Personality;
use crate::strength::{draw_potential, hand_strength, pot_odds};

/// Shared decision primitives over the dealer's private random sequence.
pub(crate) struct Brain<'a, R: RngCore + ?Sized> {
    pub rng: &'a mut R,
    pub personality: &'static Personality,
}

impl<R: RngCore + ?Sized> Brain<'_, R> {
    /// Uniform draw on `[0, 1)` in steps of 0.001. One generator step per draw.
    pub fn roll(&mut self) -> f64 {
        (self.rng.next_u32() % 1000) as f64 / 1000.0
    }

    pub fn should_bluff(&mut self, ctx: &GameContext) -> bool {
        if self.roll() > self.personality.bluff_frequency {
            return false;
        }
        if ctx.pot as f64 > ctx.own_chips as f64 * self.personality.risk_tolerance {
            return false;
        }
        if ctx.betting_round == Some(Street::River) && hand_strength(&ctx.hand, &ctx.community) > 0.6 {
            return false;
        }
        true
    }

    /// Weakest hand worth continuing with; tighter dealers need more.
    pub fn continue_threshold(&self) -> f64 {
        0.2 + 0.3 * self.personality.tightness
    }

    /// Round total to raise to, scaled by pot, strength and aggression. Never below a
    /// full minimum raise, and kept inside the table limits and the stack.
    pub fn raise_to(&self, ctx: &GameContext, strength: f64) -> u32 {
        let strength_factor = 0.3 + strength * 0.7;
        let aggression = 0.5 + self.personality.aggression * 0.5;
        let sized = (ctx.pot as f64 * strength_factor * aggression).round() as u32;
        let min_raise = ctx.current_bet().saturating_add(ctx.config.min_bet);
        let total = sized.max(min_raise).min(ctx.config.max_bet);
        total.min(ctx.max_total())
    }
}

#[derive(Debug, Clone, Copy)]
struct OpponentProfile {
    aggression: f64,
    fold_rate: f64,
}

/// Observed opponent tendencies, pulled toward a neutral prior. `adaptability` is the
/// weight given to what was actually seen.
fn read_opponent(
    ctx: &GameContext,
    mods: &AiModifiers,
    min_samples: usize,
    adaptability: f64,
) -> OpponentProfile {
    let mut profile = OpponentProfile {
        aggression: 0.5,
        fold_rate: 0.3,
    };
    let seen = &ctx.opponent_actions;
    if mods.scrambled || seen.is_empty() || seen.len() < min_samples {
        return profile;
    }
    let share = |kind: ActionKind| {
        seen.iter().filter(|a| **a == kind).count() as f64 / seen.len() as f64
    };
    let blend = |prior: f64, observed: f64| prior + (observed - prior) * adaptability;
    profile.aggression = blend(profile.aggression, share(ActionKind::Raise));
    profile.fold_rate = blend(profile.fold_rate, share(ActionKind::Fold));
    profile
}

fn check_or(ctx: &GameContext, otherwise: ActionKind, confidence: f64) -> AiDecision {
    if ctx.to_call() == 0 {
        AiDecision::passive(ActionKind::Check, confidence)
    } else {
        AiDecision::passive(otherwise, confidence)
    }
}

/// Passive and predictable: raises only strong hands, never bluffs.
pub(crate) fn seedling<R: RngCore + ?Sized>(
    brain: &mut Brain<'_, R>,
    ctx: &GameContext,
    mods: &AiModifiers,
    strength: f64,
) -> AiDecision {
    let odds = pot_odds(ctx);
    let strength = if mods.distracted {
        strength * (1.0 - mods.skill_reduction * 0.5)
    } else {
        strength
    };

    if strength > 0.7 {
        return AiDecision::raise(brain.raise_to(ctx, strength), strength, false);
    }
    if strength > brain.continue_threshold() || (odds < 0.2 && strength > 0.25) {
        return if ctx.to_call() == 0 {
            AiDecision::passive(ActionKind::Check, 0.6)
        } else {
            AiDecision::passive(ActionKind::Call, 0.5)
        };
    }
    check_or(ctx, ActionKind::Fold, 0.7)
}

/// Balanced, with occasional bluffs and the odd bet of a medium hand.
pub(crate) fn sprout<R: RngCore + ?Sized>(
    brain: &mut Brain<'_, R>,
    ctx: &GameContext,
    mods: &AiModifiers,
    strength: f64,
) -> AiDecision {
    let odds = pot_odds(ctx);
    let to_call = ctx.to_call();
    let strength = if mods.distracted {
        strength * (1.0 - mods.skill_reduction * 0.5)
    } else {
        strength
    };

    if strength < 0.3 && brain.should_bluff(ctx) {
        return AiDecision::raise(brain.raise_to(ctx, 0.6), 0.4, true);
    }
    if strength > 0.65 {
        return AiDecision::raise(brain.raise_to(ctx, strength), strength, false);
    }
    if strength > brain.continue_threshold() && (odds < strength * 0.8 || to_call == 0) {
        if to_call > 0 {
            return AiDecision::passive(ActionKind::Call, 0.5);
        }
        if brain.roll() < 0.3 {
            return AiDecision::raise(brain.raise_to(ctx, strength * 0.8), 0.5, false);
        }
        return AiDecision::passive(ActionKind::Check, 0.5);
    }
    check_or(ctx, ActionKind::Fold, 0.6)
}

/// Aggressive; semi-bluffs draws and calls down opponents that raise a lot.
pub(crate) fn bloom<R: RngCore + ?Sized>(
    brain: &mut Brain<'_, R>,
    ctx: &GameContext,
    mods: &AiModifiers,
    strength: f64,
) -> AiDecision {
    let odds = pot_odds(ctx);
    let to_call = ctx.to_call();
    let strength = if mods.distracted {
        strength * (1.0 - mods.skill_reduction)
    } else {
        strength
    };
    let opponent = read_opponent(ctx, mods, 1, brain.personality.adaptability);

    if strength > 0.25 && strength < 0.4 && brain.should_bluff(ctx) {
        return AiDecision::raise(brain.raise_to(ctx, 0.65), 0.45, true).because("semi-bluff");
    }

    if strength > 0.6 {
        let amount = brain.raise_to(ctx, strength);
        if strength > 0.85 && brain.roll() < 0.3 {
            return AiDecision {
                action: ActionKind::AllIn,
                amount: Some(ctx.max_total()),
                confidence: strength,
                is_bluff: false,
                reasoning: None,
            };
        }
        return AiDecision::raise(amount, strength, false);
    }

    if strength > 0.35 && opponent.aggression > 0.6 {
        if to_call == 0 {
            return AiDecision::raise(brain.raise_to(ctx, strength), 0.55, false);
        }
        return AiDecision::passive(ActionKind::Call, 0.5).because("calling down an aggressor");
    }

    if strength > brain.continue_threshold() && odds < strength {
        if to_call > 0 {
            return AiDecision::passive(ActionKind::Call, 0.5);
        }
        if brain.roll() < 0.4 {
            return AiDecision::raise(brain.raise_to(ctx, strength), 0.5, false);
        }
        return AiDecision::passive(ActionKind::Check, 0.5);
    }

    if brain.should_bluff(ctx) {
        return AiDecision::raise(brain.raise_to(ctx, 0.6), 0.35, true);
    }
    check_or(ctx, ActionKind::Fold, 0.6)
}

/// Adaptive: exploits tight opponents, slow-plays monsters now and then and plays draws
/// by their odds.
pub(crate) fn harvest<R: RngCore + ?Sized>(
    brain: &mut Brain<'_, R>,
    ctx: &GameContext,
    mods: &AiModifiers,
    strength: f64,
) -> AiDecision {
    let odds = pot_odds(ctx);
    let to_call = ctx.to_call();
    let strength = if mods.distracted {
        strength * (1.0 - mods.skill_reduction)
    } else {
        strength
    };
    let opponent = read_opponent(ctx, mods, 3, brain.personality.adaptability);

    if opponent.fold_rate > 0.4 && strength < 0.3 && brain.roll() < 0.4 {
        return AiDecision::raise(brain.raise_to(ctx, 0.7), 0.45, true)
            .because("exploiting tight fold rate");
    }

    if strength > 0.85 {
        if brain.roll() < 0.2 && to_call as f64 <= ctx.pot as f64 * 0.1 {
            return check_or(ctx, ActionKind::Call, 0.9).because("slow play monster");
        }
        if brain.roll() < 0.35 {
            return AiDecision {
                action: ActionKind::AllIn,
                amount: Some(ctx.max_total()),
                confidence: 0.95,
                is_bluff: false,
                reasoning: Some("maximum value with monster"),
            };
        }
        return AiDecision::raise(brain.raise_to(ctx, strength), strength, false);
    }

    if strength > 0.6 {
        return AiDecision::raise(brain.raise_to(ctx, strength), strength, false);
    }

    if strength > 0.4 {
        if opponent.aggression > 0.6 {
            if to_call == 0 {
                return AiDecision::raise(brain.raise_to(ctx, strength), 0.55, false);
            }
            return AiDecision::passive(ActionKind::Call, 0.55);
        }
        if to_call == 0 {
            return AiDecision::raise(brain.raise_to(ctx, strength), 0.55, false);
        }
        if odds < strength * 0.9 {
            return AiDecision::passive(ActionKind::Call, 0.5);
        }
    }

    if strength > 0.25 && ctx.betting_round != Some(Street::River) {
        let draw = draw_potential(&ctx.hand, &ctx.community);
        if draw > 0.2 && (odds < draw * 1.2 || to_call == 0) {
            if to_call == 0 && brain.roll() < 0.35 {
                return AiDecision::raise(brain.raise_to(ctx, 0.5), 0.45, true)
                    .because("semi-bluff with draw");
            }
            return check_or(ctx, ActionKind::Call, if to_call == 0 { 0.5 } else { 0.45 });
        }
    }

    if brain.should_bluff(ctx) {
        return AiDecision::raise(brain.raise_to(ctx, 0.65), 0.35, true);
    }
    check_or(ctx, ActionKind::Fold, 0.6)
}
