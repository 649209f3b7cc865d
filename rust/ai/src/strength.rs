//! Hand-strength heuristics shared by every tier. All estimates are in `[0, 1]`.

use std::collections::{BTreeSet, HashMap};

use meadow_engine::betting::calculate_pot_odds;
use meadow_engine::cards::{Card, Rank};
use meadow_engine::hand::{find_best_hand, hand_strength_percentage};

use crate::context::GameContext;

/// Pre-flop uses the hole-card heuristic; afterwards the made hand plus a share of the
/// draw potential.
pub fn hand_strength(hand: &[Card], community: &[Card]) -> f64 {
    if community.is_empty() {
        return preflop_strength(hand);
    }
    let cards: Vec<Card> = hand.iter().chain(community).copied().collect();
    let made = match find_best_hand(&cards) {
        Ok(best) => hand_strength_percentage(&best) as f64 / 100.0,
        Err(_) => preflop_strength(hand),
    };
    (made + draw_potential(hand, community) * 0.2).min(1.0)
}

/// Closed-form rating of two hole cards.
pub fn preflop_strength(hand: &[Card]) -> f64 {
    let [a, b] = match hand {
        [a, b, ..] => [*a, *b],
        _ => return 0.0,
    };
    let r1 = a.rank.value() as f64;
    let r2 = b.rank.value() as f64;
    let pair = a.rank == b.rank;

    let mut strength = (r1 + r2) / 28.0;
    if pair {
        strength += 0.2 + r1 / 14.0 * 0.1;
    }
    if a.suit == b.suit {
        strength += 0.05;
    }
    if (r1 - r2).abs() == 1.0 {
        strength += 0.03;
    }
    if pair && r1 >= 10.0 {
        strength += 0.1;
    }
    // AK, AQ, AJ
    let (high, low) = if a.rank >= b.rank { (a.rank, b.rank) } else { (b.rank, a.rank) };
    if high == Rank::Ace && low >= Rank::Jack {
        strength += 0.1;
    }
    strength.clamp(0.0, 1.0)
}

/// Flush and straight draw bonus, capped at 0.5.
pub fn draw_potential(hand: &[Card], community: &[Card]) -> f64 {
    let mut potential = 0.0;

    let mut suits = HashMap::new();
    for card in hand.iter().chain(community) {
        *suits.entry(card.suit).or_insert(0usize) += 1;
    }
    for count in suits.values() {
        match count {
            4 => potential += 0.35,
            3 if community.len() <= 3 => potential += 0.15,
            _ => {}
        }
    }

    let ranks: Vec<u8> = hand
        .iter()
        .chain(community)
        .map(|c| c.rank.value())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let spans: Vec<u8> = ranks.windows(4).map(|w| w[3] - w[0]).collect();
    // four in a row
    if spans.contains(&3) {
        potential += 0.32;
    }
    // one gap inside four
    if spans.contains(&4) {
        potential += 0.16;
    }

    f64::min(0.5, potential)
}

/// Share of the resulting pot the AI has to put in to call; 0 when checking is free.
pub fn pot_odds(ctx: &GameContext) -> f64 {
    let to_call = ctx.to_call();
    if to_call == 0 {
        return 0.0;
    }
    calculate_pot_odds(ctx.pot, to_call, 0).pot_odds
}
