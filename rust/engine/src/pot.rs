//! Main/side pot allocation for all-in situations.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidePotContext {
    /// Total the all-in party has committed.
    pub player_all_in: u32,
    /// Chips the opponent can put in to match.
    pub dealer_stack: u32,
    /// Chips already in the middle before the all-in.
    pub existing_pot: u32,
    pub third_party_all_in: Option<u32>,
}

/// Allocation of an all-in. Always satisfies
/// `main_pot + side_pot + return_to_player + return_to_third_party
///  == existing_pot + player_all_in + dealer_commitment + third_party_all_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidePotResult {
    /// Pot every party is eligible for.
    pub main_pot: u32,
    pub side_pot: u32,
    /// Unmatched chips handed back to the all-in party.
    pub return_to_player: u32,
    pub return_to_third_party: u32,
    /// Smallest amount every party could match.
    pub effective_stack: u32,
    /// What the opponent actually puts in.
    pub dealer_commitment: u32,
}

pub fn calculate_side_pot(ctx: &SidePotContext) -> SidePotResult {
    match ctx.third_party_all_in {
        None => heads_up(ctx),
        Some(third) => three_way(ctx, third),
    }
}

fn heads_up(ctx: &SidePotContext) -> SidePotResult {
    let effective = ctx.player_all_in.min(ctx.dealer_stack);
    SidePotResult {
        main_pot: ctx.existing_pot + effective * 2,
        side_pot: 0,
        return_to_player: ctx.player_all_in - effective,
        return_to_third_party: 0,
        effective_stack: effective,
        dealer_commitment: effective,
    }
}

// The opponent calls the larger all-in as far as its stack allows. Chips that only
// the single largest contributor put in are returned to that contributor.
fn three_way(ctx: &SidePotContext, third: u32) -> SidePotResult {
    let player = ctx.player_all_in;
    let dealer = ctx.dealer_stack.min(player.max(third));
    let effective = player.min(dealer).min(third);

    let mut ordered = [player, dealer, third];
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    let top_excess = ordered[0] - ordered[1];

    let return_to_player = if player == ordered[0] { top_excess } else { 0 };
    let return_to_third_party = if third == ordered[0] && player != ordered[0] {
        top_excess
    } else {
        0
    };

    let committed = player + dealer + third;
    SidePotResult {
        main_pot: ctx.existing_pot + effective * 3,
        side_pot: committed - effective * 3 - top_excess,
        return_to_player,
        return_to_third_party,
        effective_stack: effective,
        dealer_commitment: dealer,
    }
}
