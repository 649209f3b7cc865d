//! Deal command: one seeded hand, checked down to showdown.
//!
//! Useful for inspecting what a seed deals; both sides only call or check, so the
//! whole board is always revealed.

use std::io::Write;

use meadow_engine::betting::BettingConfig;
use meadow_engine::engine::PokerEngine;
use meadow_engine::player::{Participant, PlayerAction};

use crate::error::CliError;
use crate::formatters::{format_board, format_result};

pub fn handle_deal_command(
    betting: BettingConfig,
    stack: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut engine = PokerEngine::new(betting, Some(seed));
    engine.start_hand(stack, stack)?;
    engine.deal()?;

    let result = loop {
        if let Some(result) = engine.settle()? {
            break result;
        }
        let who = if engine.is_dealer_turn() {
            Participant::Dealer
        } else {
            Participant::Player
        };
        let action = if engine.to_call(who) > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        match who {
            Participant::Dealer => engine.dealer_action(action)?,
            Participant::Player => engine.player_action(action)?,
        };
    };

    let state = engine.state();
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Player: {}", format_board(&state.player_hand))?;
    writeln!(out, "Dealer: {}", format_board(&state.dealer_hand))?;
    writeln!(out, "Board: {}", format_board(&state.community_cards))?;
    writeln!(out, "{}", format_result(&result))?;
    Ok(())
}
