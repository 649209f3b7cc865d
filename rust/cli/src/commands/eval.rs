//! Eval command: best five-card hand out of 5 to 7 cards.

use std::io::Write;

use meadow_engine::hand::{describe_hand, find_best_hand, hand_strength_percentage};

use crate::error::CliError;
use crate::formatters::format_board;
use crate::validation::parse_eval_cards;

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_eval_cards(cards).map_err(CliError::InvalidInput)?;
    let best = find_best_hand(&cards).map_err(|e| CliError::Engine(e.to_string()))?;
    let five: Vec<_> = best.cards().copied().collect();

    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Best: {}", format_board(&five))?;
    writeln!(out, "Hand: {}", describe_hand(&best))?;
    writeln!(out, "Strength: {}%", hand_strength_percentage(&best))?;
    writeln!(out, "Value: {}", best.value)?;
    Ok(())
}
