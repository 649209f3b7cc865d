//! # Play Command
//!
//! Interactive heads-up hands against an AI dealer. The human sits in the player seat
//! (big blind) and types actions on stdin; stacks carry over from hand to hand until
//! someone is broke, the hand count is reached, or the user quits.

use std::io::{BufRead, Write};
use std::time::Duration;

use meadow_ai::{AiDealer, GameContext, create_ai_dealer};
use meadow_engine::engine::PokerEngine;
use meadow_engine::player::ActionKind;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_result, format_table};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

const PROMPT: &str = "Your action (fold/check/call/raise <total>/allin/q): ";

/// How a single interactive hand ended.
enum HandOutcome {
    Finished,
    Quit,
}

pub fn handle_play_command(
    cfg: &Config,
    hands: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let betting = cfg.betting();
    let mut dealer = create_ai_dealer(cfg.difficulty, Some(seed));
    let persona = dealer.personality();

    writeln!(
        out,
        "play: difficulty={} seed={} blinds={}/{} max_bet={}",
        cfg.difficulty, seed, betting.small_blind, betting.big_blind, betting.max_bet
    )?;
    writeln!(out, "{} deals.", persona.dealer_name)?;

    let mut engine = PokerEngine::new(betting, Some(seed));
    let (mut player_stack, mut dealer_stack) = (cfg.stack(), cfg.stack());
    // everything the human has done this session, for the dealer's opponent model
    let mut history: Vec<ActionKind> = Vec::new();
    let mut played = 0u32;

    for i in 0..hands {
        if player_stack == 0 || dealer_stack == 0 {
            break;
        }
        engine.set_seed(seed.wrapping_add(u64::from(i)));
        engine.start_hand(player_stack, dealer_stack)?;
        engine.deal()?;
        writeln!(out, "Hand {}", i + 1)?;

        let outcome = play_hand(
            &mut engine,
            &mut dealer,
            &mut history,
            cfg.think_ms,
            out,
            err,
            stdin,
        )?;
        if let HandOutcome::Quit = outcome {
            writeln!(out, "Quit.")?;
            break;
        }

        played += 1;
        let state = engine.state();
        player_stack = state.player_stack;
        dealer_stack = state.dealer_stack;
        info!(hand = i + 1, player_stack, dealer_stack, "hand finished");
    }

    if player_stack == 0 {
        writeln!(out, "You are out of chips.")?;
    } else if dealer_stack == 0 {
        writeln!(out, "{} is out of chips.", persona.dealer_name)?;
    }
    writeln!(
        out,
        "Hands played: {} (you: {}, {}: {})",
        played, player_stack, persona.dealer_name, dealer_stack
    )?;
    Ok(())
}

fn play_hand(
    engine: &mut PokerEngine,
    dealer: &mut AiDealer,
    history: &mut Vec<ActionKind>,
    think_ms: u64,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandOutcome, CliError> {
    let name = dealer.personality().dealer_name;
    let mut shown_board = 0usize;

    loop {
        if let Some(result) = engine.settle()? {
            let state = engine.state();
            if !result.folded() {
                writeln!(out, "Board: {}", format_board(&state.community_cards))?;
                writeln!(out, "{} shows {}", name, format_board(&state.dealer_hand))?;
            }
            writeln!(out, "{}", format_result(&result))?;
            return Ok(HandOutcome::Finished);
        }

        let state = engine.state();
        if state.community_cards.len() != shown_board {
            shown_board = state.community_cards.len();
            writeln!(out, "Board: {}", format_board(&state.community_cards))?;
        }

        if engine.is_dealer_turn() {
            let ctx = GameContext::for_dealer(&state, *engine.config(), history.clone());
            let decision = dealer.decide(&ctx, None);
            if think_ms > 0 {
                std::thread::sleep(Duration::from_millis(think_ms));
            }
            let res = engine.dealer_action_with_fallback(decision.to_action())?;
            writeln!(out, "{}: {}", name, format_action(&res.action))?;
        } else if engine.is_player_turn() {
            writeln!(out, "{}", format_table(&state, false))?;
            ui::prompt(out, PROMPT)?;
            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return Ok(HandOutcome::Quit);
            };
            match parse_player_action(&line) {
                ParseResult::Action(action) => match engine.player_action(action) {
                    Ok(res) => {
                        history.push(res.action.kind());
                        writeln!(out, "You: {}", format_action(&res.action))?;
                    }
                    Err(e) => ui::write_error(err, &format!("Invalid action: {}", e))?,
                },
                ParseResult::Quit => return Ok(HandOutcome::Quit),
                ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            }
        } else {
            return Err(CliError::Engine(format!(
                "nobody to act in phase {:?}",
                engine.phase()
            )));
        }
    }
}
