//! Card, table and result formatters for terminal display.
//!
//! Suits print as ♥ ♦ ♣ ♠ where the terminal is expected to render them, and as
//! h d c s otherwise.
//!
//! ```rust
//! use meadow_engine::cards::{Card, Rank, Suit};
//! use meadow_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use meadow_engine::cards::Card;
use meadow_engine::engine::{HandResult, PublicEngineState, Winner};
use meadow_engine::hand::{describe_hand, EvaluatedHand};
use meadow_engine::player::{Participant, PlayerAction};

/// On Windows only modern terminals (Windows Terminal, VS Code, anything setting
/// `TERM_PROGRAM`) are trusted with suit symbols.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_card(card: &Card) -> String {
    let suit = if supports_unicode() {
        card.suit.symbol()
    } else {
        card.suit.letter()
    };
    format!("{}{}", card.rank.label(), suit)
}

pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(total) => format!("raise to {}", total),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// The table as the human player sees it: the dealer's hole cards stay hidden
/// unless `reveal` is set.
pub fn format_table(state: &PublicEngineState, reveal: bool) -> String {
    let dealer_hole = if reveal {
        format_board(&state.dealer_hand)
    } else {
        "[?? ??]".to_string()
    };
    let mut lines = vec![
        format!("Board: {}  Pot: {}", format_board(&state.community_cards), state.pot),
        format!(
            "Dealer {} stack={} bet={}",
            dealer_hole, state.dealer_stack, state.dealer_bet
        ),
        format!(
            "You    {} stack={} bet={}",
            format_board(&state.player_hand),
            state.player_stack,
            state.player_bet
        ),
    ];
    let owed = state.to_call(Participant::Player);
    if owed > 0 {
        lines.push(format!("To call: {}", owed));
    }
    lines.join("\n")
}

/// One-line summary of a resolved hand.
pub fn format_result(result: &HandResult) -> String {
    let who = match result.winner {
        Winner::Player => "Player wins",
        Winner::Dealer => "Dealer wins",
        Winner::Tie => "Split pot",
    };
    if result.folded() {
        return format!("{} {} (fold)", who, result.pot);
    }
    let name = |h: &Option<EvaluatedHand>| {
        h.as_ref().map_or_else(|| "-".to_string(), describe_hand)
    };
    format!(
        "{} {} (player: {}; dealer: {})",
        who,
        result.pot,
        name(&result.player_hand),
        name(&result.dealer_hand)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_engine::cards::{Rank, Suit};

    #[test]
    fn ten_prints_as_two_digits() {
        let c = Card::new(Rank::Ten, Suit::Hearts);
        let s = format_card(&c);
        assert!(s == "10♥" || s == "10h");
    }

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn raise_shows_the_round_total() {
        assert_eq!(format_action(&PlayerAction::Raise(300)), "raise to 300");
        assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
    }

    #[test]
    fn fold_result_has_no_hands() {
        let r = HandResult {
            winner: Winner::Dealer,
            player_hand: None,
            dealer_hand: None,
            pot: 150,
            winnings: 150,
        };
        assert_eq!(format_result(&r), "Dealer wins 150 (fold)");
    }
}
