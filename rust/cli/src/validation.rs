//! Input parsing and validation for interactive commands.
//!
//! Typed player actions and `eval` card lists are checked here so the command
//! handlers only see well-formed values.

use std::collections::HashSet;

use meadow_engine::cards::{Card, parse_cards};
use meadow_engine::player::PlayerAction;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepted forms (case-insensitive):
/// - `f`, `fold`
/// - `k`, `x`, `check`
/// - `c`, `call`
/// - `r N`, `raise N`, `bet N` (N is the new round total)
/// - `a`, `allin`, `all-in`, `shove`
/// - `q`, `quit`
///
/// ```rust
/// # use meadow_cli::validation::{parse_player_action, ParseResult};
/// use meadow_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(PlayerAction::Fold));
/// assert_eq!(
///     parse_player_action("raise 300"),
///     ParseResult::Action(PlayerAction::Raise(300))
/// );
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Action(PlayerAction::Fold),
        "k" | "x" | "check" => ParseResult::Action(PlayerAction::Check),
        "c" | "call" => ParseResult::Action(PlayerAction::Call),
        "a" | "allin" | "all-in" | "shove" => ParseResult::Action(PlayerAction::AllIn),
        "r" | "raise" | "bet" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires a total (e.g., 'raise 300')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(total) if total > 0 => ParseResult::Action(PlayerAction::Raise(total)),
                Ok(_) => ParseResult::Invalid("Raise total must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <total>, allin, q",
            verb
        )),
    }
}

/// Parse the cards given to `eval`: 5 to 7 distinct cards.
pub fn parse_eval_cards(args: &[String]) -> Result<Vec<Card>, String> {
    let cards = parse_cards(&args.join(" ")).map_err(|e| e.to_string())?;
    if !(5..=7).contains(&cards.len()) {
        return Err(format!("expected 5 to 7 cards, got {}", cards.len()));
    }
    let mut seen = HashSet::new();
    for card in &cards {
        if !seen.insert(*card) {
            return Err(format!("duplicate card {}", card));
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_fold() {
        assert_eq!(
            parse_player_action("fold"),
            ParseResult::Action(PlayerAction::Fold)
        );
        assert_eq!(
            parse_player_action("F"),
            ParseResult::Action(PlayerAction::Fold)
        );
    }

    #[test]
    fn test_check_and_call_are_distinct() {
        assert_eq!(
            parse_player_action("x"),
            ParseResult::Action(PlayerAction::Check)
        );
        assert_eq!(
            parse_player_action("c"),
            ParseResult::Action(PlayerAction::Call)
        );
    }

    #[test]
    fn test_bet_is_a_raise_to_total() {
        assert_eq!(
            parse_player_action("bet 200"),
            ParseResult::Action(PlayerAction::Raise(200))
        );
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_player_action("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn test_raise_without_amount() {
        match parse_player_action("raise") {
            ParseResult::Invalid(msg) => assert!(msg.contains("requires a total")),
            other => panic!("Expected Invalid result, got {:?}", other),
        }
    }

    #[test]
    fn test_raise_with_bad_amount() {
        assert!(matches!(parse_player_action("raise -5"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("raise 0"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_invalid_action() {
        match parse_player_action("dance") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("Expected Invalid result, got {:?}", other),
        }
        assert!(matches!(parse_player_action("   "), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_eval_cards_accept_commas_and_tens() {
        let cards = parse_eval_cards(&args("As,Ks Qs Js 10s")).unwrap();
        assert_eq!(cards.len(), 5);
    }

    #[test]
    fn test_eval_cards_count_and_duplicates() {
        assert!(parse_eval_cards(&args("As Ks Qs Js")).is_err());
        assert!(parse_eval_cards(&args("As Ks Qs Js Ts 9s 8s 7s")).is_err());
        let err = parse_eval_cards(&args("As Ks Qs Js As")).unwrap_err();
        assert!(err.contains("duplicate"));
    }
}
