use meadow_engine::betting::BettingConfig;
use meadow_engine::engine::{Phase, PokerEngine, Street, Winner};
use meadow_engine::errors::{ActionError, EngineError};
use meadow_engine::player::{Participant, PlayerAction};

fn config() -> BettingConfig {
    BettingConfig::new(100, 1000, 50, 100).unwrap()
}

fn dealt(seed: u64, player: u32, dealer: u32) -> PokerEngine {
    let mut eng = PokerEngine::new(config(), Some(seed));
    eng.start_hand(player, dealer).expect("start");
    eng.deal().expect("deal");
    eng
}

fn assert_pot_conserved(eng: &PokerEngine) {
    let st = eng.state();
    assert_eq!(st.pot, st.player_contributed + st.dealer_contributed);
}

#[test]
fn dealer_call_completes_preflop() {
    let mut eng = dealt(1, 1000, 1000);
    assert!(!eng.is_betting_round_complete());
    assert!(eng.is_dealer_turn());
    assert!(!eng.is_player_turn());

    let r = eng.dealer_action(PlayerAction::Call).unwrap();
    assert_eq!(r.amount, Some(50));
    assert!(!r.hand_ended);
    assert!(eng.is_betting_round_complete());
    assert_eq!(eng.state().pot, 200);
}

#[test]
fn check_while_owing_is_rejected_without_side_effects() {
    let mut eng = dealt(2, 1000, 1000);
    assert_eq!(
        eng.dealer_action(PlayerAction::Check),
        Err(ActionError::CannotCheck)
    );
    eng.dealer_action(PlayerAction::Raise(300)).unwrap();
    let before = eng.state();
    assert_eq!(
        eng.player_action(PlayerAction::Check),
        Err(ActionError::CannotCheck)
    );
    assert_eq!(eng.state(), before);
    assert_eq!(before.player_bet, 100);
    assert_eq!(before.pot, 400);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut eng = dealt(3, 1000, 1000);
    assert_eq!(
        eng.player_action(PlayerAction::Call),
        Err(ActionError::NotYourTurn("player"))
    );

    let mut idle = PokerEngine::new(config(), Some(3));
    idle.start_hand(1000, 1000).unwrap();
    assert_eq!(
        idle.player_action(PlayerAction::Check),
        Err(ActionError::NotBettingPhase)
    );
}

#[test]
fn fold_awards_pot_without_evaluation() {
    let mut eng = dealt(4, 1000, 1000);
    let r = eng.dealer_action(PlayerAction::Fold).unwrap();
    assert!(r.hand_ended);
    assert_eq!(r.new_phase, Phase::Fold);
    assert_eq!(eng.state().winner, Some(Winner::Player));

    let result = eng.resolve_hand().unwrap();
    assert_eq!(result.winner, Winner::Player);
    assert!(result.player_hand.is_none() && result.dealer_hand.is_none());
    assert_eq!(result.winnings, 150);
    let st = eng.state();
    assert_eq!(st.phase, Phase::Result);
    assert_eq!(st.player_stack, 1050);
    assert_eq!(st.dealer_stack, 950);
}

#[test]
fn resolving_twice_is_a_protocol_error() {
    let mut eng = dealt(5, 1000, 1000);
    eng.dealer_action(PlayerAction::Fold).unwrap();
    eng.resolve_hand().unwrap();
    assert_eq!(eng.resolve_hand(), Err(EngineError::HandAlreadyComplete));
}

#[test]
fn advancing_an_open_round_fails_loudly() {
    let mut eng = dealt(6, 1000, 1000);
    assert_eq!(eng.advance_phase(), Err(EngineError::RoundIncomplete));
    assert_eq!(eng.phase(), Phase::Preflop);
}

#[test]
fn streets_burn_and_reveal_cards() {
    let mut eng = dealt(7, 1000, 1000);
    assert_eq!(eng.state().deck_size, 48);
    eng.dealer_action(PlayerAction::Call).unwrap();
    eng.advance_phase().unwrap();
    let st = eng.state();
    assert_eq!(st.betting_round, Some(Street::Flop));
    assert_eq!((st.community_cards.len(), st.burned, st.deck_size), (3, 1, 44));
    assert_eq!((st.player_bet, st.dealer_bet, st.current_bet), (0, 0, 0));

    assert!(eng.is_player_turn());
    eng.player_action(PlayerAction::Check).unwrap();
    eng.dealer_action(PlayerAction::Check).unwrap();
    eng.advance_phase().unwrap();
    assert_eq!(eng.state().community_cards.len(), 4);

    eng.player_action(PlayerAction::Check).unwrap();
    eng.dealer_action(PlayerAction::Check).unwrap();
    eng.advance_phase().unwrap();
    let st = eng.state();
    assert_eq!((st.community_cards.len(), st.burned, st.deck_size), (5, 3, 40));

    eng.player_action(PlayerAction::Check).unwrap();
    eng.dealer_action(PlayerAction::Check).unwrap();
    eng.advance_phase().unwrap();
    assert_eq!(eng.phase(), Phase::Showdown);

    let result = eng.resolve_hand().unwrap();
    assert!(result.player_hand.is_some() && result.dealer_hand.is_some());
    assert_eq!(result.pot, 200);
    let st = eng.state();
    assert_eq!(st.player_stack + st.dealer_stack, 2000);
}

#[test]
fn raise_reopens_action_for_the_opponent() {
    let mut eng = dealt(8, 1000, 1000);
    eng.dealer_action(PlayerAction::Call).unwrap();
    eng.advance_phase().unwrap();

    eng.player_action(PlayerAction::Check).unwrap();
    eng.dealer_action(PlayerAction::Raise(200)).unwrap();
    assert!(eng.is_player_turn());

    eng.player_action(PlayerAction::Raise(400)).unwrap();
    assert!(eng.is_dealer_turn());
    assert!(!eng.is_betting_round_complete());

    eng.dealer_action(PlayerAction::Call).unwrap();
    assert!(eng.is_betting_round_complete());
    assert_eq!(eng.state().pot, 1000);
}

#[test]
fn raise_not_above_current_bet_reports_minimum() {
    let mut eng = dealt(9, 1000, 1000);
    assert_eq!(
        eng.dealer_action(PlayerAction::Raise(100)),
        Err(ActionError::RaiseTooSmall { minimum: 200 })
    );
    assert_eq!(
        eng.dealer_action(PlayerAction::Raise(5000)),
        Err(ActionError::RaiseTooLarge { maximum: 1000 })
    );
}

#[test]
fn pot_is_conserved_through_a_raised_hand() {
    let mut eng = dealt(10, 1000, 1000);
    assert_pot_conserved(&eng);
    eng.dealer_action(PlayerAction::Raise(300)).unwrap();
    assert_pot_conserved(&eng);
    eng.player_action(PlayerAction::Call).unwrap();
    assert_pot_conserved(&eng);
    eng.advance_phase().unwrap();
    eng.player_action(PlayerAction::Raise(200)).unwrap();
    assert_pot_conserved(&eng);
    eng.dealer_action(PlayerAction::Call).unwrap();
    assert_pot_conserved(&eng);
    let result = eng.settle().unwrap();
    assert!(result.is_none(), "turn still needs actions");
    assert_eq!(eng.phase(), Phase::Turn);
    assert_eq!(eng.state().pot, 1000);
}

#[test]
fn uncalled_chips_return_to_the_covering_stack() {
    let mut eng = dealt(11, 300, 1000);
    eng.dealer_action(PlayerAction::Raise(1000)).unwrap();
    assert!(eng.is_player_turn());
    let call = eng.player_action(PlayerAction::Call).unwrap();
    assert_eq!(call.amount, Some(200));
    assert!(eng.is_betting_round_complete());

    let result = eng.settle().unwrap().expect("board runs out");
    assert_eq!(result.pot, 600);
    let st = eng.state();
    assert_eq!(st.community_cards.len(), 5);
    assert_eq!((st.player_contributed, st.dealer_contributed), (300, 300));
    assert_eq!(st.player_stack + st.dealer_stack, 1300);
}

#[test]
fn short_blind_counts_as_all_in() {
    let mut eng = dealt(12, 60, 1000);
    let st = eng.state();
    assert_eq!((st.player_bet, st.player_stack), (60, 0));
    assert_eq!(st.current_bet, 60);
    eng.dealer_action(PlayerAction::Call).unwrap();
    let result = eng.settle().unwrap().expect("resolved");
    assert_eq!(result.pot, 120);
}

#[test]
fn dealer_fallback_downgrades_illegal_actions() {
    let mut eng = dealt(13, 1000, 1000);
    let r = eng
        .dealer_action_with_fallback(PlayerAction::Raise(20))
        .unwrap();
    assert_eq!(r.action, PlayerAction::Call);
    assert_eq!(r.amount, Some(50));

    eng.advance_phase().unwrap();
    assert_eq!(
        eng.dealer_action_with_fallback(PlayerAction::Check),
        Err(ActionError::NotYourTurn("dealer"))
    );
    eng.player_action(PlayerAction::Check).unwrap();
    let r = eng
        .dealer_action_with_fallback(PlayerAction::Raise(5000))
        .unwrap();
    assert_eq!(r.action, PlayerAction::Check);
}

#[test]
fn same_seed_deals_the_same_hand() {
    let a = dealt(77, 1000, 1000).state();
    let b = dealt(77, 1000, 1000).state();
    assert_eq!(a.player_hand, b.player_hand);
    assert_eq!(a.dealer_hand, b.dealer_hand);
    assert_ne!(a.player_hand, dealt(78, 1000, 1000).state().player_hand);
}

#[test]
fn action_log_and_hand_record() {
    let mut eng = dealt(14, 1000, 1000);
    eng.dealer_action(PlayerAction::Call).unwrap();
    eng.advance_phase().unwrap();
    eng.player_action(PlayerAction::Raise(100)).unwrap();
    eng.dealer_action(PlayerAction::Fold).unwrap();
    eng.settle().unwrap();

    let actions = eng.actions();
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].actor, Participant::Dealer);
    assert_eq!(actions[0].street, Street::Preflop);
    assert_eq!(actions[1].street, Street::Flop);
    assert_eq!(actions[1].amount, 100);

    let rec = eng.hand_record("20261019-000001".into());
    assert_eq!(rec.seed, Some(14));
    assert_eq!(rec.board.len(), 3);
    let summary = rec.result.expect("resolved hand has a summary");
    assert!(summary.folded);
    assert_eq!(summary.winner, Winner::Player);
    assert_eq!(summary.pot, 300);
}

#[test]
fn empty_stacks_cannot_start_a_hand() {
    let mut eng = PokerEngine::new(config(), Some(1));
    assert_eq!(eng.start_hand(100, 0), Err(EngineError::EmptyStack("dealer")));
    assert!(matches!(
        eng.deal(),
        Err(EngineError::InvalidPhase { operation: "deal", .. })
    ));
}

#[test]
fn stacks_beyond_the_chip_range_are_rejected() {
    let mut eng = PokerEngine::new(config(), Some(1));
    assert_eq!(
        eng.start_hand(3_000_000_000, 3_000_000_000),
        Err(EngineError::StackOverflow {
            player: 3_000_000_000,
            dealer: 3_000_000_000,
        })
    );
    assert_eq!(eng.state().phase, Phase::Idle);
}

#[test]
fn all_in_at_the_top_of_the_chip_range() {
    let (player, dealer) = (u32::MAX / 2 + 1, u32::MAX / 2);
    let mut eng = dealt(4, player, dealer);
    eng.dealer_action(PlayerAction::AllIn).unwrap();
    eng.player_action(PlayerAction::Call).unwrap();
    assert_pot_conserved(&eng);

    let mut result = None;
    for _ in 0..8 {
        result = eng.settle().unwrap();
        if result.is_some() {
            break;
        }
    }
    assert!(result.is_some());
    let st = eng.state();
    assert_eq!(st.player_stack as u64 + st.dealer_stack as u64, u32::MAX as u64);
}

#[test]
fn reset_returns_to_idle() {
    let mut eng = dealt(15, 1000, 1000);
    eng.reset();
    let st = eng.state();
    assert_eq!(st.phase, Phase::Idle);
    assert!(st.player_hand.is_empty());
    assert_eq!(st.pot, 0);
}
