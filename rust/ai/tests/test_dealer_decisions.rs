use meadow_ai::context::opponent_actions;
use meadow_ai::{create_ai_dealer, difficulty_levels, AiDealer, AiModifiers, Difficulty, GameContext};
use meadow_engine::betting::BettingConfig;
use meadow_engine::engine::{Phase, PokerEngine};
use meadow_engine::player::{ActionKind, Participant};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn play_out(engine: &mut PokerEngine, dealer: &mut AiDealer, player: &mut AiDealer) {
    let config = *engine.config();
    for _ in 0..64 {
        if engine.settle().expect("settle").is_some() {
            return;
        }
        let state = engine.state();
        if engine.is_dealer_turn() {
            let seen = opponent_actions(engine.actions(), Participant::Dealer);
            let ctx = GameContext::for_dealer(&state, config, seen);
            let d = dealer.decide(&ctx, None);
            engine
                .dealer_action(d.to_action())
                .unwrap_or_else(|e| panic!("dealer {:?} rejected: {}", d, e));
        } else if engine.is_player_turn() {
            let seen = opponent_actions(engine.actions(), Participant::Player);
            let ctx = GameContext::for_player(&state, config, seen);
            let d = player.decide(&ctx, None);
            engine
                .player_action(d.to_action())
                .unwrap_or_else(|e| panic!("player {:?} rejected: {}", d, e));
        } else {
            panic!("nobody to act in {:?}", state.phase);
        }
    }
    panic!("hand did not finish");
}

#[test]
fn every_tier_only_makes_legal_moves() {
    for difficulty in difficulty_levels() {
        let config = BettingConfig::for_stake(100, difficulty.max_bet_multiplier());
        for seed in 0..25u64 {
            let mut engine = PokerEngine::new(config, Some(seed));
            engine.start_hand(1000, 1000).unwrap();
            engine.deal().unwrap();
            let mut dealer = create_ai_dealer(difficulty, Some(seed));
            let mut player = create_ai_dealer(Difficulty::Harvest, Some(seed + 1000));
            play_out(&mut engine, &mut dealer, &mut player);

            let st = engine.state();
            assert_eq!(st.phase, Phase::Result);
            assert_eq!(st.player_stack + st.dealer_stack, 2000);
        }
    }
}

#[test]
fn short_stacks_stay_legal() {
    let config = BettingConfig::for_stake(100, 10);
    for seed in 0..25u64 {
        let mut engine = PokerEngine::new(config, Some(seed));
        engine.start_hand(130, 2000).unwrap();
        engine.deal().unwrap();
        let mut dealer = create_ai_dealer(Difficulty::Bloom, Some(seed));
        let mut player = create_ai_dealer(Difficulty::Sprout, Some(seed));
        play_out(&mut engine, &mut dealer, &mut player);
        let st = engine.state();
        assert_eq!(st.player_stack + st.dealer_stack, 2130);
    }
}

#[test]
fn same_seed_same_decisions() {
    let config = BettingConfig::for_stake(100, 8);
    let mut engine = PokerEngine::new(config, Some(5));
    engine.start_hand(1000, 1000).unwrap();
    engine.deal().unwrap();
    let ctx = GameContext::for_dealer(&engine.state(), config, Vec::new());

    let mut a = create_ai_dealer(Difficulty::Bloom, Some(99));
    let mut b = create_ai_dealer(Difficulty::Bloom, Some(99));
    for _ in 0..20 {
        assert_eq!(a.decide(&ctx, None), b.decide(&ctx, None));
    }
}

#[test]
fn any_rng_can_drive_a_dealer() {
    let config = BettingConfig::for_stake(100, 10);
    let mut engine = PokerEngine::new(config, Some(8));
    engine.start_hand(1000, 1000).unwrap();
    engine.deal().unwrap();
    let ctx = GameContext::for_dealer(&engine.state(), config, Vec::new());
    let mut dealer = AiDealer::with_rng(Difficulty::Harvest, ChaCha8Rng::seed_from_u64(3));
    let d = dealer.decide(&ctx, Some(&AiModifiers::default()));
    assert_ne!(d.action, ActionKind::Check, "dealer owes the small blind difference");
}

#[test]
fn decisions_never_check_while_owing_or_fold_for_free() {
    let config = BettingConfig::for_stake(100, 10);
    for seed in 0..50u64 {
        let mut engine = PokerEngine::new(config, Some(seed));
        engine.start_hand(1000, 1000).unwrap();
        engine.deal().unwrap();
        let ctx = GameContext::for_dealer(&engine.state(), config, Vec::new());
        for difficulty in difficulty_levels() {
            let mut dealer = create_ai_dealer(difficulty, Some(seed));
            let mods = AiModifiers {
                scrambled: true,
                distracted: true,
                skill_reduction: 0.5,
            };
            let d = dealer.decide(&ctx, Some(&mods));
            assert_ne!(d.action, ActionKind::Check);
            if let Some(amount) = d.amount {
                assert!(amount <= ctx.max_total());
            }
        }
    }
}

#[test]
fn premium_pairs_raise_preflop() {
    use meadow_engine::cards::parse_cards;
    use meadow_engine::engine::Street;

    let config = BettingConfig::for_stake(100, 4);
    // dealer posted the small blind and faces the big blind
    let ctx = GameContext {
        hand: parse_cards("As Ah").unwrap(),
        community: Vec::new(),
        pot: 150,
        opponent_bet: 100,
        own_bet: 50,
        phase: Phase::Preflop,
        betting_round: Some(Street::Preflop),
        opponent_chips: 900,
        own_chips: 950,
        config,
        opponent_actions: Vec::new(),
    };
    for difficulty in difficulty_levels() {
        let mut dealer = create_ai_dealer(difficulty, Some(17));
        let raises: Vec<u32> = (0..200)
            .map(|_| dealer.decide(&ctx, None))
            .filter(|d| d.action == ActionKind::Raise)
            .filter_map(|d| d.amount)
            .collect();
        assert!(!raises.is_empty(), "{} never raised aces", difficulty);
        assert!(raises.iter().all(|t| (200..=400).contains(t)), "{:?}", raises);
    }
}
