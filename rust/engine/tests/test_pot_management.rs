use meadow_engine::pot::{calculate_side_pot, SidePotContext};

fn conserved(ctx: &SidePotContext) {
    let r = calculate_side_pot(ctx);
    let put_in = ctx.existing_pot
        + ctx.player_all_in
        + r.dealer_commitment
        + ctx.third_party_all_in.unwrap_or(0);
    assert_eq!(
        r.main_pot + r.side_pot + r.return_to_player + r.return_to_third_party,
        put_in,
        "{:?} -> {:?}",
        ctx,
        r
    );
}

#[test]
fn heads_up_allocations_conserve_chips() {
    for (all_in, stack) in [(500, 800), (500, 300), (400, 400), (1, 1000)] {
        conserved(&SidePotContext {
            player_all_in: all_in,
            dealer_stack: stack,
            existing_pot: 150,
            third_party_all_in: None,
        });
    }
}

#[test]
fn heads_up_excess_goes_back_to_all_in_party() {
    let r = calculate_side_pot(&SidePotContext {
        player_all_in: 900,
        dealer_stack: 250,
        existing_pot: 0,
        third_party_all_in: None,
    });
    assert_eq!(r.main_pot, 500);
    assert_eq!(r.return_to_player, 650);
    assert_eq!(r.dealer_commitment, 250);
}

#[test]
fn three_way_builds_a_side_pot() {
    let ctx = SidePotContext {
        player_all_in: 300,
        dealer_stack: 1000,
        existing_pot: 0,
        third_party_all_in: Some(500),
    };
    let r = calculate_side_pot(&ctx);
    assert_eq!(r.effective_stack, 300);
    assert_eq!(r.dealer_commitment, 500);
    assert_eq!(r.main_pot, 900);
    assert_eq!(r.side_pot, 400);
    assert_eq!(r.return_to_player, 0);
    assert_eq!(r.return_to_third_party, 0);
    conserved(&ctx);
}

#[test]
fn three_way_returns_uncalled_top_contribution() {
    for ctx in [
        SidePotContext {
            player_all_in: 800,
            dealer_stack: 200,
            existing_pot: 60,
            third_party_all_in: Some(500),
        },
        SidePotContext {
            player_all_in: 100,
            dealer_stack: 300,
            existing_pot: 0,
            third_party_all_in: Some(700),
        },
    ] {
        conserved(&ctx);
    }
}
