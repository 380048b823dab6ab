use proptest::prelude::*;
use uno_rs::agents::{Agent, BotAgent, BotProfile, Difficulty};
use uno_rs::config::RoundRules;
use uno_rs::deck::DECK_SIZE;
use uno_rs::game::{Round, RoundError};
use uno_rs::rules::StackingPolicy;

fn any_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![Just(Difficulty::Easy), Just(Difficulty::Medium), Just(Difficulty::Hard)]
}

fn any_stacking() -> impl Strategy<Value = StackingPolicy> {
    prop_oneof![
        Just(StackingPolicy::None),
        Just(StackingPolicy::SameColorOnly),
        Just(StackingPolicy::AnyDrawCard),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_card_stays_in_play(
        seed in any::<u64>(),
        players in 2usize..=10,
        difficulty in any_difficulty(),
        stacking in any_stacking(),
    ) {
        let rules = RoundRules::default().with_stacking(stacking).with_max_turns(400);
        let mut round = Round::new(players, 0, rules, seed).unwrap();
        let mut agents: Vec<Box<dyn Agent>> = (0..players)
            .map(|i| {
                let p = BotProfile::for_difficulty(difficulty).with_seed(seed ^ i as u64);
                Box::new(BotAgent::new(p)) as Box<dyn Agent>
            })
            .collect();

        prop_assert_eq!(round.card_count(), DECK_SIZE);
        while !round.is_over() {
            let seat = round.current();
            match round.play_turn(agents[seat].as_mut()) {
                Ok(_) | Err(RoundError::DeckExhausted { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
            prop_assert_eq!(round.card_count(), DECK_SIZE);
            let top = round.top().unwrap();
            prop_assert!(!top.is_uncolored(), "uncolored wild on the pile: {top}");
        }
        prop_assert!(round.turns() <= 400);
    }
}
