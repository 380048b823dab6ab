use uno_rs::agents::{Action, QueuedAgent};
use uno_rs::cards::{parse_cards, Card, Color};
use uno_rs::config::RoundRules;
use uno_rs::game::{EventVerb, Round, TurnOutcome};
use uno_rs::rules::StackingPolicy;

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

fn table(hands: &[&str], draw: &str, top: &str, rules: RoundRules) -> Round {
    let hands = hands.iter().map(|h| parse_cards(h).unwrap()).collect();
    Round::arranged(hands, parse_cards(draw).unwrap(), card(top), 0, rules, 9).unwrap()
}

fn plays(cards: &str) -> QueuedAgent {
    QueuedAgent::new("script").with_actions(parse_cards(cards).unwrap().into_iter().map(Action::Play))
}

#[test]
fn skip_jumps_one_seat() {
    let mut r = table(&["rS r1", "g1 g2", "g3 g4", "g5 g6"], "b1 b2 b3", "r5", RoundRules::default());
    let out = r.play_turn(&mut plays("rS")).unwrap();
    assert_eq!(out, TurnOutcome::Played(card("rS")));
    assert_eq!(r.current(), 2);
    let last = r.history_recent(1);
    assert_eq!(last[0].verb, EventVerb::Skipped);
    assert_eq!(last[0].seat, 1);
}

#[test]
fn reverse_turns_play_around() {
    let mut r = table(&["rR r1", "g1 g2", "g3 g4", "g5 g6"], "b1 b2 b3", "r5", RoundRules::default());
    r.play_turn(&mut plays("rR")).unwrap();
    assert_eq!(r.current(), 3);
    assert_eq!(r.order().upcoming(), vec![3, 2, 1, 0]);
}

#[test]
fn reverse_heads_up_acts_as_skip() {
    let mut r = table(&["rR r1", "g1 g2"], "b1 b2 b3", "r5", RoundRules::default());
    r.play_turn(&mut plays("rR")).unwrap();
    assert_eq!(r.current(), 0);
}

#[test]
fn draw_two_is_absorbed_by_next_seat() {
    let mut r = table(&["r+2 r1", "g1 g2", "g3 g4"], "b1 b2 b3", "r5", RoundRules::default());
    r.play_turn(&mut plays("r+2")).unwrap();
    assert_eq!(r.penalty(), 2);

    // seat 1 holds nothing to stack; its agent is never consulted
    let mut seat1 = plays("g1");
    let out = r.play_turn(&mut seat1).unwrap();
    assert_eq!(out, TurnOutcome::PenaltyTaken(2));
    assert_eq!(seat1.pending(), 1);
    assert_eq!(r.hand(1).unwrap().len(), 4);
    assert_eq!(r.penalty(), 0);
    assert_eq!(r.current(), 2);
}

#[test]
fn stacked_draw_cards_accumulate() {
    let rules = RoundRules::default().with_stacking(StackingPolicy::AnyDrawCard);
    let mut r = table(&["r+2 r1", "W+4 g2", "g3 g4"], "b1 b2 b3 b4 b5 b6 b7", "r5", rules);
    r.play_turn(&mut plays("r+2")).unwrap();
    let mut seat1 = plays("W+4").with_colors([Color::Blue]);
    r.play_turn(&mut seat1).unwrap();
    assert_eq!(r.penalty(), 6);
    assert_eq!(r.play_turn(&mut plays("")).unwrap(), TurnOutcome::PenaltyTaken(6));
    assert_eq!(r.hand(2).unwrap().len(), 8);
}

#[test]
fn wild_takes_the_agent_color() {
    let mut r = table(&["W r1", "g1 b2", "g3 g4"], "b1 b2 b3", "r5", RoundRules::default());
    let mut agent = plays("W").with_colors([Color::Blue]);
    let out = r.play_turn(&mut agent).unwrap();
    assert_eq!(out, TurnOutcome::Played(Card::wild().with_color(Color::Blue)));
    assert_eq!(r.top().map(|c| c.color()), Some(Color::Blue));

    // green does not follow a blue wild
    let out = r.play_turn(&mut plays("g1")).unwrap();
    assert_eq!(out, TurnOutcome::Illegal { card: card("g1"), drew: 1 });
    assert_eq!(r.current(), 2);
}

#[test]
fn card_not_in_hand_is_illegal() {
    let mut r = table(&["g1 g2", "g3 g4"], "b1 b2 b3", "r5", RoundRules::default());
    let out = r.play_turn(&mut plays("r6")).unwrap();
    assert_eq!(out, TurnOutcome::Illegal { card: card("r6"), drew: 1 });
    assert_eq!(r.hand(0).unwrap().len(), 3);
    assert_eq!(r.current(), 1);
}

#[test]
fn shedding_the_last_card_wins() {
    let mut r = table(&["r1", "g3 g4 bS"], "b1 b2 b3", "r5", RoundRules::default());
    let out = r.play_turn(&mut plays("r1")).unwrap();
    assert_eq!(out, TurnOutcome::Won { seat: 0, card: card("r1") });
    assert_eq!(r.winner(), Some(0));
    assert_eq!(r.winner_points(), 3 + 4 + 20);
    assert!(r.play_turn(&mut plays("g3")).is_err());
}
