use proptest::prelude::*;
use uno_rs::order::TurnOrder;

fn any_order() -> impl Strategy<Value = TurnOrder> {
    (2usize..=10).prop_flat_map(|n| (0..n).prop_map(move |first| TurnOrder::new(n, first)))
}

proptest! {
    #[test]
    fn reverse_replays_the_others_backwards(order in any_order(), steps in 0usize..25) {
        let mut order = order;
        order.advance_by(steps);
        let before = order.upcoming();
        order.reverse();
        let after = order.upcoming();
        prop_assert_eq!(after[0], before[0]);
        let mut rest = before[1..].to_vec();
        rest.reverse();
        prop_assert_eq!(&after[1..], &rest[..]);
    }

    #[test]
    fn double_reverse_restores_order(order in any_order(), steps in 0usize..25) {
        let mut order = order;
        order.advance_by(steps);
        let before = order.upcoming();
        order.reverse();
        order.reverse();
        prop_assert_eq!(order.upcoming(), before);
    }

    #[test]
    fn skip_is_two_advances(order in any_order()) {
        let mut a = order.clone();
        let mut b = order;
        a.skip_next();
        b.advance();
        b.advance();
        prop_assert_eq!(a.current(), b.current());
    }

    #[test]
    fn every_seat_acts_once_per_lap(order in any_order()) {
        let mut seen: Vec<usize> = order.upcoming();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..order.len()).collect::<Vec<_>>());
    }
}

#[test]
fn reverse_in_four_seats() {
    let mut order = TurnOrder::new(4, 0);
    order.reverse();
    let mut seen = vec![order.current()];
    for _ in 0..4 {
        seen.push(order.advance());
    }
    assert_eq!(seen, vec![0, 3, 2, 1, 0]);
}
