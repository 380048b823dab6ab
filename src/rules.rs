//! Legal-move computation.
//!
//! A [`Lead`] describes what the active seat is responding to: the top of the
//! discard pile, any draw penalty still waiting to be absorbed, and whether the
//! top is the round's face-up opener (whose effect is never applied).

use crate::cards::{Card, Rank};

/// Which draw cards may be played on top of a pending draw penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum StackingPolicy {
    /// Every draw penalty is absorbed immediately.
    None,
    /// DrawTwo on a DrawTwo of the same color; WildDrawFour on WildDrawFour.
    #[default]
    SameColorOnly,
    /// Any DrawTwo or WildDrawFour on either.
    AnyDrawCard,
}

impl StackingPolicy {
    pub fn label(self) -> &'static str {
        match self {
            StackingPolicy::None => "none",
            StackingPolicy::SameColorOnly => "same-color",
            StackingPolicy::AnyDrawCard => "any-draw",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("invalid pile state: top card {0} has no assigned color")]
    InvalidPileState(Card),
}

/// The card a seat must answer plus the state of its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lead {
    top: Card,
    penalty: usize,
    opening: bool,
}

impl Lead {
    /// The face-up card flipped at round start.
    pub const fn opening(top: Card) -> Self {
        Self { top, penalty: 0, opening: true }
    }

    /// A card played during the round whose effect (if any) has been served.
    pub const fn played(top: Card) -> Self {
        Self { top, penalty: 0, opening: false }
    }

    /// A played draw card whose accumulated penalty is still outstanding.
    pub const fn with_penalty(self, penalty: usize) -> Self {
        Self { penalty, ..self }
    }

    pub const fn top(&self) -> Card {
        self.top
    }

    pub const fn penalty(&self) -> usize {
        self.penalty
    }

    /// A wild left on the pile without a color cannot be answered.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.top.is_uncolored() {
            return Err(RuleError::InvalidPileState(self.top));
        }
        Ok(())
    }
}

/// Whether `card` may stack on `top` while a draw penalty is pending.
pub fn can_stack(top: Card, card: Card, policy: StackingPolicy) -> bool {
    match policy {
        StackingPolicy::None => false,
        StackingPolicy::SameColorOnly => match (top.rank(), card.rank()) {
            (Rank::DrawTwo, Rank::DrawTwo) => top.color() == card.color(),
            (Rank::WildDrawFour, Rank::WildDrawFour) => true,
            _ => false,
        },
        StackingPolicy::AnyDrawCard => top.rank().is_draw() && card.rank().is_draw(),
    }
}

/// Whether `card` is a legal response to `lead`.
///
/// ```
/// use uno_rs::cards::{Card, Color, Rank};
/// use uno_rs::rules::{is_legal, Lead, StackingPolicy};
///
/// let lead = Lead::played(Card::new(Color::Red, Rank::Five));
/// let policy = StackingPolicy::default();
/// assert!(is_legal(&lead, Card::new(Color::Blue, Rank::Five), policy).unwrap());
/// assert!(!is_legal(&lead, Card::new(Color::Blue, Rank::Six), policy).unwrap());
/// ```
pub fn is_legal(lead: &Lead, card: Card, policy: StackingPolicy) -> Result<bool, RuleError> {
    lead.validate()?;
    let top = lead.top;
    if lead.penalty > 0 {
        return Ok(can_stack(top, card, policy));
    }
    if card.is_wild() {
        return Ok(true);
    }
    let same_color = card.color() == top.color();
    let legal = match top.rank() {
        // color assigned at play time
        Rank::Wild | Rank::WildDrawFour => same_color,
        // effect already served; only the color carries over
        Rank::Skip | Rank::Reverse | Rank::DrawTwo if !lead.opening => same_color,
        _ => same_color || card.rank() == top.rank(),
    };
    Ok(legal)
}

/// The cards in `hand` that are legal responses, in hand order.
pub fn legal_moves(
    lead: &Lead,
    hand: &[Card],
    policy: StackingPolicy,
) -> Result<Vec<Card>, RuleError> {
    lead.validate()?;
    let mut out = Vec::new();
    for &card in hand {
        if is_legal(lead, card, policy)? {
            out.push(card);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Color};

    fn card(s: &str) -> Card {
        s.parse().expect("valid card")
    }

    #[test]
    fn numeral_top_accepts_color_rank_and_wilds() {
        let lead = Lead::played(card("r5"));
        let hand = parse_cards("b5 r7 W g2").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::default()).unwrap();
        assert_eq!(legal, parse_cards("b5 r7 W").unwrap());
    }

    #[test]
    fn pending_wild_draw_four_only_accepts_another() {
        let lead = Lead::played(card("W+4:r")).with_penalty(4);
        let hand = parse_cards("W+4 r3").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::SameColorOnly).unwrap();
        assert_eq!(legal, vec![Card::wild_draw_four()]);
    }

    #[test]
    fn served_wild_draw_four_plays_as_its_color() {
        let lead = Lead::played(card("W+4:r"));
        let hand = parse_cards("W+4 r3 b3").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::SameColorOnly).unwrap();
        assert_eq!(legal, parse_cards("W+4 r3").unwrap());
    }

    #[test]
    fn colored_wild_accepts_its_color_and_wilds() {
        let lead = Lead::played(card("W:g"));
        let hand = parse_cards("g1 y1 W W+4").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::default()).unwrap();
        assert_eq!(legal, parse_cards("g1 W W+4").unwrap());
    }

    #[test]
    fn uncolored_wild_on_top_is_invalid() {
        let lead = Lead::played(Card::wild());
        let err = legal_moves(&lead, &parse_cards("r1").unwrap(), StackingPolicy::default());
        assert_eq!(err, Err(RuleError::InvalidPileState(Card::wild())));
    }

    #[test]
    fn served_actions_need_color_or_wild() {
        for top in ["rS", "rR", "r+2"] {
            let lead = Lead::played(card(top));
            let hand = parse_cards("r9 bS bR b+2 W").unwrap();
            let legal = legal_moves(&lead, &hand, StackingPolicy::default()).unwrap();
            assert_eq!(legal, parse_cards("r9 W").unwrap(), "top {top}");
        }
    }

    #[test]
    fn opening_action_card_is_answered_like_a_numeral() {
        let lead = Lead::opening(card("rS"));
        let hand = parse_cards("bS g4 r4").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::default()).unwrap();
        assert_eq!(legal, parse_cards("bS r4").unwrap());
    }

    #[test]
    fn stacking_policies() {
        let red_two = card("r+2");
        let blue_two = card("b+2");
        let w4 = Card::wild_draw_four();

        assert!(!can_stack(red_two, card("r+2"), StackingPolicy::None));

        assert!(can_stack(red_two, card("r+2"), StackingPolicy::SameColorOnly));
        assert!(!can_stack(red_two, blue_two, StackingPolicy::SameColorOnly));
        assert!(!can_stack(red_two, w4, StackingPolicy::SameColorOnly));
        assert!(can_stack(w4.with_color(Color::Red), w4, StackingPolicy::SameColorOnly));

        assert!(can_stack(red_two, blue_two, StackingPolicy::AnyDrawCard));
        assert!(can_stack(red_two, w4, StackingPolicy::AnyDrawCard));
        assert!(can_stack(w4.with_color(Color::Red), blue_two, StackingPolicy::AnyDrawCard));
        assert!(!can_stack(red_two, card("rS"), StackingPolicy::AnyDrawCard));
    }

    #[test]
    fn pending_penalty_blocks_ordinary_responses() {
        let lead = Lead::played(card("g+2")).with_penalty(2);
        let hand = parse_cards("g5 g+2 W").unwrap();
        let legal = legal_moves(&lead, &hand, StackingPolicy::SameColorOnly).unwrap();
        assert_eq!(legal, vec![card("g+2")]);
        assert!(legal_moves(&lead, &hand, StackingPolicy::None).unwrap().is_empty());
    }

    #[test]
    fn stacking_labels() {
        assert_eq!(StackingPolicy::None.label(), "none");
        assert_eq!(StackingPolicy::default().label(), "same-color");
        assert_eq!(StackingPolicy::AnyDrawCard.label(), "any-draw");
    }
}
