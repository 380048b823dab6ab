use crate::cards::{Card, Color};
use crate::rules::{legal_moves, Lead, StackingPolicy};
use std::collections::BTreeMap;

/// Read-only snapshot handed to an agent on its turn. Every field is a copy;
/// nothing an agent does with it reaches the engine's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub(crate) seat: usize,
    pub(crate) hand: Vec<Card>,
    pub(crate) lead: Lead,
    pub(crate) discard_pile: Vec<Card>,
    pub(crate) draw_pile_remaining: usize,
    pub(crate) opponent_hand_counts: BTreeMap<usize, usize>,
    pub(crate) stacking: StackingPolicy,
}

impl TurnContext {
    /// The seat this context was built for.
    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// The card being answered.
    pub fn top(&self) -> Card {
        self.lead.top()
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    /// Played cards, top last.
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn draw_pile_remaining(&self) -> usize {
        self.draw_pile_remaining
    }

    /// Hand sizes of every other seat.
    pub fn opponent_hand_counts(&self) -> &BTreeMap<usize, usize> {
        &self.opponent_hand_counts
    }

    /// Cards this seat must draw unless it stacks.
    pub fn penalty(&self) -> usize {
        self.lead.penalty()
    }

    pub fn stacking(&self) -> StackingPolicy {
        self.stacking
    }

    /// Legal cards in hand order.
    pub fn playable(&self) -> Vec<Card> {
        legal_moves(&self.lead, &self.hand, self.stacking).unwrap_or_default()
    }

    /// Fewest cards held by any opponent.
    pub fn smallest_opponent_hand(&self) -> Option<usize> {
        self.opponent_hand_counts.values().copied().min()
    }

    /// Real color held most often in hand; ties go to the earlier color.
    pub fn dominant_color(&self) -> Option<Color> {
        let mut counts = [0usize; 4];
        for card in &self.hand {
            if let Some(i) = Color::REAL.iter().position(|&c| c == card.color()) {
                counts[i] += 1;
            }
        }
        let (best, &count) = counts.iter().enumerate().rev().max_by_key(|&(_, &n)| n)?;
        if count == 0 {
            return None;
        }
        Some(Color::REAL[best])
    }
}
