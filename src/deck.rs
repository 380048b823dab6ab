use crate::cards::{Card, Color, Rank};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cards in the canonical set.
pub const DECK_SIZE: usize = 108;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested}, available {available}")]
    Exhausted { requested: usize, available: usize },
}

/// The draw pile.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The canonical 108-card set in a fixed order: per color one zero, two
    /// of each other numeral and two of each action, then four of each wild.
    ///
    /// ```
    /// use uno_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 108);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &color in &Color::REAL {
            for &rank in &Rank::NUMERALS {
                let copies = if rank == Rank::Zero { 1 } else { 2 };
                for _ in 0..copies {
                    cards.push(Card::new(color, rank));
                }
            }
            for &rank in &Rank::ACTIONS {
                cards.push(Card::new(color, rank));
                cards.push(Card::new(color, rank));
            }
        }
        for &rank in &Rank::WILDS {
            for _ in 0..4 {
                cards.push(Card::new(Color::Wild, rank));
            }
        }
        Self { cards }
    }

    /// A deck from known cards; `cards[0]` is drawn first.
    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    /// A standard deck, already permuted.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `n` cards from the top of the deck. Nothing is removed when fewer
    /// than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted { requested: n, available: self.cards.len() });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Put a card back on top of the deck.
    pub fn put_back(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Move every discard except the top card back into the draw pile and
    /// shuffle it. Played wilds lose their assigned color. Returns the number
    /// of recycled cards.
    pub fn reshuffle_from<R: Rng + ?Sized>(
        &mut self,
        discard: &mut DiscardPile,
        rng: &mut R,
    ) -> Result<usize, DeckError> {
        let recycled = discard.take_under_top();
        if recycled.is_empty() {
            return Err(DeckError::Exhausted { requested: 1, available: self.cards.len() });
        }
        let count = recycled.len();
        self.cards.extend(recycled.into_iter().map(Card::reset));
        self.cards.shuffle(rng);
        Ok(count)
    }

    /// Draw `n` cards, recycling the discard pile whenever the draw pile runs
    /// dry. Fails before removing anything if the two piles cannot cover `n`.
    pub fn draw_or_reshuffle<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        discard: &mut DiscardPile,
        rng: &mut R,
    ) -> Result<Drawn, DeckError> {
        let available = self.cards.len() + discard.len().saturating_sub(1);
        if n > available {
            return Err(DeckError::Exhausted { requested: n, available });
        }
        let mut drawn = Drawn { cards: Vec::with_capacity(n), recycled: 0 };
        while drawn.cards.len() < n {
            match self.draw() {
                Some(card) => drawn.cards.push(card),
                None => drawn.recycled += self.reshuffle_from(discard, rng)?,
            }
        }
        Ok(drawn)
    }
}

/// Result of [`Deck::draw_or_reshuffle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawn {
    pub cards: Vec<Card>,
    /// Discards moved back into the draw pile to complete the draw.
    pub recycled: usize,
}

/// Played cards, top last.
#[derive(Debug, Clone, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return everything beneath the top card.
    fn take_under_top(&mut self) -> Vec<Card> {
        match self.cards.pop() {
            Some(top) => {
                let under = std::mem::take(&mut self.cards);
                self.cards.push(top);
                under
            }
            None => Vec::new(),
        }
    }
}
