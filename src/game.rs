use crate::agents::{Action, Agent};
use crate::cards::{hand_points, Card, Color, Rank};
use crate::config::RoundRules;
use crate::deck::{Deck, DeckError, DiscardPile, DECK_SIZE};
use crate::order::TurnOrder;
use crate::rules::{can_stack, is_legal, Lead, RuleError};
use crate::view::TurnContext;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundPhase {
    Dealing,
    AwaitingTurn,
    ResolvingAction,
    Won,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AbandonReason {
    /// A required draw could not be covered by the draw and discard piles.
    DeckExhausted,
    /// The round ran past `RoundRules::max_turns`.
    TurnLimit,
}

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Won { seat: usize },
    Abandoned(AbandonReason),
}

impl RoundEnd {
    pub fn winner(self) -> Option<usize> {
        match self {
            RoundEnd::Won { seat } => Some(seat),
            RoundEnd::Abandoned(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventVerb {
    Opening,
    Play,
    ColorChosen,
    Pass,
    Penalty,
    Skipped,
    Reverse,
    Reshuffle,
    IllegalMove,
    Win,
    Abandon,
}

impl EventVerb {
    pub fn label(self) -> &'static str {
        match self {
            EventVerb::Opening => "Opening",
            EventVerb::Play => "Play",
            EventVerb::ColorChosen => "Color",
            EventVerb::Pass => "Pass",
            EventVerb::Penalty => "Penalty",
            EventVerb::Skipped => "Skipped",
            EventVerb::Reverse => "Reverse",
            EventVerb::Reshuffle => "Reshuffle",
            EventVerb::IllegalMove => "Illegal",
            EventVerb::Win => "Win",
            EventVerb::Abandon => "Abandon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundEvent {
    pub seat: usize,
    pub verb: EventVerb,
    pub card: Option<Card>,
    /// Cards drawn, cards recycled, or points scored, depending on `verb`.
    pub count: Option<usize>,
}

/// What a single turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnOutcome {
    /// The card as it now sits on the pile (wilds carry their chosen color).
    Played(Card),
    /// Passed and drew this many cards.
    Drew(usize),
    /// Absorbed a draw penalty; the turn was skipped.
    PenaltyTaken(usize),
    /// The proposed card was rejected; `drew` cards were drawn instead.
    Illegal { card: Card, drew: usize },
    Won { seat: usize, card: Card },
    Abandoned(AbandonReason),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("deck exhausted: requested {requested}, available {available}")]
    DeckExhausted { requested: usize, available: usize },
    #[error(transparent)]
    InvalidPileState(#[from] RuleError),
    #[error("invalid round state: {0}")]
    InvalidState(String),
    #[error("round is over")]
    RoundOver,
}

impl From<DeckError> for RoundError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::Exhausted { requested, available } => {
                RoundError::DeckExhausted { requested, available }
            }
        }
    }
}

/// One round: the rules engine. Owns the draw pile, the discard pile, every
/// hand and the turn order; agents only ever see a [`TurnContext`].
#[derive(Debug)]
pub struct Round {
    pub(crate) rules: RoundRules,
    pub(crate) deck: Deck,
    pub(crate) discard: DiscardPile,
    pub(crate) hands: Vec<Vec<Card>>,
    pub(crate) order: TurnOrder,
    pub(crate) phase: RoundPhase,
    /// Top of the pile is the face-up opener.
    pub(crate) opening: bool,
    /// Cards the active seat must draw unless it stacks.
    pub(crate) penalty: usize,
    pub(crate) end: Option<RoundEnd>,
    pub(crate) turns: usize,
    rng: ChaCha8Rng,
    history: Vec<RoundEvent>,
}

impl Round {
    /// Shuffle a fresh deck, deal `rules.hand_size` cards to every seat one at
    /// a time starting at `first_seat`, and flip a non-wild opener.
    pub fn new(
        num_players: usize,
        first_seat: usize,
        rules: RoundRules,
        seed: u64,
    ) -> Result<Self, RoundError> {
        let needed = num_players.checked_mul(rules.hand_size).and_then(|n| n.checked_add(1));
        match needed {
            Some(n) if n <= DECK_SIZE => {}
            _ => {
                return Err(RoundError::DeckExhausted {
                    requested: needed.unwrap_or(usize::MAX),
                    available: DECK_SIZE,
                })
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let mut round = Self {
            rules,
            deck,
            discard: DiscardPile::new(),
            hands: vec![Vec::with_capacity(rules.hand_size); num_players],
            order: TurnOrder::new(num_players, first_seat),
            phase: RoundPhase::Dealing,
            opening: true,
            penalty: 0,
            end: None,
            turns: 0,
            rng,
            history: Vec::new(),
        };
        round.deal()?;
        round.flip_opening()?;
        round.phase = RoundPhase::AwaitingTurn;
        Ok(round)
    }

    /// Set up a table from known cards. `draw_pile[0]` is drawn first and
    /// `top` is treated as a freshly flipped opener.
    pub fn arranged(
        hands: Vec<Vec<Card>>,
        draw_pile: Vec<Card>,
        top: Card,
        first_seat: usize,
        rules: RoundRules,
        seed: u64,
    ) -> Result<Self, RoundError> {
        if top.is_wild() {
            return Err(RoundError::InvalidState(format!("opening card {top} is wild")));
        }
        let mut discard = DiscardPile::new();
        discard.push(top);
        let num_players = hands.len();
        let mut round = Self {
            rules,
            deck: Deck::from_cards(draw_pile),
            discard,
            hands,
            order: TurnOrder::new(num_players, first_seat),
            phase: RoundPhase::AwaitingTurn,
            opening: true,
            penalty: 0,
            end: None,
            turns: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: Vec::new(),
        };
        round.record(round.order.current(), EventVerb::Opening, Some(top), None);
        Ok(round)
    }

    fn deal(&mut self) -> Result<(), RoundError> {
        let seats = self.order.upcoming();
        for _ in 0..self.rules.hand_size {
            for &seat in &seats {
                let card = self.deck.draw().ok_or(RoundError::DeckExhausted {
                    requested: 1,
                    available: 0,
                })?;
                self.hands[seat].push(card);
            }
        }
        Ok(())
    }

    fn flip_opening(&mut self) -> Result<(), RoundError> {
        loop {
            let card = self
                .deck
                .draw()
                .ok_or(RoundError::DeckExhausted { requested: 1, available: 0 })?;
            if !card.is_wild() {
                self.discard.push(card);
                self.record(self.order.current(), EventVerb::Opening, Some(card), None);
                debug!(%card, "opening card");
                return Ok(());
            }
            self.deck.put_back(card);
            if self.deck.cards().iter().all(|c| c.is_wild()) {
                return Err(RoundError::DeckExhausted { requested: 1, available: 0 });
            }
            self.deck.shuffle_with(&mut self.rng);
        }
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// The seat whose turn it is.
    pub fn current(&self) -> usize {
        self.order.current()
    }

    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    pub fn hand(&self, seat: usize) -> Option<&[Card]> {
        self.hands.get(seat).map(|h| h.as_slice())
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.hands.iter().map(|h| h.len()).collect()
    }

    pub fn top(&self) -> Option<Card> {
        self.discard.top()
    }

    pub fn discard_pile(&self) -> &[Card] {
        self.discard.cards()
    }

    pub fn draw_pile_len(&self) -> usize {
        self.deck.len()
    }

    pub fn penalty(&self) -> usize {
        self.penalty
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn end(&self) -> Option<RoundEnd> {
        self.end
    }

    pub fn winner(&self) -> Option<usize> {
        self.end.and_then(RoundEnd::winner)
    }

    pub fn is_over(&self) -> bool {
        self.end.is_some()
    }

    /// Cards across the draw pile, the discard pile and every hand.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands.iter().map(|h| h.len()).sum::<usize>()
    }

    /// Points the winner scores: the value of every card left in the other hands.
    pub fn winner_points(&self) -> u32 {
        match self.winner() {
            Some(w) => self
                .hands
                .iter()
                .enumerate()
                .filter(|&(seat, _)| seat != w)
                .map(|(_, h)| hand_points(h))
                .sum(),
            None => 0,
        }
    }

    pub fn history_recent(&self, n: usize) -> Vec<RoundEvent> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// What the active seat is answering.
    pub fn lead(&self) -> Result<Lead, RoundError> {
        let top = self
            .discard
            .top()
            .ok_or_else(|| RoundError::InvalidState("discard pile is empty".into()))?;
        let lead = if self.opening { Lead::opening(top) } else { Lead::played(top) };
        Ok(lead.with_penalty(self.penalty))
    }

    /// Snapshot for `seat`. Fails on an uncolored wild at the top of the pile.
    pub fn context(&self, seat: usize) -> Result<TurnContext, RoundError> {
        let hand = self
            .hands
            .get(seat)
            .ok_or_else(|| RoundError::InvalidState(format!("no seat {seat}")))?;
        let lead = self.lead()?;
        lead.validate()?;
        let opponent_hand_counts = self
            .hands
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != seat)
            .map(|(i, h)| (i, h.len()))
            .collect();
        Ok(TurnContext {
            seat,
            hand: hand.clone(),
            lead,
            discard_pile: self.discard.cards().to_vec(),
            draw_pile_remaining: self.deck.len(),
            opponent_hand_counts,
            stacking: self.rules.stacking,
        })
    }

    /// Run one turn for the active seat, consulting `agent`.
    ///
    /// A seat facing a draw penalty it cannot stack on absorbs it without
    /// being asked.
    pub fn play_turn(&mut self, agent: &mut dyn Agent) -> Result<TurnOutcome, RoundError> {
        self.ensure_in_progress()?;
        if let Some(outcome) = self.check_turn_limit() {
            return Ok(outcome);
        }
        self.turns += 1;
        let seat = self.order.current();
        let ctx = self.context(seat).map_err(|e| self.fail(e))?;
        let result = if self.penalty > 0 && !self.can_stack_any(seat, ctx.lead()) {
            self.absorb_penalty(seat)
        } else {
            let action = agent.decide(&ctx);
            self.resolve(seat, action, || agent.choose_color(&ctx))
        };
        result.map_err(|e| self.fail(e))
    }

    /// Play `card` for the active seat without an agent. `color` is used if
    /// the card is wild; `None` picks one at random.
    pub fn action_play(&mut self, card: Card, color: Option<Color>) -> Result<TurnOutcome, RoundError> {
        self.apply_action(Action::Play(card), color)
    }

    /// Pass for the active seat: draw one card, or absorb a pending penalty.
    pub fn action_pass(&mut self) -> Result<TurnOutcome, RoundError> {
        self.apply_action(Action::Pass, None)
    }

    fn apply_action(&mut self, action: Action, color: Option<Color>) -> Result<TurnOutcome, RoundError> {
        self.ensure_in_progress()?;
        if let Some(outcome) = self.check_turn_limit() {
            return Ok(outcome);
        }
        self.turns += 1;
        let seat = self.order.current();
        self.lead()
            .and_then(|l| l.validate().map_err(RoundError::from))
            .map_err(|e| self.fail(e))?;
        let result = self.resolve(seat, action, || color);
        result.map_err(|e| self.fail(e))
    }

    /// Play turns until the round ends. `agents[i]` plays seat `i`.
    pub fn run(&mut self, agents: &mut [Box<dyn Agent>]) -> Result<RoundEnd, RoundError> {
        if agents.len() != self.hands.len() {
            return Err(RoundError::InvalidState(format!(
                "{} agents for {} seats",
                agents.len(),
                self.hands.len()
            )));
        }
        loop {
            if let Some(end) = self.end {
                return Ok(end);
            }
            let seat = self.order.current();
            match self.play_turn(agents[seat].as_mut()) {
                Ok(_) | Err(RoundError::DeckExhausted { .. }) => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<(), RoundError> {
        if self.end.is_some() {
            return Err(RoundError::RoundOver);
        }
        Ok(())
    }

    fn check_turn_limit(&mut self) -> Option<TurnOutcome> {
        if self.turns >= self.rules.max_turns {
            return Some(self.abandon(AbandonReason::TurnLimit));
        }
        None
    }

    fn can_stack_any(&self, seat: usize, lead: &Lead) -> bool {
        self.hands[seat].iter().any(|&c| can_stack(lead.top(), c, self.rules.stacking))
    }

    fn resolve<F>(&mut self, seat: usize, action: Action, choose_color: F) -> Result<TurnOutcome, RoundError>
    where
        F: FnOnce() -> Option<Color>,
    {
        let card = match action {
            Action::Pass if self.penalty > 0 => return self.absorb_penalty(seat),
            Action::Pass => {
                self.draw_cards(seat, 1)?;
                self.record(seat, EventVerb::Pass, None, Some(1));
                debug!(seat, "pass");
                self.order.advance();
                return Ok(TurnOutcome::Drew(1));
            }
            Action::Play(card) => card,
        };

        let in_hand = self.hands[seat].contains(&card);
        let legal = is_legal(&self.lead()?, card, self.rules.stacking)?;
        if in_hand && legal {
            return self.play_card(seat, card, choose_color);
        }

        warn!(seat, %card, in_hand, legal, "illegal move");
        self.record(seat, EventVerb::IllegalMove, Some(card), None);
        if self.penalty > 0 {
            let drew = match self.absorb_penalty(seat)? {
                TurnOutcome::PenaltyTaken(n) => n,
                _ => 0,
            };
            return Ok(TurnOutcome::Illegal { card, drew });
        }
        self.draw_cards(seat, 1)?;
        self.order.advance();
        Ok(TurnOutcome::Illegal { card, drew: 1 })
    }

    fn play_card<F>(&mut self, seat: usize, card: Card, choose_color: F) -> Result<TurnOutcome, RoundError>
    where
        F: FnOnce() -> Option<Color>,
    {
        self.phase = RoundPhase::ResolvingAction;
        let idx = self.hands[seat]
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| RoundError::InvalidState(format!("{card} missing from seat {seat}")))?;
        self.hands[seat].remove(idx);

        let placed = if card.is_wild() {
            let color = match choose_color() {
                Some(c) if c.is_real() => c,
                _ => Color::REAL.choose(&mut self.rng).copied().unwrap_or(Color::Red),
            };
            card.with_color(color)
        } else {
            card
        };
        self.discard.push(placed);
        self.opening = false;
        self.record(seat, EventVerb::Play, Some(placed), None);
        if placed.is_wild() {
            self.record(seat, EventVerb::ColorChosen, Some(placed), None);
        }
        debug!(seat, card = %placed, left = self.hands[seat].len(), "play");

        if self.hands[seat].is_empty() {
            self.finish(seat);
            return Ok(TurnOutcome::Won { seat, card: placed });
        }

        match card.rank() {
            Rank::Skip => self.skip_next(),
            Rank::Reverse if self.order.len() == 2 => self.skip_next(),
            Rank::Reverse => {
                self.order.reverse();
                self.record(seat, EventVerb::Reverse, None, None);
                self.order.advance();
            }
            Rank::DrawTwo | Rank::WildDrawFour => {
                self.penalty += card.rank().penalty();
                self.order.advance();
            }
            _ => {
                self.order.advance();
            }
        }
        self.phase = RoundPhase::AwaitingTurn;
        Ok(TurnOutcome::Played(placed))
    }

    fn skip_next(&mut self) {
        let skipped = self.order.peek(1);
        self.record(skipped, EventVerb::Skipped, None, None);
        self.order.skip_next();
    }

    fn absorb_penalty(&mut self, seat: usize) -> Result<TurnOutcome, RoundError> {
        let n = self.penalty;
        self.draw_cards(seat, n)?;
        self.penalty = 0;
        self.record(seat, EventVerb::Penalty, None, Some(n));
        debug!(seat, n, "penalty absorbed");
        self.order.advance();
        Ok(TurnOutcome::PenaltyTaken(n))
    }

    fn draw_cards(&mut self, seat: usize, n: usize) -> Result<(), RoundError> {
        let drawn = self.deck.draw_or_reshuffle(n, &mut self.discard, &mut self.rng)?;
        if drawn.recycled > 0 {
            self.record(seat, EventVerb::Reshuffle, None, Some(drawn.recycled));
            debug!(recycled = drawn.recycled, "discard pile reshuffled");
        }
        self.hands[seat].extend(drawn.cards);
        Ok(())
    }

    fn finish(&mut self, seat: usize) {
        self.phase = RoundPhase::Won;
        self.end = Some(RoundEnd::Won { seat });
        let points = self.winner_points();
        self.record(seat, EventVerb::Win, None, Some(points as usize));
        info!(seat, points, turns = self.turns, "round won");
    }

    fn abandon(&mut self, reason: AbandonReason) -> TurnOutcome {
        self.phase = RoundPhase::Abandoned;
        self.end = Some(RoundEnd::Abandoned(reason));
        self.record(self.order.current(), EventVerb::Abandon, None, None);
        warn!(?reason, turns = self.turns, "round abandoned");
        TurnOutcome::Abandoned(reason)
    }

    fn fail(&mut self, err: RoundError) -> RoundError {
        match &err {
            RoundError::DeckExhausted { requested, available } => {
                debug!(requested, available, "draw cannot be covered");
                self.abandon(AbandonReason::DeckExhausted);
            }
            RoundError::InvalidPileState(_) | RoundError::InvalidState(_) => {
                error!(%err, "round invariant violated");
            }
            RoundError::RoundOver => {}
        }
        err
    }

    fn record(&mut self, seat: usize, verb: EventVerb, card: Option<Card>, count: Option<usize>) {
        trace!(seat, verb = verb.label(), card = ?card, count = ?count, "event");
        self.history.push(RoundEvent { seat, verb, card, count });
    }
}
