use crate::cards::{Card, Color};
use crate::view::TurnContext;
use rand::seq::IndexedRandom;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{Action, Agent};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    /// Random legal card; occasionally plays its first card without looking.
    Easy,
    /// First legal card in hand order.
    Medium,
    /// Sheds points, saves wilds, attacks short hands with action cards.
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Chance of playing the first card in hand regardless of legality.
    pub blunder: f64,
    /// Opponent hand size at or below which Hard bots favour action cards.
    pub threat_threshold: usize,
    pub name: Option<String>,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let blunder = match difficulty {
            Difficulty::Easy => 0.1,
            Difficulty::Medium | Difficulty::Hard => 0.0,
        };
        Self { difficulty, blunder, threat_threshold: 2, name: None, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_blunder(mut self, blunder: f64) -> Self {
        self.blunder = blunder.clamp(0.0, 1.0);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// A computer player driven by a [`BotProfile`].
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    name: String,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let name = profile
            .name
            .clone()
            .unwrap_or_else(|| format!("{} Bot", profile.difficulty.label()));
        let state = BotState::new(profile.rng_seed);
        Self { profile, name, state }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl Agent for BotAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, ctx: &TurnContext) -> Action {
        if self.profile.blunder > 0.0 && self.state.rng.random::<f64>() < self.profile.blunder {
            if let Some(&first) = ctx.hand().first() {
                return Action::Play(first);
            }
        }
        let playable = ctx.playable();
        let pick = match self.profile.difficulty {
            Difficulty::Easy => pick_random(ctx, &playable, &mut self.state),
            Difficulty::Medium => playable.first().copied(),
            Difficulty::Hard => pick_hard(ctx, &playable, self.profile.threat_threshold),
        };
        pick.map(Action::Play).unwrap_or(Action::Pass)
    }

    fn choose_color(&mut self, ctx: &TurnContext) -> Option<Color> {
        match self.profile.difficulty {
            Difficulty::Easy => Color::REAL.choose(&mut self.state.rng).copied(),
            Difficulty::Medium | Difficulty::Hard => ctx.dominant_color(),
        }
    }
}

/// Same color first, then same rank, then any other colored card (a
/// cross-color stack), then wilds; random within a group.
fn pick_random(ctx: &TurnContext, playable: &[Card], state: &mut BotState) -> Option<Card> {
    let top = ctx.top();
    let (wilds, colored): (Vec<Card>, Vec<Card>) = playable.iter().partition(|c| c.is_wild());
    let on_color: Vec<Card> = colored.iter().copied().filter(|c| c.color() == top.color()).collect();
    let on_rank: Vec<Card> = colored
        .iter()
        .copied()
        .filter(|c| c.color() != top.color() && c.rank() == top.rank())
        .collect();
    let rest: Vec<Card> = colored
        .iter()
        .copied()
        .filter(|c| c.color() != top.color() && c.rank() != top.rank())
        .collect();
    [on_color, on_rank, rest, wilds]
        .iter()
        .find(|group| !group.is_empty())
        .and_then(|group| group.choose(&mut state.rng).copied())
}

fn pick_hard(ctx: &TurnContext, playable: &[Card], threat_threshold: usize) -> Option<Card> {
    if ctx.penalty() > 0 {
        return playable.first().copied();
    }
    let threatened = ctx.smallest_opponent_hand().is_some_and(|n| n <= threat_threshold);
    let dominant = ctx.dominant_color();
    playable.iter().copied().max_by_key(|&card| hard_score(card, threatened, dominant))
}

fn hard_score(card: Card, threatened: bool, dominant: Option<Color>) -> i32 {
    let mut score = card.points() as i32;
    if card.is_wild() {
        score -= 100;
    }
    if threatened && card.rank().is_action() {
        score += 200;
    }
    if Some(card.color()) == dominant {
        score += 15;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::rules::{Lead, StackingPolicy};
    use std::collections::BTreeMap;

    fn ctx(hand: &str, top: &str, opponent: usize) -> TurnContext {
        let top: Card = top.parse().unwrap();
        TurnContext {
            seat: 0,
            hand: parse_cards(hand).unwrap(),
            lead: Lead::played(top),
            discard_pile: vec![top],
            draw_pile_remaining: 60,
            opponent_hand_counts: BTreeMap::from([(1, opponent)]),
            stacking: StackingPolicy::default(),
        }
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn medium_plays_first_legal_card() {
        let mut bot = BotAgent::new(BotProfile::for_difficulty(Difficulty::Medium));
        let c = ctx("g1 r9 r2", "r5", 7);
        assert_eq!(bot.decide(&c), Action::Play(card("r9")));
        assert_eq!(bot.name(), "Medium Bot");
    }

    #[test]
    fn bots_pass_without_legal_cards() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let profile = BotProfile::for_difficulty(d).with_seed(3).with_blunder(0.0);
            let mut bot = BotAgent::new(profile);
            assert_eq!(bot.decide(&ctx("g1 b2", "r5", 7)), Action::Pass, "{d:?}");
        }
    }

    #[test]
    fn hard_attacks_short_hands_with_actions() {
        let mut bot = BotAgent::new(BotProfile::for_difficulty(Difficulty::Hard));
        assert_eq!(bot.decide(&ctx("r9 rS W", "r5", 1)), Action::Play(card("rS")));
        // no threat: shed the higher numeral, keep the wild
        assert_eq!(bot.decide(&ctx("r2 r9 W", "r5", 7)), Action::Play(card("r9")));
    }

    #[test]
    fn hard_saves_wild_until_needed() {
        let mut bot = BotAgent::new(BotProfile::for_difficulty(Difficulty::Hard));
        assert_eq!(bot.decide(&ctx("b2 W", "r5", 7)), Action::Play(Card::wild()));
    }

    #[test]
    fn easy_prefers_color_matches() {
        let profile = BotProfile::for_difficulty(Difficulty::Easy).with_seed(11).with_blunder(0.0);
        let mut bot = BotAgent::new(profile);
        for _ in 0..20 {
            assert_eq!(bot.decide(&ctx("b5 r7 W", "r5", 7)), Action::Play(card("r7")));
        }
    }

    #[test]
    fn easy_prefers_rank_matches_over_wilds() {
        let profile = BotProfile::for_difficulty(Difficulty::Easy).with_seed(4).with_blunder(0.0);
        let mut bot = BotAgent::new(profile);
        for _ in 0..20 {
            assert_eq!(bot.decide(&ctx("b9 g5 W", "r5", 7)), Action::Play(card("g5")));
        }

        // a cross-color stack still beats a wild
        let top = Card::wild_draw_four().with_color(Color::Green);
        let stacked = TurnContext {
            seat: 0,
            hand: parse_cards("W+4 b+2").unwrap(),
            lead: Lead::played(top).with_penalty(4),
            discard_pile: vec![top],
            draw_pile_remaining: 60,
            opponent_hand_counts: BTreeMap::from([(1, 7)]),
            stacking: StackingPolicy::AnyDrawCard,
        };
        for _ in 0..20 {
            assert_eq!(bot.decide(&stacked), Action::Play(card("b+2")));
        }
    }

    #[test]
    fn blunder_plays_first_card_blind() {
        let profile = BotProfile::for_difficulty(Difficulty::Easy).with_seed(1).with_blunder(1.0);
        let mut bot = BotAgent::new(profile);
        assert_eq!(bot.decide(&ctx("g1 r7", "r5", 7)), Action::Play(card("g1")));
    }

    #[test]
    fn seeded_easy_bots_agree() {
        let mk = || {
            BotAgent::new(BotProfile::for_difficulty(Difficulty::Easy).with_seed(99).with_name("E"))
        };
        let (mut a, mut b) = (mk(), mk());
        let c = ctx("r1 r2 r3 r4 b5 W", "r5", 7);
        for _ in 0..10 {
            assert_eq!(a.decide(&c), b.decide(&c));
            assert_eq!(a.choose_color(&c), b.choose_color(&c));
        }
        assert_eq!(a.name(), "E");
    }
}
