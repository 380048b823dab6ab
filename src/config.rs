use crate::rules::StackingPolicy;

pub const INITIAL_HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_MAX_TURNS: usize = 5_000;

/// How a tie at the top of the round-win tally is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TieBreak {
    /// The tied seat with the smallest index wins.
    #[default]
    LowestSeat,
    /// The tied seat whose last round win came latest wins.
    MostRecentWin,
}

impl TieBreak {
    pub fn label(self) -> &'static str {
        match self {
            TieBreak::LowestSeat => "lowest-seat",
            TieBreak::MostRecentWin => "most-recent-win",
        }
    }
}

/// Per-round rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundRules {
    pub hand_size: usize,
    pub stacking: StackingPolicy,
    /// Turns after which an unfinished round is abandoned.
    pub max_turns: usize,
}

impl RoundRules {
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.stacking = stacking;
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            hand_size: INITIAL_HAND_SIZE,
            stacking: StackingPolicy::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Match settings.
///
/// ```
/// use uno_rs::config::{MatchConfig, TieBreak};
/// use uno_rs::rules::StackingPolicy;
///
/// let cfg = MatchConfig::new(5)
///     .with_seed(7)
///     .with_stacking(StackingPolicy::AnyDrawCard)
///     .with_tie_break(TieBreak::MostRecentWin);
/// assert_eq!(cfg.rules.hand_size, 7);
/// assert_eq!(cfg.seed, Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct MatchConfig {
    pub rounds_per_match: usize,
    pub rules: RoundRules,
    pub tie_break: TieBreak,
    pub seed: Option<u64>,
}

impl MatchConfig {
    pub fn new(rounds_per_match: usize) -> Self {
        Self {
            rounds_per_match,
            rules: RoundRules::default(),
            tie_break: TieBreak::default(),
            seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible matches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rules(mut self, rules: RoundRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.rules.stacking = stacking;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.rules.hand_size = hand_size;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_labels() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.rounds_per_match, 1);
        assert_eq!(cfg.rules.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(cfg.tie_break.label(), "lowest-seat");
        assert_eq!(TieBreak::MostRecentWin.label(), "most-recent-win");
    }
}
