//! Match orchestration: a fixed number of rounds between the same seats,
//! won by the seat with the most round wins.

use crate::agents::Agent;
use crate::config::{MatchConfig, TieBreak, MAX_PLAYERS, MIN_PLAYERS};
use crate::deck::DECK_SIZE;
use crate::game::{Round, RoundEnd, RoundError};
use core::fmt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchPhase {
    AwaitingRound,
    RoundInProgress,
    MatchComplete,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchError {
    #[error("amount of players (currently: {0}) must be at least 2 and cannot exceed 10")]
    InvalidPlayerCount(usize),
    #[error("cannot deal {hand_size} cards to {players} players from one deck")]
    HandSizeTooLarge { hand_size: usize, players: usize },
    #[error("all rounds of the match have been played")]
    MatchComplete,
    #[error(transparent)]
    Engine(#[from] RoundError),
}

/// Summary of one finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundResult {
    /// 1-based round number.
    pub round: usize,
    pub first_seat: usize,
    pub end: RoundEnd,
    pub turns: usize,
    /// Cards left in each hand when the round ended.
    pub hand_sizes: Vec<usize>,
    /// Points scored by the winner; zero for an abandoned round.
    pub points: u32,
}

impl RoundResult {
    pub fn winner(&self) -> Option<usize> {
        self.end.winner()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct MatchResult {
    pub names: Vec<String>,
    pub rounds: Vec<RoundResult>,
    /// Round wins per seat.
    pub wins: Vec<usize>,
    /// Cumulative points per seat.
    pub points: Vec<u32>,
    pub winner: Option<usize>,
    /// Whether `winner` was chosen among several seats tied on wins.
    pub tie_broken: bool,
}

impl MatchResult {
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.and_then(|w| self.names.get(w)).map(String::as_str)
    }

    pub fn abandoned_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.winner().is_none()).count()
    }
}

/// Round wins per seat.
pub fn tally(results: &[RoundResult], num_players: usize) -> Vec<usize> {
    let mut wins = vec![0; num_players];
    for w in results.iter().filter_map(RoundResult::winner) {
        if let Some(slot) = wins.get_mut(w) {
            *slot += 1;
        }
    }
    wins
}

/// The seat with the most round wins, applying `tie_break` when several
/// share the maximum. Returns `(winner, tie_broken)`; no winner when no
/// round was won.
pub fn decide_winner(
    wins: &[usize],
    results: &[RoundResult],
    tie_break: TieBreak,
) -> (Option<usize>, bool) {
    let best = wins.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return (None, false);
    }
    let tied: Vec<usize> = (0..wins.len()).filter(|&i| wins[i] == best).collect();
    if tied.len() == 1 {
        return (Some(tied[0]), false);
    }
    let winner = match tie_break {
        TieBreak::LowestSeat => tied.first().copied(),
        TieBreak::MostRecentWin => results
            .iter()
            .rev()
            .filter_map(RoundResult::winner)
            .find(|w| tied.contains(w)),
    };
    (winner, true)
}

/// A match between a fixed set of agents. Seat `i` is played by `agents[i]`.
pub struct Match {
    agents: Vec<Box<dyn Agent>>,
    config: MatchConfig,
    rng: ChaCha8Rng,
    results: Vec<RoundResult>,
    phase: MatchPhase,
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("players", &self.names())
            .field("config", &self.config)
            .field("rounds_played", &self.results.len())
            .field("phase", &self.phase)
            .finish()
    }
}

/// Create a match with default rules.
///
/// ```
/// use uno_rs::agents::{Agent, BotAgent, BotProfile};
/// use uno_rs::orchestrator::{new_match, MatchError};
///
/// let one: Vec<Box<dyn Agent>> = vec![Box::new(BotAgent::new(BotProfile::default()))];
/// assert!(matches!(new_match(one, 3), Err(MatchError::InvalidPlayerCount(1))));
/// ```
pub fn new_match(agents: Vec<Box<dyn Agent>>, rounds_per_match: usize) -> Result<Match, MatchError> {
    Match::with_config(agents, MatchConfig::new(rounds_per_match))
}

impl Match {
    pub fn with_config(agents: Vec<Box<dyn Agent>>, config: MatchConfig) -> Result<Self, MatchError> {
        let players = agents.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(MatchError::InvalidPlayerCount(players));
        }
        let hand_size = config.rules.hand_size;
        let needed = players.checked_mul(hand_size).and_then(|n| n.checked_add(1));
        if !needed.is_some_and(|n| n <= DECK_SIZE) {
            return Err(MatchError::HandSizeTooLarge { hand_size, players });
        }
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::rng().random()),
        };
        let phase = if config.rounds_per_match == 0 {
            MatchPhase::MatchComplete
        } else {
            MatchPhase::AwaitingRound
        };
        Ok(Self { agents, config, rng, results: Vec::new(), phase })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn num_players(&self) -> usize {
        self.agents.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn rounds_played(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    /// Play the next round to completion.
    pub fn run_round(&mut self) -> Result<RoundResult, MatchError> {
        if self.results.len() >= self.config.rounds_per_match {
            self.phase = MatchPhase::MatchComplete;
            return Err(MatchError::MatchComplete);
        }
        self.phase = MatchPhase::RoundInProgress;
        let number = self.results.len() + 1;
        let first_seat = (number - 1) % self.agents.len();
        let seed: u64 = self.rng.random();
        info!(round = number, first_seat, "round start");

        let mut round = Round::new(self.agents.len(), first_seat, self.config.rules, seed)?;
        let end = match round.run(&mut self.agents) {
            Ok(end) => end,
            Err(e) => {
                error!(round = number, %e, "round failed");
                self.phase = MatchPhase::AwaitingRound;
                return Err(e.into());
            }
        };

        let result = RoundResult {
            round: number,
            first_seat,
            end,
            turns: round.turns(),
            hand_sizes: round.hand_sizes(),
            points: round.winner_points(),
        };
        self.results.push(result.clone());
        self.phase = if self.results.len() >= self.config.rounds_per_match {
            MatchPhase::MatchComplete
        } else {
            MatchPhase::AwaitingRound
        };
        Ok(result)
    }

    /// Play every remaining round and return the final standings.
    pub fn run_all(&mut self) -> Result<MatchResult, MatchError> {
        while self.results.len() < self.config.rounds_per_match {
            self.run_round()?;
        }
        self.phase = MatchPhase::MatchComplete;
        let result = self.result();
        info!(
            winner = ?result.winner,
            wins = ?result.wins,
            tie_broken = result.tie_broken,
            stacking = self.config.rules.stacking.label(),
            tie_break = self.config.tie_break.label(),
            "match over"
        );
        Ok(result)
    }

    /// Standings over the rounds played so far.
    pub fn result(&self) -> MatchResult {
        let n = self.agents.len();
        let wins = tally(&self.results, n);
        let mut points = vec![0u32; n];
        for r in &self.results {
            if let Some(w) = r.winner() {
                points[w] += r.points;
            }
        }
        let (winner, tie_broken) = decide_winner(&wins, &self.results, self.config.tie_break);
        MatchResult {
            names: self.names(),
            rounds: self.results.clone(),
            wins,
            points,
            winner,
            tie_broken,
        }
    }
}
