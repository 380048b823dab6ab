//! Bot-only match simulator.

use clap::{Parser, ValueEnum};
use std::time::Instant;
use tracing::info;
use uno_rs::agents::{Agent, BotAgent, BotProfile, Difficulty};
use uno_rs::config::{MatchConfig, TieBreak, INITIAL_HAND_SIZE};
use uno_rs::orchestrator::Match;
use uno_rs::rules::StackingPolicy;

#[derive(Parser)]
#[command(name = "uno-rs")]
#[command(about = "Play a match of Uno-style rounds between bots", version)]
struct Args {
    /// Bot difficulty per seat, comma separated
    #[arg(long, value_delimiter = ',', default_value = "medium,medium")]
    bots: Vec<BotKind>,

    /// Rounds in the match
    #[arg(short, long, default_value_t = 1)]
    rounds: usize,

    /// Match seed; bots are seeded from it too
    #[arg(long)]
    seed: Option<u64>,

    /// Which draw cards may be stacked on a pending penalty
    #[arg(long, default_value = "same-color")]
    stacking: Stacking,

    /// How to pick a winner among seats tied on round wins
    #[arg(long, default_value = "lowest-seat")]
    tie_break: TieRule,

    /// Cards dealt to each seat
    #[arg(long, default_value_t = INITIAL_HAND_SIZE)]
    hand_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log round progress
    #[arg(long)]
    show_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotKind {
    Easy,
    Medium,
    Hard,
}

impl From<BotKind> for Difficulty {
    fn from(kind: BotKind) -> Self {
        match kind {
            BotKind::Easy => Difficulty::Easy,
            BotKind::Medium => Difficulty::Medium,
            BotKind::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Stacking {
    None,
    SameColor,
    AnyDraw,
}

impl From<Stacking> for StackingPolicy {
    fn from(s: Stacking) -> Self {
        match s {
            Stacking::None => StackingPolicy::None,
            Stacking::SameColor => StackingPolicy::SameColorOnly,
            Stacking::AnyDraw => StackingPolicy::AnyDrawCard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieRule {
    LowestSeat,
    MostRecentWin,
}

impl From<TieRule> for TieBreak {
    fn from(t: TieRule) -> Self {
        match t {
            TieRule::LowestSeat => TieBreak::LowestSeat,
            TieRule::MostRecentWin => TieBreak::MostRecentWin,
        }
    }
}

fn build_agents(kinds: &[BotKind], seed: Option<u64>) -> Vec<Box<dyn Agent>> {
    kinds
        .iter()
        .enumerate()
        .map(|(seat, &kind)| {
            let difficulty = Difficulty::from(kind);
            let mut profile = BotProfile::for_difficulty(difficulty)
                .with_name(format!("{} #{seat}", difficulty.label()));
            if let Some(s) = seed {
                profile = profile.with_seed(s.wrapping_add(seat as u64 + 1));
            }
            Box::new(BotAgent::new(profile)) as Box<dyn Agent>
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = MatchConfig::new(args.rounds)
        .with_stacking(args.stacking.into())
        .with_tie_break(args.tie_break.into())
        .with_hand_size(args.hand_size);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let agents = build_agents(&args.bots, args.seed);
    let mut game = Match::with_config(agents, config)?;
    info!(players = game.num_players(), rounds = args.rounds, "starting match");

    println!(
        "{} rounds, stacking {}, tie-break {}\n",
        args.rounds,
        game.config().rules.stacking.label(),
        game.config().tie_break.label()
    );

    let started = Instant::now();
    let result = game.run_all()?;
    let elapsed = started.elapsed();

    for r in &result.rounds {
        match r.winner() {
            Some(w) => println!(
                "round {:>3}: {} wins in {} turns (+{} pts)",
                r.round, result.names[w], r.turns, r.points
            ),
            None => println!("round {:>3}: abandoned after {} turns", r.round, r.turns),
        }
    }
    println!();
    for (seat, name) in result.names.iter().enumerate() {
        println!(
            "{:<12} wins {:>3}  points {:>5}",
            name, result.wins[seat], result.points[seat]
        );
    }
    match result.winner_name() {
        Some(name) if result.tie_broken => println!("\nmatch winner: {name} (tie-break)"),
        Some(name) => println!("\nmatch winner: {name}"),
        None => println!("\nno round was won"),
    }
    info!(?elapsed, "done");
    Ok(())
}
