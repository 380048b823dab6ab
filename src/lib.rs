//! uno-rs: Uno-style shedding game engine
//!
//! Goals:
//! - Rules engine that owns all game state; agents only see a [`view::TurnContext`]
//! - Reproducible play: every shuffle and random choice flows from a seed
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a seeded match between bots
//! ```
//! use uno_rs::agents::{Agent, BotAgent, BotProfile, Difficulty};
//! use uno_rs::config::MatchConfig;
//! use uno_rs::orchestrator::Match;
//!
//! let agents: Vec<Box<dyn Agent>> = [Difficulty::Easy, Difficulty::Hard]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, d)| {
//!         let profile = BotProfile::for_difficulty(d).with_seed(i as u64);
//!         Box::new(BotAgent::new(profile)) as Box<dyn Agent>
//!     })
//!     .collect();
//!
//! let mut m = Match::with_config(agents, MatchConfig::new(3).with_seed(42)).unwrap();
//! let result = m.run_all().unwrap();
//! assert_eq!(result.rounds.len(), 3);
//! ```
//!
//! ## Simulator
//! Run a bot-only match from the command line with:
//! ```sh
//! cargo run --bin uno-rs -- --bots easy,medium,hard --rounds 10 --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod game;
pub mod orchestrator;
pub mod order;
pub mod rules;
pub mod view;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
