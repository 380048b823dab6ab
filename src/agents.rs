//! Agents: pluggable players.
//!
//! The engine owns all game state. On its turn an agent receives a
//! [`TurnContext`] copy and answers with an [`Action`]; when it plays a wild
//! the engine asks it separately for the color.

use crate::cards::{Card, Color};
use crate::view::TurnContext;
use std::collections::VecDeque;

/// What an agent does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    /// Play this card from hand.
    Play(Card),
    /// Draw one card (or accept a pending draw penalty) and end the turn.
    Pass,
}

/// Decision interface every player implements.
///
/// `decide` is not called on a turn where the seat faces a draw penalty and
/// holds no card that may stack on it; the engine draws the penalty for the
/// seat directly, since passing is its only legal answer.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose an action for the seat described by `ctx`.
    fn decide(&mut self, ctx: &TurnContext) -> Action;

    /// Color for a wild just played. `None` lets the engine pick at random.
    fn choose_color(&mut self, ctx: &TurnContext) -> Option<Color> {
        ctx.dominant_color()
    }
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// An agent fed from outside (a human front-end, a replay, a test script).
/// Queued actions are used in order; an empty queue passes.
#[derive(Debug, Clone, Default)]
pub struct QueuedAgent {
    name: String,
    pending: VecDeque<Action>,
    colors: VecDeque<Color>,
}

impl QueuedAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), pending: VecDeque::new(), colors: VecDeque::new() }
    }

    /// Queue an action for a later turn.
    pub fn receive(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    /// Queue the color for the next wild this agent plays.
    pub fn receive_color(&mut self, color: Color) {
        self.colors.push_back(color);
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.pending.extend(actions);
        self
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Agent for QueuedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _ctx: &TurnContext) -> Action {
        self.pending.pop_front().unwrap_or(Action::Pass)
    }

    fn choose_color(&mut self, _ctx: &TurnContext) -> Option<Color> {
        self.colors.pop_front()
    }
}
