//! Greedy evaluation of trained agents
//!
//! Evaluation rolls out the agent's greedy policy: epsilon is ignored, no
//! learning updates are applied, and no randomness is consumed beyond the
//! environment's own start-position draw.

use serde::{Deserialize, Serialize};

use crate::{ports::Environment, q_learning::QLearningAgent, stats};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation episodes
    pub episodes: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { episodes: 100 }
    }
}

/// Result of an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total episodes played
    pub episodes: usize,

    /// Per-episode total reward
    pub rewards: Vec<f64>,

    /// Mean reward across all episodes
    pub mean_reward: f64,

    /// Best (highest) episode reward
    pub best_reward: f64,
}

impl EvaluationResult {
    pub fn new(rewards: Vec<f64>) -> Self {
        let episodes = rewards.len();
        let mean_reward = stats::mean(&rewards);
        let best_reward = if episodes > 0 {
            rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        } else {
            0.0
        };

        Self {
            episodes,
            rewards,
            mean_reward,
            best_reward,
        }
    }
}

/// Roll out the agent's greedy policy for the configured number of episodes.
pub fn evaluate(
    agent: &QLearningAgent,
    env: &mut dyn Environment,
    config: &EvaluationConfig,
) -> EvaluationResult {
    let mut rewards = Vec::with_capacity(config.episodes);

    for _ in 0..config.episodes {
        let mut observation = env.reset();
        let mut total_reward = 0.0;
        loop {
            let action = agent.greedy_action(observation);
            let outcome = env.step(action);
            total_reward += outcome.reward;
            observation = outcome.observation;
            if outcome.done {
                break;
            }
        }
        rewards.push(total_reward);
    }

    EvaluationResult::new(rewards)
}
