//! Training loop for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, Observer},
    q_learning::QLearningAgent,
    stats,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed applied to the agent before the run
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 50_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes completed
    pub episodes: usize,

    /// Per-episode total reward, in episode order
    pub rewards: Vec<f64>,

    /// Mean reward across all episodes
    pub mean_reward: f64,

    /// Best (highest) episode reward
    pub best_reward: f64,

    /// Exploration rate after the final decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    /// Create a new training result from the recorded reward history.
    pub fn new(rewards: Vec<f64>, final_epsilon: f64) -> Self {
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
            final_epsilon,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drive one episode to termination and return its cumulative reward.
///
/// Each step selects under the current ε-greedy policy, advances the
/// environment, and applies the TD update for the observed transition. The
/// greedy lookahead that forms the update target happens inside the agent
/// and is never the action actually taken; the next iteration re-selects
/// from scratch at the new state.
pub fn run_episode(agent: &mut QLearningAgent, env: &mut dyn Environment) -> f64 {
    let mut observation = env.reset();
    let mut total_reward = 0.0;

    loop {
        let action = agent.select_action(observation);
        let outcome = env.step(action);
        agent.learn(observation, action, outcome.reward, outcome.observation);
        total_reward += outcome.reward;
        observation = outcome.observation;
        if outcome.done {
            break;
        }
    }

    total_reward
}

/// Training pipeline for a single agent against an environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and environment.
    ///
    /// Episodes run strictly sequentially: each episode's updates build on
    /// the table state left by the previous one. Epsilon decays once after
    /// every episode, before observers are notified.
    pub fn run(
        &mut self,
        agent: &mut QLearningAgent,
        env: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut rewards = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let reward = run_episode(agent, env);
            rewards.push(reward);
            agent.decay_epsilon();

            for observer in &mut self.observers {
                observer.on_episode_end(episode, reward, agent.epsilon())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(rewards, agent.epsilon()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Discretizer,
        ports::StepOutcome,
        types::{Action, Observation},
    };

    /// Environment that terminates after a fixed number of steps.
    struct CountdownEnv {
        steps_per_episode: usize,
        steps: usize,
    }

    impl CountdownEnv {
        fn new(steps_per_episode: usize) -> Self {
            Self {
                steps_per_episode,
                steps: 0,
            }
        }
    }

    impl Environment for CountdownEnv {
        fn reset(&mut self) -> Observation {
            self.steps = 0;
            Observation::new(-0.5, 0.0)
        }

        fn step(&mut self, _action: Action) -> StepOutcome {
            self.steps += 1;
            StepOutcome {
                observation: Observation::new(-0.5, 0.0),
                reward: -1.0,
                done: self.steps >= self.steps_per_episode,
            }
        }
    }

    fn agent() -> QLearningAgent {
        QLearningAgent::new(Discretizer::mountain_car(), 0.1, 0.99, 1.0, 0.1, 0.01).with_seed(42)
    }

    #[test]
    fn test_episode_reward_is_sum_of_step_rewards() {
        let mut agent = agent();
        let mut env = CountdownEnv::new(7);
        assert_eq!(run_episode(&mut agent, &mut env), -7.0);
    }

    #[test]
    fn test_training_records_one_reward_per_episode() {
        let config = TrainingConfig {
            episodes: 10,
            seed: Some(42),
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = agent();
        let mut env = CountdownEnv::new(3);

        let result = pipeline.run(&mut agent, &mut env).unwrap();

        assert_eq!(result.episodes, 10);
        assert_eq!(result.rewards, vec![-3.0; 10]);
        assert_eq!(result.mean_reward, -3.0);
        assert_eq!(result.best_reward, -3.0);
    }

    #[test]
    fn test_epsilon_decays_once_per_episode() {
        let config = TrainingConfig {
            episodes: 5,
            seed: Some(1),
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = agent();
        let mut env = CountdownEnv::new(1);

        let result = pipeline.run(&mut agent, &mut env).unwrap();

        // 1.0 minus five decay steps of 0.1
        assert!((result.final_epsilon - 0.5).abs() < 1e-12);
        assert_eq!(agent.epsilon(), result.final_epsilon);
    }
}
