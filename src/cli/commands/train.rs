//! Train command - run tabular Q-learning on Mountain Car

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;

use crate::{
    discretizer::Discretizer,
    env::{DEFAULT_MAX_STEPS, MountainCar},
    export,
    pipeline::{IntervalLogObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    q_learning::{QLearningAgent, SavedAgent, TrainingMetadata},
    stats,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 50_000)]
    pub episodes: usize,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.99)]
    pub gamma: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 1.0)]
    pub epsilon: f64,

    /// Subtractive epsilon decay per episode (defaults to 2/episodes)
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,

    /// Per-episode step cap enforced by the environment
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent snapshot
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Resume from a previously saved agent instead of starting fresh
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Optional path for the training result JSON (includes reward history)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Optional path for a reward-curve CSV (episode, reward, moving average)
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Moving-average window for the reward curve
    #[arg(long, default_value_t = 50)]
    pub window: usize,

    /// Episodes between plain-text progress lines
    #[arg(long, default_value_t = 100)]
    pub report_interval: usize,

    /// Show a progress bar instead of plain-text progress lines
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    ensure!(args.window > 0, "--window must be positive");
    ensure!(args.report_interval > 0, "--report-interval must be positive");

    let epsilon_decay = args
        .epsilon_decay
        .unwrap_or(2.0 / args.episodes.max(1) as f64);

    let mut prior_episodes = 0;
    let mut agent = if let Some(ref resume_path) = args.resume {
        println!("Resuming from: {}", resume_path.display());
        let saved = SavedAgent::load_from_file(resume_path)?;
        let agent = saved.to_agent()?;
        if let Some(episodes) = saved.metadata.episodes_trained {
            prior_episodes = episodes;
            println!("  Episodes previously trained: {episodes}");
        }
        println!("  Current epsilon: {:.3}", agent.epsilon());
        agent
    } else {
        QLearningAgent::new(
            Discretizer::mountain_car(),
            args.alpha,
            args.gamma,
            args.epsilon,
            epsilon_decay,
            args.min_epsilon,
        )
    };

    let mut env = MountainCar::new(args.max_steps);
    if let Some(seed) = args.seed {
        env = env.with_seed(seed.wrapping_add(1));
    }

    let config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
    };

    let mut pipeline = TrainingPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    } else {
        pipeline = pipeline.with_observer(Box::new(IntervalLogObserver::new(args.report_interval)));
    }

    let result = pipeline.run(&mut agent, &mut env)?;

    println!("\n=== Training Complete ===");
    println!("Episodes: {}", result.episodes);
    println!("Mean reward: {:.1}", result.mean_reward);
    println!("Best reward: {:.1}", result.best_reward);
    let curve = stats::moving_average(&result.rewards, args.window);
    if let Some(&trailing) = curve.last() {
        println!(
            "Trailing mean (last {} episodes): {trailing:.1}",
            args.window
        );
    }
    println!("Final epsilon: {:.3}", result.final_epsilon);

    if let Some(ref history_path) = args.history {
        result.save(history_path)?;
        println!("\nReward history written to {}", history_path.display());
    }

    if let Some(ref curve_path) = args.curve {
        export::write_reward_curve(&result.rewards, args.window, curve_path)?;
        println!("Reward curve written to {}", curve_path.display());
    }

    if let Some(ref output_path) = args.output {
        let metadata = TrainingMetadata {
            episodes_trained: Some(prior_episodes + result.episodes),
            seed: args.seed,
            final_epsilon: Some(result.final_epsilon),
        };
        let saved = SavedAgent::from_agent(&agent, metadata);
        saved.save_to_file(output_path)?;
        println!("\n✓ Agent saved to: {}", output_path.display());
        println!("  Stored Q-values: {}", agent.q_table().size());
    }

    Ok(())
}
