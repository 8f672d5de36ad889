//! Evaluate command - greedy rollouts of a trained agent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    env::{DEFAULT_MAX_STEPS, MountainCar},
    pipeline::{EvaluationConfig, evaluate},
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent")]
pub struct EvaluateArgs {
    /// Path to a trained agent snapshot
    pub agent: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Per-episode step cap
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Random seed for the environment's start positions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading trained agent from: {}", args.agent.display());
    let saved = SavedAgent::load_from_file(&args.agent)?;
    let agent = saved.to_agent()?;

    println!("\n=== Loaded Agent Info ===");
    if let Some(episodes) = saved.metadata.episodes_trained {
        println!("Episodes trained: {episodes}");
    }
    if let Some(seed) = saved.metadata.seed {
        println!("Training seed: {seed}");
    }
    if let Some(epsilon) = saved.metadata.final_epsilon {
        println!("Final training epsilon: {epsilon:.3}");
    }

    let mut env = MountainCar::new(args.max_steps);
    if let Some(seed) = args.seed {
        env = env.with_seed(seed);
    }

    let config = EvaluationConfig {
        episodes: args.episodes,
    };
    let result = evaluate(&agent, &mut env, &config);

    // Episodes shorter than the cap terminated at the goal
    let solved = result
        .rewards
        .iter()
        .filter(|&&reward| reward > -(args.max_steps as f64))
        .count();

    println!("\n=== Evaluation Results ===");
    println!("Episodes: {}", result.episodes);
    println!("Mean reward: {:.1}", result.mean_reward);
    println!("Best reward: {:.1}", result.best_reward);
    println!("Episodes reaching the goal: {solved}/{}", result.episodes);

    if let Some(ref export_path) = args.export {
        let file = std::fs::File::create(export_path)?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nResults written to {}", export_path.display());
    }

    Ok(())
}
