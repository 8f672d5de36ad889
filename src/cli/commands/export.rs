//! Export command - dump learned Q-values or reward curves as CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{export, pipeline::TrainingResult, q_learning::SavedAgent};

#[derive(Parser, Debug)]
#[command(about = "Export data in CSV format")]
pub struct ExportArgs {
    /// Type of data to export
    #[arg(value_enum)]
    pub data_type: DataType,

    /// Input source
    /// - For q-values: path to an agent snapshot
    /// - For reward-curve: path to a training result JSON
    pub source: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Moving-average window for reward-curve export
    #[arg(long, default_value_t = 50)]
    pub window: usize,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DataType {
    /// Learned Q-values as (position_bin, velocity_bin, action, value) records
    QValues,
    /// Per-episode rewards with their trailing moving average
    RewardCurve,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    match args.data_type {
        DataType::QValues => {
            let saved = SavedAgent::load_from_file(&args.source)?;
            let agent = saved.to_agent()?;
            export::write_q_values(agent.q_table(), &args.output)?;
            println!(
                "✓ Exported {} Q-values to {}",
                agent.q_table().size(),
                args.output.display()
            );
        }
        DataType::RewardCurve => {
            let result = TrainingResult::load(&args.source)?;
            export::write_reward_curve(&result.rewards, args.window, &args.output)?;
            println!(
                "✓ Exported {} episodes to {}",
                result.episodes,
                args.output.display()
            );
        }
    }

    Ok(())
}
