//! Mountain Car CLI - tabular Q-learning for the classic control task
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning agent on Mountain Car
//! - Evaluating a trained agent with its greedy policy
//! - Exporting learned Q-values and reward curves for analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mountaincar")]
#[command(version, about = "Tabular Q-learning for the Mountain Car control task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(mountaincar::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent against the environment
    Evaluate(mountaincar::cli::commands::evaluate::EvaluateArgs),

    /// Export learned Q-values or reward curves
    Export(mountaincar::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => mountaincar::cli::commands::train::execute(args),
        Commands::Evaluate(args) => mountaincar::cli::commands::evaluate::execute(args),
        Commands::Export(args) => mountaincar::cli::commands::export::execute(args),
    }
}
