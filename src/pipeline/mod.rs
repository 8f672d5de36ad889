//! Training and evaluation pipelines
//!
//! This module provides:
//! - The episode runner and training loop driving the agent against an
//!   environment
//! - Greedy evaluation of trained agents
//! - Composable observers for progress reporting

pub mod evaluation;
pub mod observers;
pub mod trainer;

pub use evaluation::{EvaluationConfig, EvaluationResult, evaluate};
// Re-export observer implementations (adapters)
pub use observers::{IntervalLogObserver, ProgressObserver};
pub use trainer::{TrainingConfig, TrainingPipeline, TrainingResult, run_episode};

pub use crate::ports::Observer;
