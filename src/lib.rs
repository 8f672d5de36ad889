//! Tabular Q-learning for the Mountain Car control task
//!
//! This crate provides:
//! - A discretizer that bins the continuous (position, velocity) observation
//! - A dense action-value table covering the full discretized grid
//! - An ε-greedy Q-learning agent with per-episode exploration decay
//! - The Mountain Car environment behind a reusable `Environment` port
//! - A training pipeline with composable observers and CSV/JSON exports

pub mod cli;
pub mod discretizer;
pub mod env;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod stats;
pub mod types;

pub use discretizer::Discretizer;
pub use env::MountainCar;
pub use error::{Error, Result};
pub use ports::{Environment, Observer, StepOutcome};
pub use q_learning::{QLearningAgent, QTable, SavedAgent, TrainingMetadata};
pub use types::{Action, DiscreteState, Observation};
