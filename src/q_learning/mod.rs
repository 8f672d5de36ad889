//! Q-learning over a discretized state space
//!
//! This module implements tabular off-policy temporal difference control.
//! The agent bins continuous observations, keeps a dense table of action
//! values over the full bin grid, and updates it online with the one-step
//! Q-learning rule:
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! ## Usage Example
//!
//! ```no_run
//! use mountaincar::{Discretizer, QLearningAgent};
//!
//! let agent = QLearningAgent::new(
//!     Discretizer::mountain_car(),
//!     0.1,      // learning_rate
//!     0.99,     // discount_factor
//!     1.0,      // epsilon (exploration)
//!     2.0 / 50_000.0, // epsilon_decay per episode
//!     0.01,     // min_epsilon
//! );
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};
