//! Observer port - abstraction for training observation and reporting
//!
//! Observers can be composed to collect different kinds of feedback during
//! training without coupling the loop to specific output formats. Examples
//! include progress bars and plain-text interval logging.
//!
//! # Event Sequence
//!
//! 1. `on_training_start(total_episodes)` - once at the beginning
//! 2. For each episode:
//!    - `on_episode_start(episode)`
//!    - `on_episode_end(episode, reward, epsilon)`
//! 3. `on_training_end()` - once at the end

use crate::Result;

/// Observer trait for monitoring training.
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after an episode completes.
    ///
    /// `reward` is the episode's cumulative reward; `epsilon` is the
    /// exploration rate after the post-episode decay has been applied.
    fn on_episode_end(&mut self, _episode: usize, _reward: f64, _epsilon: f64) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
