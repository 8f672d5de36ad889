//! Observers for training pipelines
//!
//! Observers allow composable progress reporting during training without
//! coupling the loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, ports::Observer};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, reward: f64, epsilon: f64) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("score {reward:.0} eps {epsilon:.3}"));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
        Ok(())
    }
}

/// Interval logger - prints a plain-text progress line
///
/// Every `interval` episodes (skipping the first) a line of the form
/// `episode 100 score -1000 epsilon 0.996` goes to stdout. The format is
/// informational only and not machine-parsed.
pub struct IntervalLogObserver {
    interval: usize,
}

impl IntervalLogObserver {
    pub fn new(interval: usize) -> Self {
        assert!(interval > 0, "log interval must be a positive integer");
        Self { interval }
    }
}

impl Observer for IntervalLogObserver {
    fn on_episode_end(&mut self, episode: usize, reward: f64, epsilon: f64) -> Result<()> {
        if episode > 0 && episode.is_multiple_of(self.interval) {
            println!("episode {episode} score {reward} epsilon {epsilon:.3}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_lifecycle() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(10).unwrap();
        observer.on_episode_end(0, -3.0, 0.9).unwrap();
        observer.on_training_end().unwrap();
    }

    #[test]
    #[should_panic(expected = "log interval")]
    fn test_interval_logger_rejects_zero_interval() {
        IntervalLogObserver::new(0);
    }
}
