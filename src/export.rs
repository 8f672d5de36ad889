//! CSV export of learned Q-values and reward curves

use std::path::Path;

use crate::{
    Result,
    error::Error,
    q_learning::QTable,
    stats,
};

/// Write the table as (position_bin, velocity_bin, action, value) records.
pub fn write_q_values<P: AsRef<Path>>(table: &QTable, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["position_bin", "velocity_bin", "action", "value"])?;
    for (state, action, value) in table.entries() {
        writer.write_record(&[
            state.position_bin.to_string(),
            state.velocity_bin.to_string(),
            action.index().to_string(),
            value.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write per-episode rewards alongside their trailing moving average.
pub fn write_reward_curve<P: AsRef<Path>>(rewards: &[f64], window: usize, path: P) -> Result<()> {
    if window == 0 {
        return Err(Error::InvalidConfiguration {
            message: "moving-average window must be positive".to_string(),
        });
    }

    let averages = stats::moving_average(rewards, window);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["episode", "reward", "moving_average"])?;
    for (episode, (reward, average)) in rewards.iter().zip(&averages).enumerate() {
        writer.write_record(&[
            episode.to_string(),
            reward.to_string(),
            average.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
