//! Serialization support for trained agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::q_learning::agent::{AgentState, QLearningAgent};

/// Provenance recorded alongside a saved agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub episodes_trained: Option<usize>,
    pub seed: Option<u64>,
    pub final_epsilon: Option<f64>,
}

/// On-disk snapshot of a trained agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentState,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            metadata,
        }
    }

    /// Rebuild the agent from this snapshot.
    ///
    /// Rejects unknown format versions, and snapshots whose table grid
    /// disagrees with their discretizer: a mismatch would leave digitized
    /// states without table entries, so it is refused up front instead of
    /// surfacing later as a bad lookup.
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }

        if !self.state.q_table.covers(&self.state.discretizer) {
            return Err(anyhow!(
                "Q-table grid {}x{} does not match discretizer grid {}x{}",
                self.state.q_table.position_bins(),
                self.state.q_table.velocity_bins(),
                self.state.discretizer.position_bins(),
                self.state.discretizer.velocity_bins()
            ));
        }

        Ok(QLearningAgent::from_state(self.state.clone()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        discretizer::Discretizer,
        q_learning::q_table::QTable,
        types::{Action, Observation},
    };

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::new(
            Discretizer::mountain_car(),
            0.1,
            0.99,
            0.5,
            0.001,
            0.01,
        )
        .with_seed(7);
        agent.learn(
            Observation::new(-0.5, 0.0),
            Action::PushLeft,
            -1.0,
            Observation::new(-0.51, -0.001),
        );
        agent
    }

    #[test]
    fn test_roundtrip_preserves_table_and_epsilon() -> Result<()> {
        let agent = trained_agent();
        let saved = SavedAgent::from_agent(
            &agent,
            TrainingMetadata {
                episodes_trained: Some(1),
                seed: Some(7),
                final_epsilon: Some(agent.epsilon()),
            },
        );

        let bytes = rmp_serde::to_vec(&saved)?;
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes)?;
        let restored = loaded.to_agent()?;

        assert_eq!(restored.epsilon(), agent.epsilon());
        assert_eq!(restored.q_table().size(), agent.q_table().size());

        let state = agent.discretizer().discretize(Observation::new(-0.5, 0.0));
        assert_eq!(
            restored.q_table().get(state, Action::PushLeft),
            agent.q_table().get(state, Action::PushLeft)
        );

        Ok(())
    }

    #[test]
    fn test_rejects_unknown_version() {
        let agent = trained_agent();
        let mut saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
        saved.version = 99;
        assert!(saved.to_agent().is_err());
    }

    #[test]
    fn test_rejects_table_grid_mismatch() {
        let agent = trained_agent();
        let coarse = Discretizer::new(vec![-0.5, 0.0], vec![0.0]).unwrap();

        let saved = SavedAgent {
            version: SavedAgent::VERSION,
            state: AgentState {
                q_table: QTable::for_discretizer(&coarse, 0.1, 0.99),
                discretizer: agent.discretizer().clone(),
                epsilon: 0.5,
                initial_epsilon: 1.0,
                epsilon_decay: 0.001,
                min_epsilon: 0.01,
                rng_seed: None,
            },
            metadata: TrainingMetadata::default(),
        };

        assert!(saved.to_agent().is_err());
    }
}
