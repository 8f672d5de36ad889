//! Core value types shared across the crate

use serde::{Deserialize, Serialize};

/// Continuous observation emitted by the environment at every step.
///
/// Position is nominally in [-1.2, 0.6] and velocity in [-0.07, 0.07],
/// though the discretizer accepts any real values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub position: f64,
    pub velocity: f64,
}

impl Observation {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Discrete state produced by digitizing an observation against the fixed
/// bin boundaries. Serves as the non-action component of Q-table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteState {
    pub position_bin: usize,
    pub velocity_bin: usize,
}

/// Control signal applied to the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PushLeft,
    Coast,
    PushRight,
}

impl Action {
    /// All actions in index order.
    ///
    /// The ordering is significant: greedy selection scans this array and
    /// resolves ties toward the earliest entry.
    pub const ALL: [Action; 3] = [Action::PushLeft, Action::Coast, Action::PushRight];

    /// Size of the action set.
    pub const COUNT: usize = 3;

    /// Stable index of this action (0, 1, or 2).
    pub fn index(self) -> usize {
        match self {
            Action::PushLeft => 0,
            Action::Coast => 1,
            Action::PushRight => 2,
        }
    }

    /// Action for a stable index, if in range.
    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }
}
