//! Observation discretization against fixed bin boundaries
//!
//! The continuous (position, velocity) observation is mapped to a pair of
//! bin indices by digitizing each component against an ordered boundary
//! sequence. The boundary sequences are immutable configuration data built
//! once at startup and shared by reference from then on.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{DiscreteState, Observation},
};

/// Number of position boundaries in the standard Mountain Car grid.
pub const POSITION_BOUNDARIES: usize = 12;

/// Number of velocity boundaries in the standard Mountain Car grid.
pub const VELOCITY_BOUNDARIES: usize = 20;

/// Maps continuous observations to discrete bin pairs.
///
/// Digitization follows the convention that a bin index is the count of
/// boundaries less than or equal to the value: a value below the first
/// boundary maps to bin 0, a value above the last maps to bin
/// `boundary_count`, and a value exactly equal to a boundary falls into the
/// bin above it. Every real input yields a valid bin pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discretizer {
    position_boundaries: Vec<f64>,
    velocity_boundaries: Vec<f64>,
}

impl Discretizer {
    /// Create a discretizer from explicit boundary sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if either sequence is empty or not strictly
    /// increasing.
    pub fn new(position_boundaries: Vec<f64>, velocity_boundaries: Vec<f64>) -> Result<Self> {
        validate_boundaries("position", &position_boundaries)?;
        validate_boundaries("velocity", &velocity_boundaries)?;
        Ok(Self {
            position_boundaries,
            velocity_boundaries,
        })
    }

    /// Standard Mountain Car grid: 12 evenly spaced position boundaries over
    /// [-1.2, 0.6] and 20 velocity boundaries over [-0.07, 0.07].
    pub fn mountain_car() -> Self {
        Self {
            position_boundaries: linspace(-1.2, 0.6, POSITION_BOUNDARIES),
            velocity_boundaries: linspace(-0.07, 0.07, VELOCITY_BOUNDARIES),
        }
    }

    /// Digitize an observation into its bin pair.
    pub fn discretize(&self, observation: Observation) -> DiscreteState {
        DiscreteState {
            position_bin: digitize(observation.position, &self.position_boundaries),
            velocity_bin: digitize(observation.velocity, &self.velocity_boundaries),
        }
    }

    /// Number of position bins the discretizer can produce.
    pub fn position_bins(&self) -> usize {
        self.position_boundaries.len() + 1
    }

    /// Number of velocity bins the discretizer can produce.
    pub fn velocity_bins(&self) -> usize {
        self.velocity_boundaries.len() + 1
    }

    pub fn position_boundaries(&self) -> &[f64] {
        &self.position_boundaries
    }

    pub fn velocity_boundaries(&self) -> &[f64] {
        &self.velocity_boundaries
    }
}

/// Count of boundaries less than or equal to `value`.
fn digitize(value: f64, boundaries: &[f64]) -> usize {
    boundaries.partition_point(|&boundary| boundary <= value)
}

fn validate_boundaries(axis: &'static str, boundaries: &[f64]) -> Result<()> {
    if boundaries.is_empty() {
        return Err(Error::EmptyBoundaries { axis });
    }
    for (index, pair) in boundaries.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(Error::UnsortedBoundaries {
                axis,
                index: index + 1,
            });
        }
    }
    Ok(())
}

/// Evenly spaced values over [start, stop], inclusive of both endpoints.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = (stop - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
