//! Q-table implementation for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    discretizer::Discretizer,
    types::{Action, DiscreteState},
};

/// Q-table mapping (discrete state, action) pairs to Q-values.
///
/// Storage is a dense array sized from the discretizer's bin counts, so
/// every state the discretizer can produce has a zero-initialized entry
/// from construction onward. The table is never resized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// Flattened Q-values, indexed by (position_bin, velocity_bin, action)
    values: Vec<f64>,
    position_bins: usize,
    velocity_bins: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-filled table covering the discretizer's full output
    /// grid crossed with the action set.
    pub fn for_discretizer(
        discretizer: &Discretizer,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Self {
        let position_bins = discretizer.position_bins();
        let velocity_bins = discretizer.velocity_bins();
        Self {
            values: vec![0.0; position_bins * velocity_bins * Action::COUNT],
            position_bins,
            velocity_bins,
            learning_rate,
            discount_factor,
        }
    }

    fn offset(&self, state: DiscreteState, action: Action) -> usize {
        (state.position_bin * self.velocity_bins + state.velocity_bin) * Action::COUNT
            + action.index()
    }

    /// Get the Q-value for a state-action pair.
    pub fn get(&self, state: DiscreteState, action: Action) -> f64 {
        self.values[self.offset(state, action)]
    }

    /// Set the Q-value for a state-action pair.
    pub fn set(&mut self, state: DiscreteState, action: Action, value: f64) {
        let offset = self.offset(state, action);
        self.values[offset] = value;
    }

    /// Greedy action for a state.
    ///
    /// Ties resolve to the lowest-indexed action: the scan only replaces
    /// the incumbent on a strictly greater value. With a freshly
    /// initialized table every state therefore selects `Action::ALL[0]`.
    pub fn greedy_action(&self, state: DiscreteState) -> Action {
        let mut best = Action::ALL[0];
        let mut best_q = self.get(state, best);
        for &action in &Action::ALL[1..] {
            let q = self.get(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }

    /// Highest Q-value over the action set in a state.
    pub fn max_q(&self, state: DiscreteState) -> f64 {
        self.get(state, self.greedy_action(state))
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is taken from the greedy action at `next_state`
    /// on every transition, including the terminal one.
    pub fn update(
        &mut self,
        state: DiscreteState,
        action: Action,
        reward: f64,
        next_state: DiscreteState,
    ) {
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * self.max_q(next_state);
        let td_error = td_target - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Number of position bins the table covers.
    pub fn position_bins(&self) -> usize {
        self.position_bins
    }

    /// Number of velocity bins the table covers.
    pub fn velocity_bins(&self) -> usize {
        self.velocity_bins
    }

    /// Total number of stored Q-values.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether the table covers every state the discretizer can produce.
    pub fn covers(&self, discretizer: &Discretizer) -> bool {
        self.position_bins == discretizer.position_bins()
            && self.velocity_bins == discretizer.velocity_bins()
    }

    /// Iterate over every (state, action, value) triple in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (DiscreteState, Action, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| {
            let flat_state = i / Action::COUNT;
            let state = DiscreteState {
                position_bin: flat_state / self.velocity_bins,
                velocity_bin: flat_state % self.velocity_bins,
            };
            (state, Action::ALL[i % Action::COUNT], value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QTable {
        QTable::for_discretizer(&Discretizer::mountain_car(), 0.1, 0.99)
    }

    fn state(position_bin: usize, velocity_bin: usize) -> DiscreteState {
        DiscreteState {
            position_bin,
            velocity_bin,
        }
    }

    #[test]
    fn test_initialization_covers_full_grid_with_zeros() {
        let qtable = table();
        assert_eq!(qtable.size(), 13 * 21 * 3);
        for position_bin in 0..qtable.position_bins() {
            for velocity_bin in 0..qtable.velocity_bins() {
                for action in Action::ALL {
                    assert_eq!(qtable.get(state(position_bin, velocity_bin), action), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_set_get() {
        let mut qtable = table();
        qtable.set(state(4, 7), Action::PushRight, 1.5);
        assert_eq!(qtable.get(state(4, 7), Action::PushRight), 1.5);
        assert_eq!(qtable.get(state(4, 7), Action::Coast), 0.0);
    }

    #[test]
    fn test_greedy_action_tie_breaks_to_lowest_index() {
        let qtable = table();
        for _ in 0..5 {
            assert_eq!(qtable.greedy_action(state(3, 3)), Action::PushLeft);
        }

        let mut qtable = table();
        qtable.set(state(3, 3), Action::Coast, 2.0);
        qtable.set(state(3, 3), Action::PushRight, 2.0);
        assert_eq!(qtable.greedy_action(state(3, 3)), Action::Coast);
    }

    #[test]
    fn test_greedy_action_prefers_highest_value() {
        let mut qtable = table();
        qtable.set(state(5, 5), Action::PushLeft, 0.5);
        qtable.set(state(5, 5), Action::Coast, 1.5);
        qtable.set(state(5, 5), Action::PushRight, 0.8);
        assert_eq!(qtable.greedy_action(state(5, 5)), Action::Coast);
        assert_eq!(qtable.max_q(state(5, 5)), 1.5);
    }

    #[test]
    fn test_update_from_zero_table() {
        let mut qtable = table();

        // Q(s,a) = 0.0 + 0.1 * (-1.0 + 0.99 * 0.0 - 0.0) = -0.1
        qtable.update(state(2, 2), Action::PushLeft, -1.0, state(2, 3));
        assert!((qtable.get(state(2, 2), Action::PushLeft) - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_update_bootstraps_from_greedy_next_value() {
        let mut qtable = table();
        qtable.set(state(2, 3), Action::Coast, 1.0);
        qtable.set(state(2, 3), Action::PushRight, 2.0);

        // Q(s,a) = 0.0 + 0.1 * (0.0 + 0.99 * 2.0 - 0.0) = 0.198
        qtable.update(state(2, 2), Action::PushLeft, 0.0, state(2, 3));
        assert!((qtable.get(state(2, 2), Action::PushLeft) - 0.198).abs() < 1e-12);
    }

    #[test]
    fn test_entries_enumerate_every_pair_once() {
        let mut qtable = table();
        qtable.set(state(1, 2), Action::Coast, 0.25);

        let entries: Vec<_> = qtable.entries().collect();
        assert_eq!(entries.len(), qtable.size());

        let nonzero: Vec<_> = entries.iter().filter(|(_, _, v)| *v != 0.0).collect();
        assert_eq!(nonzero.len(), 1);
        let (entry_state, entry_action, entry_value) = nonzero[0];
        assert_eq!(*entry_state, state(1, 2));
        assert_eq!(*entry_action, Action::Coast);
        assert_eq!(*entry_value, 0.25);
    }
}
