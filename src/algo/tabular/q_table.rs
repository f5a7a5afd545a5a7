use std::ops::Index;

use crate::{env::Environment, exploration::greedy_action, Error, Result};

/// A dense action-value table of shape `(n_states, n_actions)`
///
/// Values are stored row-major in a single buffer, so `row(s)` is a contiguous slice of the
/// estimates for every action in state `s`. The table is created zero-filled and only ever
/// mutated one cell at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<f32>,
    n_states: usize,
    n_actions: usize,
}

impl QTable {
    /// Initialize a zero-filled table
    ///
    /// **Errors** if either dimension is zero
    pub fn new(n_states: usize, n_actions: usize) -> Result<Self> {
        if n_states == 0 {
            return Err(Error::config("n_states", 0, "state space must not be empty"));
        }
        if n_actions == 0 {
            return Err(Error::config("n_actions", 0, "action space must not be empty"));
        }
        Ok(Self {
            values: vec![0.0; n_states * n_actions],
            n_states,
            n_actions,
        })
    }

    /// Initialize a zero-filled table sized for the spaces of `env`
    pub fn for_env<E: Environment>(env: &E) -> Result<Self> {
        Self::new(env.observation_space_size(), env.action_space_size())
    }

    /// `(n_states, n_actions)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_states, self.n_actions)
    }

    /// **Errors** if `state` is not a row of the table
    pub(crate) fn check_state(&self, state: usize) -> Result<()> {
        if state < self.n_states {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                kind: "state",
                index: state,
                len: self.n_states,
            })
        }
    }

    fn offset(&self, state: usize, action: usize) -> Result<usize> {
        self.check_state(state)?;
        if action >= self.n_actions {
            return Err(Error::IndexOutOfBounds {
                kind: "action",
                index: action,
                len: self.n_actions,
            });
        }
        Ok(state * self.n_actions + action)
    }

    /// The per-action values for `state`
    pub fn row(&self, state: usize) -> Result<&[f32]> {
        self.check_state(state)?;
        let start = state * self.n_actions;
        Ok(&self.values[start..start + self.n_actions])
    }

    pub fn get(&self, state: usize, action: usize) -> Result<f32> {
        Ok(self.values[self.offset(state, action)?])
    }

    /// Overwrite a single cell
    pub fn set(&mut self, state: usize, action: usize, value: f32) -> Result<()> {
        let i = self.offset(state, action)?;
        self.values[i] = value;
        Ok(())
    }

    /// The best estimate reachable from `state`
    pub fn max_value(&self, state: usize) -> Result<f32> {
        Ok(self
            .row(state)?
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max))
    }

    /// The greedy action for every state, lowest index winning ties
    pub fn greedy_policy(&self) -> Vec<usize> {
        self.rows().map(greedy_action).collect()
    }

    /// Iterate over the rows in state order
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.n_actions)
    }

    /// The raw row-major buffer
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// **Panics** if the state or action is out of bounds, like slice indexing
impl Index<(usize, usize)> for QTable {
    type Output = f32;

    fn index(&self, (state, action): (usize, usize)) -> &Self::Output {
        assert!(
            state < self.n_states && action < self.n_actions,
            "Index ({state}, {action}) out of bounds for table of shape ({}, {})",
            self.n_states,
            self.n_actions,
        );
        &self.values[state * self.n_actions + action]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        for (s, a) in [(1, 1), (1, 2), (16, 4), (7, 3)] {
            let table = QTable::new(s, a).unwrap();
            assert_eq!(table.shape(), (s, a));
            assert_eq!(table.rows().count(), s, "One row per state");
            assert!(table.rows().all(|row| row.len() == a), "One column per action");
            assert!(table.as_slice().iter().all(|&v| v == 0.0), "All zero");
        }
    }

    #[test]
    fn empty_spaces_are_rejected() {
        assert!(matches!(
            QTable::new(0, 4),
            Err(Error::Configuration { name: "n_states", .. })
        ));
        assert!(matches!(
            QTable::new(4, 0),
            Err(Error::Configuration { name: "n_actions", .. })
        ));
    }

    #[test]
    fn set_touches_one_cell() {
        let mut table = QTable::new(3, 2).unwrap();
        table.set(1, 1, 0.5).unwrap();
        assert_eq!(table.get(1, 1).unwrap(), 0.5);
        assert_eq!(table[(1, 1)], 0.5);
        assert_eq!(table.row(1).unwrap(), &[0.0, 0.5]);
        assert_eq!(table.as_slice(), &[0.0, 0.0, 0.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn out_of_bounds_access() {
        let mut table = QTable::new(3, 2).unwrap();
        assert_eq!(
            table.get(3, 0),
            Err(Error::IndexOutOfBounds {
                kind: "state",
                index: 3,
                len: 3
            })
        );
        assert_eq!(
            table.set(0, 2, 1.0),
            Err(Error::IndexOutOfBounds {
                kind: "action",
                index: 2,
                len: 2
            })
        );
        assert!(table.row(5).is_err());
        assert!(table.max_value(5).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_panics_out_of_bounds() {
        let table = QTable::new(2, 2).unwrap();
        let _ = table[(0, 2)];
    }

    #[test]
    fn max_and_greedy_policy() {
        let mut table = QTable::new(3, 3).unwrap();
        table.set(0, 1, 2.0).unwrap();
        table.set(1, 0, -1.0).unwrap();
        table.set(1, 2, -1.0).unwrap();
        table.set(2, 2, 3.0).unwrap();
        table.set(2, 0, 3.0).unwrap();

        assert_eq!(table.max_value(0).unwrap(), 2.0);
        assert_eq!(table.max_value(1).unwrap(), 0.0);
        assert_eq!(table.greedy_policy(), vec![1, 1, 0]);
    }
}
