use rand::Rng;

use crate::{algo::tabular::QTable, ensure_interval, Result};

mod epsilon_greedy;

pub use epsilon_greedy::EpsilonGreedy;

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

impl Choice {
    /// Draw one uniform sample in `[0,1)` and explore if it falls strictly below `epsilon`
    pub(crate) fn draw<R: Rng + ?Sized>(epsilon: f32, rng: &mut R) -> Self {
        if rng.gen::<f32>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

/// Select an action for `state` epsilon-greedily from the values in `table`
///
/// With probability `epsilon` the action is uniform over `[0, n_actions)`, otherwise it is
/// the [greedy action](greedy_action) for the state. Pass `epsilon = 0.0` for pure greedy
/// behavior, e.g. when evaluating a trained table.
///
/// **Errors** if `epsilon` is not in `[0,1]` or `state` is outside the table
pub fn select_action<R: Rng + ?Sized>(
    state: usize,
    table: &QTable,
    epsilon: f32,
    rng: &mut R,
) -> Result<usize> {
    ensure_interval!(epsilon, 0.0, 1.0);
    let values = table.row(state)?;
    let action = match Choice::draw(epsilon, rng) {
        Choice::Explore => rng.gen_range(0..values.len()),
        Choice::Exploit => greedy_action(values),
    };
    Ok(action)
}

/// Index of the maximum value, the lowest index winning ties
///
/// Returns 0 for an empty slice.
pub fn greedy_action(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, max), (i, &v)| {
            if v > max {
                (i, v)
            } else {
                (best, max)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn table() -> QTable {
        let mut table = QTable::new(2, 3).unwrap();
        table.set(0, 2, 1.0).unwrap();
        table.set(1, 0, -1.0).unwrap();
        table
    }

    #[test]
    fn greedy_action_first_max() {
        assert_eq!(greedy_action(&[0.0, 1.0, 1.0]), 1, "Ties go to the first maximum");
        assert_eq!(greedy_action(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(greedy_action(&[-3.0, -2.0, -5.0]), 1);
        assert_eq!(greedy_action(&[]), 0);
    }

    #[test]
    fn draw_extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(Choice::draw(1.0, &mut rng), Choice::Explore);
            assert_eq!(Choice::draw(0.0, &mut rng), Choice::Exploit);
        }
    }

    #[test]
    fn draw_explores_at_rate_epsilon() {
        let mut rng = StdRng::seed_from_u64(3);
        let explored = (0..10_000)
            .filter(|_| Choice::draw(0.25, &mut rng) == Choice::Explore)
            .count();
        assert!((2_250..2_750).contains(&explored), "Explored {explored} times");
    }

    #[test]
    fn greedy_selection_is_idempotent() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(select_action(0, &table, 0.0, &mut rng).unwrap(), 2);
            assert_eq!(select_action(1, &table, 0.0, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn full_exploration_covers_actions() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[select_action(0, &table, 1.0, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3], "Every action is drawn when exploring");
    }

    #[test]
    fn select_action_rejects_bad_input() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_action(0, &table, 1.01, &mut rng).is_err());
        assert!(select_action(0, &table, -0.5, &mut rng).is_err());
        assert!(select_action(0, &table, f32::NAN, &mut rng).is_err());
        assert!(select_action(2, &table, 0.0, &mut rng).is_err());
    }
}
