use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    env::{Environment, Step},
    Error, Result,
};

/// K-armed bandit environment
///
/// A single-state environment with K arms, each of which pays out from a normal distribution
/// with unit variance. The arm means are drawn from a standard normal at construction. An
/// episode is a fixed number of pulls and always ends by truncation.
pub struct KArmedBandit<const K: usize> {
    arms: [Normal<f32>; K],
    pulls: u32,
    remaining: u32,
}

impl<const K: usize> KArmedBandit<K> {
    /// Initialize a new K-armed bandit environment with `pulls` actions per episode
    pub fn new<R: Rng + ?Sized>(pulls: u32, rng: &mut R) -> Self {
        let arms = std::array::from_fn(|_| {
            let mean = rng.sample::<f32, _>(rand_distr::StandardNormal);
            Normal::new(mean, 1.0).expect("Unit standard deviation is valid")
        });
        Self {
            arms,
            pulls,
            remaining: 0,
        }
    }

    /// The expected payout of each arm
    pub fn means(&self) -> [f32; K] {
        std::array::from_fn(|i| self.arms[i].mean())
    }

    /// The arm with the highest expected payout
    pub fn optimal_arm(&self) -> usize {
        crate::exploration::greedy_action(&self.means())
    }
}

impl<const K: usize> Environment for KArmedBandit<K> {
    type Info = ();

    fn observation_space_size(&self) -> usize {
        1
    }

    fn action_space_size(&self) -> usize {
        K
    }

    fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> (usize, ()) {
        self.remaining = self.pulls;
        (0, ())
    }

    fn step<R: Rng + ?Sized>(&mut self, action: usize, rng: &mut R) -> Result<Step<()>> {
        if self.remaining == 0 {
            return Err(Error::ContractViolation("pull after the episode ended".into()));
        }
        let arm = self.arms.get(action).ok_or(Error::IndexOutOfBounds {
            kind: "action",
            index: action,
            len: K,
        })?;
        self.remaining -= 1;
        Ok(Step {
            next_state: 0,
            reward: arm.sample(rng),
            terminated: false,
            truncated: self.remaining == 0,
            info: (),
        })
    }
}
