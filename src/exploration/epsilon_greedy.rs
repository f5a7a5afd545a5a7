use crate::{decay::Decay, ensure_interval, Result};

/// Epsilon greedy exploration policy with an episode-indexed epsilon schedule
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Exploration probability for the given episode
    ///
    /// **Errors** if the schedule yields a value outside of `[0,1]`
    pub fn epsilon(&self, episode: u32) -> Result<f32> {
        let epsilon = self.epsilon.evaluate(episode);
        ensure_interval!(epsilon, 0.0, 1.0);
        Ok(epsilon)
    }
}
