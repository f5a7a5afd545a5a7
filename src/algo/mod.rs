pub mod tabular;

pub use tabular::{QLearningAgent, QLearningConfig};
