//! Tabular methods over finite, index-addressed state and action spaces

pub mod q_learning;
pub mod q_table;
pub mod update;

pub use q_learning::{evaluate, train, EpisodeReport, QLearningAgent, QLearningConfig, TrainingOutcome};
pub use q_table::QTable;
