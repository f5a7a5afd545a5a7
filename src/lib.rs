/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

pub use algo::tabular::{evaluate, train, QTable, TrainingOutcome};
pub use error::{Error, Result};
