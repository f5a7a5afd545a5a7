use thiserror::Error;

/// Errors raised while configuring or running a training loop
///
/// None of these are recoverable within a run: the caller gets the error and the
/// partially trained table is dropped.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The environment was driven outside of its contract, e.g. stepped after it terminated
    #[error("environment contract violated: {0}")]
    ContractViolation(String),

    /// A hyperparameter is outside of its valid range
    #[error("invalid value {value} for `{name}`: {reason}")]
    Configuration {
        name: &'static str,
        value: f64,
        reason: String,
    },

    /// A state or action does not fit the table dimensions
    #[error("{kind} index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

impl Error {
    pub(crate) fn config(name: &'static str, value: impl Into<f64>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
