use thiserror::Error;

/// Errors reported by lattice construction and simulation setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsingError {
    /// Parameters, lattice shape, or an initial state were rejected before any work began.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A cooperative stop was requested before the measurement phase finished.
    #[error("run stopped after {completed_sweeps} sweeps")]
    Stopped {
        /// Sweeps (equilibration and measurement) completed before the stop was observed.
        completed_sweeps: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, IsingError>;

pub(crate) fn invalid<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(IsingError::InvalidConfiguration(msg.into()))
}
