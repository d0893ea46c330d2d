//! Single spin flip Metropolis simulation of the classical Ising model on periodic hypercubic
//! lattices of any dimension.

pub use energy::{flip_delta_energy, total_energy, total_magnetization};
pub use lattice::{Coords, Direction, Lattice};
pub use metropolis::{metropolis_step, should_flip, StepOutcome};
pub use observables::ObservableSummary;
pub use params::SimulationParams;
pub use sweep::{MagnetizationConvention, ObservableRecord, ObservableSink, Simulation};

/// Lattice storage and periodic neighbor lookup.
pub mod lattice;

/// Flip energy deltas and lattice totals.
pub mod energy;

/// The Metropolis accept/reject step.
pub mod metropolis;

/// Run parameters.
pub mod params;

/// Sweeps, the equilibration/measurement protocol, and observable records.
pub mod sweep;

/// Averages and fluctuations of recorded observables.
pub mod observables;

/// Autocorrelations of recorded observables.
#[cfg(feature = "autocorrelations")]
pub mod autocorrelations;

/// Independent runs over a range of temperatures, in parallel.
#[cfg(feature = "parallel-sweep")]
pub mod temperature_sweep;

#[cfg(feature = "autocorrelations")]
pub use autocorrelations::*;
#[cfg(feature = "parallel-sweep")]
pub use temperature_sweep::*;
