#![deny(
    missing_docs,
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

//! `ising_mc` simulates the classical Ising model `H = -J sum_<ij> s_i s_j` on periodic
//! hypercubic lattices (chains, square and cubic lattices, or higher) using single spin flip
//! Metropolis updates, and records energy and magnetization over simulated time.
//!
//! It also offers a few feature gated modules:
//! - parallel runs over a grid of temperatures using the `parallel-sweep` feature.
//! - autocorrelation calculations on recorded observables: use `autocorrelations`.
//! - serialization of lattices, parameters and records using serde with the `serialize` feature.
//!
//! # Basic Example
//! ```
//! use ising_mc::classical::*;
//! use rand::prelude::*;
//!
//! // J = 1, T = 2.0, 100 equilibration sweeps, 1000 measurement sweeps, record every 10.
//! let params = SimulationParams::new(1.0, 2.0, 100, 1000, 10).unwrap();
//!
//! // A 16x16 lattice with random initial spins, using the default system prng.
//! let rng = rand::thread_rng();
//! let mut sim = Simulation::new_random(2, 16, params, rng).unwrap();
//!
//! // Records of (sweep, energy, magnetization).
//! let records = sim.run_collect();
//! assert_eq!(records.len(), 100);
//!
//! let summary = sim.summarize(&records).unwrap();
//! println!("<E> = {}", summary.mean_energy);
//! ```

/// Metropolis monte carlo for classical ising models on lattices.
pub mod classical;
/// Error types.
pub mod error;

pub use error::{IsingError, Result};
