use crate::classical::lattice::checked_num_sites;
use crate::classical::observables::ObservableSummary;
use crate::classical::params::SimulationParams;
use crate::classical::sweep::{ObservableRecord, Simulation};
use crate::error::Result;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Critical temperature of the 2D square lattice model, in units of J / k_B.
pub const CRITICAL_TEMPERATURE_2D: f64 = 2.269;

/// Output of one independent run in a temperature sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TemperatureResult {
    /// Temperature of this run.
    pub temperature: f64,
    /// Records of the measurement phase.
    pub records: Vec<ObservableRecord>,
    /// Averages over `records`, `None` when no records were taken.
    pub summary: Option<ObservableSummary>,
    /// Fraction of accepted flips over the whole run.
    pub acceptance_ratio: f64,
}

/// Run one independent simulation per temperature in parallel.
///
/// Every run gets its own random lattice and its own rng seeded with `seed + index`, so the
/// output only depends on the inputs and not on scheduling. All parameter sets are validated
/// before any run starts. Results are in the order of `temperatures`.
pub fn temperature_sweep(
    template: &SimulationParams,
    dimension: usize,
    side_length: usize,
    temperatures: &[f64],
    seed: u64,
) -> Result<Vec<TemperatureResult>> {
    checked_num_sites(dimension, side_length)?;
    let param_sets = temperatures
        .iter()
        .map(|t| template.with_temperature(*t).validated())
        .collect::<Result<Vec<_>>>()?;

    param_sets
        .into_par_iter()
        .enumerate()
        .map(|(i, params)| -> Result<TemperatureResult> {
            debug!("temperature sweep: run {} at T={}", i, params.temperature());
            let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut sim = Simulation::new_random(dimension, side_length, params, rng)?;
            let records = sim.run_collect();
            let summary = if records.is_empty() {
                None
            } else {
                Some(sim.summarize(&records)?)
            };
            Ok(TemperatureResult {
                temperature: params.temperature(),
                records,
                summary,
                acceptance_ratio: sim.acceptance_ratio(),
            })
        })
        .collect()
}

/// `num` evenly spaced values from `start`, optionally including `stop`.
fn linspace(start: f64, stop: f64, num: usize, endpoint: bool) -> Vec<f64> {
    let div = if endpoint { num.saturating_sub(1) } else { num };
    if div == 0 {
        return if num == 0 { vec![] } else { vec![start] };
    }
    let step = (stop - start) / div as f64;
    (0..num).map(|i| start + step * i as f64).collect()
}

/// A grid from `t_min` to `t_max` that is denser around [`CRITICAL_TEMPERATURE_2D`].
///
/// Half the points lie below `0.9 Tc`, a quarter in `[0.9 Tc, 1.1 Tc)`, and a quarter from
/// `1.1 Tc` up to and including `t_max`.
pub fn critical_temperature_grid(t_min: f64, t_max: f64, num_points: usize) -> Vec<f64> {
    let low = 0.9 * CRITICAL_TEMPERATURE_2D;
    let high = 1.1 * CRITICAL_TEMPERATURE_2D;
    let mut grid = linspace(t_min, low, num_points / 2, false);
    grid.extend(linspace(low, high, num_points / 4, false));
    grid.extend(linspace(high, t_max, num_points / 4, true));
    grid
}
