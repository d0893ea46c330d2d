use crate::classical::lattice::Lattice;
use crate::classical::metropolis::{metropolis_step, StepOutcome};
use crate::classical::observables::ObservableSummary;
use crate::classical::params::SimulationParams;
use crate::error::{invalid, IsingError, Result};
use log::{debug, trace, warn};
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// How magnetization is reported in an [`ObservableRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MagnetizationConvention {
    /// Raw sum of spins.
    Total,
    /// Sum of spins divided by the number of sites.
    PerSite,
}

impl Default for MagnetizationConvention {
    fn default() -> Self {
        MagnetizationConvention::Total
    }
}

/// Observables taken after a measurement sweep. Field order matches `sweep,energy,magnetization`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ObservableRecord {
    /// Index of the measurement sweep, starting at 0.
    pub sweep: usize,
    /// Total energy.
    pub energy: f64,
    /// Magnetization in the run's [`MagnetizationConvention`].
    pub magnetization: f64,
}

/// Consumer of records emitted by a run, in increasing sweep order.
pub trait ObservableSink {
    /// Accept one record.
    fn record(&mut self, record: ObservableRecord);
}

impl ObservableSink for Vec<ObservableRecord> {
    fn record(&mut self, record: ObservableRecord) {
        self.push(record)
    }
}

impl<F> ObservableSink for F
where
    F: FnMut(ObservableRecord),
{
    fn record(&mut self, record: ObservableRecord) {
        self(record)
    }
}

/// A single Metropolis run: one lattice, one rng stream, and fixed parameters.
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng> {
    lattice: Lattice,
    params: SimulationParams,
    convention: MagnetizationConvention,
    rng: R,
    attempted: u64,
    accepted: u64,
}

impl<R: Rng> Simulation<R> {
    /// Make a run from an existing lattice. Fails if the parameters are invalid.
    pub fn new(lattice: Lattice, params: SimulationParams, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            lattice,
            params,
            convention: MagnetizationConvention::default(),
            rng,
            attempted: 0,
            accepted: 0,
        })
    }

    /// Make a run on a randomly initialized lattice drawn from `rng`.
    pub fn new_random(
        dimension: usize,
        side_length: usize,
        params: SimulationParams,
        mut rng: R,
    ) -> Result<Self> {
        params.validate()?;
        let lattice = Lattice::new_random(dimension, side_length, &mut rng)?;
        Self::new(lattice, params, rng)
    }

    /// Choose how records report magnetization.
    pub fn with_magnetization_convention(mut self, convention: MagnetizationConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Read-only access to the current lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Give up the run and keep the lattice.
    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    /// The parameters of this run.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Mutable access to the rng, for callers drawing from the same stream.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Number of single spin flip attempts so far.
    pub fn attempted(&self) -> u64 {
        self.attempted
    }

    /// Number of accepted flips so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Fraction of accepted flips, 0 before any step.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }

    /// Propose one flip.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = metropolis_step(
            &mut self.lattice,
            self.params.coupling(),
            self.params.temperature(),
            &mut self.rng,
        );
        self.attempted += 1;
        if outcome.is_accepted() {
            self.accepted += 1;
        }
        outcome
    }

    /// One sweep: `side_length^dimension` proposed flips.
    pub fn sweep(&mut self) {
        for _ in 0..self.lattice.num_sites() {
            self.step();
        }
    }

    /// Take `n` sweeps without recording anything.
    pub fn sweeps(&mut self, n: usize) {
        for _ in 0..n {
            self.sweep();
        }
    }

    /// Run the configured equilibration sweeps.
    pub fn equilibrate(&mut self) {
        self.sweeps(self.params.equilibration_sweeps())
    }

    /// Observables of the current lattice, labelled with `sweep`.
    pub fn observe(&self, sweep: usize) -> ObservableRecord {
        let m = self.lattice.total_magnetization();
        let magnetization = match self.convention {
            MagnetizationConvention::Total => m,
            MagnetizationConvention::PerSite => m / self.lattice.num_sites() as f64,
        };
        ObservableRecord {
            sweep,
            energy: self.lattice.total_energy(self.params.coupling()),
            magnetization,
        }
    }

    /// Take `sweeps` sweeps and fold a record into `init_t` after every sweep whose index is a
    /// multiple of `sampling_freq`. A zero `sampling_freq` is rejected before any sweep.
    pub fn sweeps_measure<F, T>(
        &mut self,
        sweeps: usize,
        init_t: T,
        fold: F,
        sampling_freq: usize,
    ) -> Result<T>
    where
        F: FnMut(T, ObservableRecord) -> T,
    {
        if sampling_freq == 0 {
            return invalid("sampling frequency must be at least 1");
        }
        Ok(self.fold_sweeps(sweeps, init_t, fold, sampling_freq))
    }

    fn fold_sweeps<F, T>(
        &mut self,
        sweeps: usize,
        init_t: T,
        mut fold: F,
        sampling_freq: usize,
    ) -> T
    where
        F: FnMut(T, ObservableRecord) -> T,
    {
        let mut acc = init_t;
        for t in 0..sweeps {
            self.sweep();
            if t % sampling_freq == 0 {
                let record = self.observe(t);
                trace!("{:?}", record);
                acc = fold(acc, record);
            }
        }
        acc
    }

    /// Run the configured measurement sweeps, sending records to `sink`. Returns the number of
    /// records sent.
    pub fn measure_into<S: ObservableSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        // Params were validated on construction, so the interval is at least 1.
        self.fold_sweeps(
            self.params.measurement_sweeps(),
            0,
            |emitted, record| {
                sink.record(record);
                emitted + 1
            },
            self.params.measurement_interval(),
        )
    }

    /// Equilibrate then measure, sending every record to `sink`.
    pub fn run<S: ObservableSink + ?Sized>(&mut self, sink: &mut S) {
        self.log_start();
        self.equilibrate();
        let emitted = self.measure_into(sink);
        debug!(
            "run finished: {} records, acceptance {:.4}",
            emitted,
            self.acceptance_ratio()
        );
    }

    /// Equilibrate then measure, returning the records.
    pub fn run_collect(&mut self) -> Vec<ObservableRecord> {
        let mut records = Vec::with_capacity(self.params.expected_records());
        self.run(&mut records);
        records
    }

    /// Like [`Simulation::run`], but `stop` is checked between sweeps.
    ///
    /// Records only reach `sink` once the whole measurement phase completes. On a stop the
    /// lattice is left as it was after the last completed sweep and
    /// [`IsingError::Stopped`] is returned.
    pub fn run_with_stop<S: ObservableSink + ?Sized>(
        &mut self,
        sink: &mut S,
        stop: &AtomicBool,
    ) -> Result<()> {
        self.log_start();
        let eq = self.params.equilibration_sweeps();
        let meas = self.params.measurement_sweeps();
        let interval = self.params.measurement_interval();
        let mut records = Vec::with_capacity(self.params.expected_records());

        for completed in 0..eq + meas {
            if stop.load(Ordering::Relaxed) {
                warn!("run stopped after {} of {} sweeps", completed, eq + meas);
                return Err(IsingError::Stopped {
                    completed_sweeps: completed,
                });
            }
            self.sweep();
            if completed >= eq && (completed - eq) % interval == 0 {
                records.push(self.observe(completed - eq));
            }
        }
        records.into_iter().for_each(|r| sink.record(r));
        Ok(())
    }

    /// Summary statistics of `records` at this run's temperature.
    pub fn summarize(&self, records: &[ObservableRecord]) -> Result<ObservableSummary> {
        ObservableSummary::from_records(records, self.params.temperature())
    }

    fn log_start(&self) {
        debug!(
            "starting run: d={} L={} J={} T={} eq={} meas={} every {}",
            self.lattice.dimension(),
            self.lattice.side_length(),
            self.params.coupling(),
            self.params.temperature(),
            self.params.equilibration_sweeps(),
            self.params.measurement_sweeps(),
            self.params.measurement_interval()
        );
    }
}
