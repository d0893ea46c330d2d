use crate::error::{invalid, Result};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Parameters of a single run. They are checked by [`SimulationParams::validate`] and fixed for
/// the duration of the run that uses them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationParams {
    coupling: f64,
    temperature: f64,
    equilibration_sweeps: usize,
    measurement_sweeps: usize,
    measurement_interval: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            coupling: 1.0,
            temperature: 2.269,
            equilibration_sweeps: 100,
            measurement_sweeps: 1000,
            measurement_interval: 1,
        }
    }
}

impl SimulationParams {
    /// Make and validate a full set of parameters.
    pub fn new(
        coupling: f64,
        temperature: f64,
        equilibration_sweeps: usize,
        measurement_sweeps: usize,
        measurement_interval: usize,
    ) -> Result<Self> {
        Self {
            coupling,
            temperature,
            equilibration_sweeps,
            measurement_sweeps,
            measurement_interval,
        }
        .validated()
    }

    /// Check the parameters, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.coupling.is_finite() {
            return invalid(format!("coupling must be finite, got {}", self.coupling));
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return invalid(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            ));
        }
        if self.measurement_interval == 0 {
            return invalid("measurement interval must be at least 1");
        }
        Ok(())
    }

    /// Validate and pass through.
    pub fn validated(self) -> Result<Self> {
        self.validate().map(|_| self)
    }

    /// Set the coupling strength J.
    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    /// Set the temperature T.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the number of unrecorded sweeps run first.
    pub fn with_equilibration_sweeps(mut self, sweeps: usize) -> Self {
        self.equilibration_sweeps = sweeps;
        self
    }

    /// Set the number of measurement phase sweeps.
    pub fn with_measurement_sweeps(mut self, sweeps: usize) -> Self {
        self.measurement_sweeps = sweeps;
        self
    }

    /// Set how many sweeps apart records are taken.
    pub fn with_measurement_interval(mut self, interval: usize) -> Self {
        self.measurement_interval = interval;
        self
    }

    /// Coupling strength J.
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// Temperature T.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Inverse temperature `1 / T`.
    pub fn beta(&self) -> f64 {
        1.0 / self.temperature
    }

    /// Sweeps run before measuring.
    pub fn equilibration_sweeps(&self) -> usize {
        self.equilibration_sweeps
    }

    /// Sweeps run while measuring.
    pub fn measurement_sweeps(&self) -> usize {
        self.measurement_sweeps
    }

    /// Sweeps between records.
    pub fn measurement_interval(&self) -> usize {
        self.measurement_interval
    }

    /// Number of records a full measurement phase emits.
    pub fn expected_records(&self) -> usize {
        // Sweeps 0, k, 2k, ... below measurement_sweeps.
        let k = self.measurement_interval.max(1);
        (self.measurement_sweeps + k - 1) / k
    }
}
