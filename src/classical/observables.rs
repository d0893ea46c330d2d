use crate::classical::sweep::ObservableRecord;
use crate::error::{invalid, Result};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Thermodynamic averages over a sequence of records.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ObservableSummary {
    /// Number of records averaged.
    pub samples: usize,
    /// `<E>`
    pub mean_energy: f64,
    /// `<|M|>`
    pub mean_abs_magnetization: f64,
    /// Population standard deviation of E.
    pub energy_std: f64,
    /// Population standard deviation of M.
    pub magnetization_std: f64,
    /// `(<E^2> - <E>^2) / T^2`
    pub specific_heat: f64,
    /// `(<M^2> - <|M|>^2) / T`
    pub susceptibility: f64,
}

impl ObservableSummary {
    /// Average the records of a run at `temperature`. Units follow the records, so per-site
    /// magnetization records give per-site averages.
    pub fn from_records(records: &[ObservableRecord], temperature: f64) -> Result<Self> {
        if records.is_empty() {
            return invalid("cannot summarize an empty record sequence");
        }
        if !(temperature.is_finite() && temperature > 0.0) {
            return invalid(format!(
                "temperature must be positive and finite, got {}",
                temperature
            ));
        }
        let mean_energy = mean(records, |r| r.energy);
        let mean_energy_sq = mean(records, |r| r.energy.powi(2));
        let mean_m = mean(records, |r| r.magnetization);
        let mean_abs_magnetization = mean(records, |r| r.magnetization.abs());
        let mean_m_sq = mean(records, |r| r.magnetization.powi(2));

        let energy_var = (mean_energy_sq - mean_energy.powi(2)).max(0.0);
        let magnetization_var = (mean_m_sq - mean_m.powi(2)).max(0.0);

        Ok(Self {
            samples: records.len(),
            mean_energy,
            mean_abs_magnetization,
            energy_std: energy_var.sqrt(),
            magnetization_std: magnetization_var.sqrt(),
            specific_heat: energy_var / temperature.powi(2),
            susceptibility: (mean_m_sq - mean_abs_magnetization.powi(2)) / temperature,
        })
    }

    /// Divide extensive quantities by the number of sites. Fluctuation terms scale with
    /// `1 / num_sites`, matching `C / N` and `chi / N`.
    pub fn per_site(&self, num_sites: usize) -> Self {
        let n = num_sites as f64;
        Self {
            samples: self.samples,
            mean_energy: self.mean_energy / n,
            mean_abs_magnetization: self.mean_abs_magnetization / n,
            energy_std: self.energy_std / n,
            magnetization_std: self.magnetization_std / n,
            specific_heat: self.specific_heat / n,
            susceptibility: self.susceptibility / n,
        }
    }
}

fn mean<F>(records: &[ObservableRecord], f: F) -> f64
where
    F: Fn(&ObservableRecord) -> f64,
{
    records.iter().map(f).sum::<f64>() / records.len() as f64
}
