use crate::classical::sweep::ObservableRecord;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Subtract the mean and scale to unit norm. `None` for empty or constant input.
fn normalized(series: &[f64]) -> Option<Vec<f64>> {
    if series.is_empty() {
        return None;
    }
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    let centered = series.iter().map(|x| x - mean).collect::<Vec<_>>();
    let norm = centered.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(centered.into_iter().map(|x| x / norm).collect())
}

/// Circular autocorrelation of a scalar series computed through an FFT, normalized so that
/// lag 0 is 1. Returns `None` for an empty or constant series.
pub fn fft_autocorrelation(series: &[f64]) -> Option<Vec<f64>> {
    let tmax = series.len();
    let mut buffer = normalized(series)?
        .into_iter()
        .map(|x| Complex::<f64>::new(x, 0.0))
        .collect::<Vec<_>>();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(tmax);
    let ifft = planner.plan_fft_inverse(tmax);

    fft.process(&mut buffer);
    buffer
        .iter_mut()
        .for_each(|c| *c = Complex::new(c.norm_sqr(), 0.0));
    ifft.process(&mut buffer);

    // rustfft leaves the inverse unnormalized.
    Some(buffer.into_iter().map(|c| c.re / tmax as f64).collect())
}

/// Direct O(n^2) version of [`fft_autocorrelation`].
pub fn naive_autocorrelation(series: &[f64]) -> Option<Vec<f64>> {
    let x = normalized(series)?;
    let tmax = x.len();
    Some(
        (0..tmax)
            .map(|tau| (0..tmax).map(|t| x[t] * x[(t + tau) % tmax]).sum::<f64>())
            .collect(),
    )
}

/// Integrated autocorrelation time `1/2 + sum_t rho(t)`, summing lags below half the series
/// length until the first non-positive value.
pub fn integrated_autocorrelation_time(series: &[f64]) -> Option<f64> {
    let rho = fft_autocorrelation(series)?;
    let window = rho.len() / 2;
    let tail = rho
        .iter()
        .take(window.max(1))
        .skip(1)
        .take_while(|r| **r > 0.0)
        .sum::<f64>();
    Some(0.5 + tail)
}

/// Autocorrelation of the energy and magnetization columns of a record sequence.
pub fn record_autocorrelations(
    records: &[ObservableRecord],
) -> (Option<Vec<f64>>, Option<Vec<f64>>) {
    let energies = records.iter().map(|r| r.energy).collect::<Vec<_>>();
    let magnetizations = records.iter().map(|r| r.magnetization).collect::<Vec<_>>();
    (
        fft_autocorrelation(&energies),
        fft_autocorrelation(&magnetizations),
    )
}
