use crate::classical::energy::flip_delta_energy_at;
use crate::classical::lattice::Lattice;
use rand::Rng;

/// Result of a single proposed spin flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The spin was flipped.
    Accepted {
        /// Energy change caused by the flip.
        delta_energy: f64,
    },
    /// The lattice was left untouched.
    Rejected {
        /// Energy change the flip would have caused.
        delta_energy: f64,
    },
}

impl StepOutcome {
    /// Whether the proposed flip was applied.
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Accepted { .. })
    }
}

/// Randomly choose if a step should be made based on temperature and energy change.
///
/// Draws from `rng` only when `delta_e > 0`.
#[inline]
pub fn should_flip<R: Rng + ?Sized>(rng: &mut R, temperature: f64, delta_e: f64) -> bool {
    // If dE <= 0 then it will always flip, don't bother calculating odds.
    if delta_e > 0.0 {
        let chance = (-delta_e / temperature).exp();
        rng.gen::<f64>() < chance
    } else {
        true
    }
}

/// Draw a site uniformly, one independent draw per axis, and return its flat index.
#[inline]
pub fn random_site<R: Rng + ?Sized>(lattice: &Lattice, rng: &mut R) -> usize {
    let l = lattice.side_length();
    // Row-major, so the first axis carries the largest stride.
    (0..lattice.dimension()).fold(0, |acc, _| acc * l + rng.gen_range(0..l))
}

/// Perform a random single spin flip attempt.
///
/// `temperature` must be positive; this is checked once when a run is configured.
pub fn metropolis_step<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    coupling: f64,
    temperature: f64,
    rng: &mut R,
) -> StepOutcome {
    let index = random_site(lattice, rng);
    let delta_energy = flip_delta_energy_at(lattice, index, coupling);
    if should_flip(rng, temperature, delta_energy) {
        lattice.flip_at(index);
        StepOutcome::Accepted { delta_energy }
    } else {
        StepOutcome::Rejected { delta_energy }
    }
}
