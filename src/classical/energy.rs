//! Energies and magnetization for the nearest-neighbor Hamiltonian `H = -J sum_<ij> s_i s_j`.

use crate::classical::lattice::{Direction, Lattice};

/// Sum of the `2 * dimension` periodic neighbors of the site at `index`.
#[inline]
fn neighbor_sum(lattice: &Lattice, index: usize) -> i32 {
    (0..lattice.dimension())
        .map(|axis| {
            Direction::BOTH
                .iter()
                .map(|dir| i32::from(lattice.spin_at(lattice.neighbor_index(index, axis, *dir))))
                .sum::<i32>()
        })
        .sum()
}

/// Energy change if the spin at flat `index` were flipped. Does not modify the lattice.
#[inline]
pub fn flip_delta_energy_at(lattice: &Lattice, index: usize, coupling: f64) -> f64 {
    let s = i32::from(lattice.spin_at(index));
    // j*new - j*old = j*(-old) - j*(old), summed over every bond touching the site.
    2.0 * coupling * f64::from(s * neighbor_sum(lattice, index))
}

/// Energy change if the spin at `coords` were flipped: `2 J s sum(neighbors)`.
pub fn flip_delta_energy(lattice: &Lattice, coords: &[usize], coupling: f64) -> f64 {
    flip_delta_energy_at(lattice, lattice.index_of(coords), coupling)
}

/// Total energy, each bond counted once through its forward neighbor.
pub fn total_energy(lattice: &Lattice, coupling: f64) -> f64 {
    let aligned: i64 = (0..lattice.num_sites())
        .map(|i| {
            let s = i64::from(lattice.spin_at(i));
            (0..lattice.dimension())
                .map(|axis| {
                    s * i64::from(lattice.spin_at(lattice.neighbor_index(
                        i,
                        axis,
                        Direction::Forward,
                    )))
                })
                .sum::<i64>()
        })
        .sum();
    -coupling * aligned as f64
}

/// Raw sum of all spins.
pub fn total_magnetization(lattice: &Lattice) -> f64 {
    lattice.spins().iter().map(|s| i64::from(*s)).sum::<i64>() as f64
}

impl Lattice {
    /// See [`total_energy`].
    pub fn total_energy(&self, coupling: f64) -> f64 {
        total_energy(self, coupling)
    }

    /// Total energy divided by the number of sites.
    pub fn per_site_energy(&self, coupling: f64) -> f64 {
        total_energy(self, coupling) / self.num_sites() as f64
    }

    /// See [`total_magnetization`].
    pub fn total_magnetization(&self) -> f64 {
        total_magnetization(self)
    }

    /// Magnetization divided by the number of sites, in `[-1, 1]`.
    pub fn per_site_magnetization(&self) -> f64 {
        total_magnetization(self) / self.num_sites() as f64
    }
}
