use crate::error::{invalid, Result};
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{Debug, Error, Formatter};

/// Coordinates of a site, one entry per axis.
pub type Coords = SmallVec<[usize; 4]>;

/// Direction along an axis in which to look for a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Towards `coord - 1`.
    Backward,
    /// Towards `coord + 1`.
    Forward,
}

impl Direction {
    /// Both directions, backward first.
    pub const BOTH: [Direction; 2] = [Direction::Backward, Direction::Forward];

    /// The signed step, -1 or +1.
    pub fn offset(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Move one step along a periodic axis of length `side_length`.
///
/// Equivalent to `(coord + direction + side_length) mod side_length`. With
/// `side_length == 1` every site is its own neighbor.
#[inline]
pub fn wrap(coord: usize, side_length: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (coord + 1) % side_length,
        Direction::Backward => (coord + side_length - 1) % side_length,
    }
}

/// A hypercubic lattice of +1/-1 spins with periodic boundaries.
///
/// Sites are stored densely in row-major order, the last axis varying fastest.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "SerializeLattice", into = "SerializeLattice")
)]
pub struct Lattice {
    dimension: usize,
    side_length: usize,
    strides: SmallVec<[usize; 4]>,
    spins: Vec<i8>,
}

impl Debug for Lattice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        let s = self
            .spins
            .iter()
            .map(|s| if *s > 0 { "+" } else { "-" })
            .collect::<Vec<_>>()
            .join("");
        f.write_str(&format!(
            "Lattice(d={}, L={})\t{}",
            self.dimension, self.side_length, s
        ))
    }
}

/// Check a lattice shape and return the number of sites it holds.
pub(crate) fn checked_num_sites(dimension: usize, side_length: usize) -> Result<usize> {
    if dimension < 1 {
        return invalid(format!("dimension must be at least 1, got {}", dimension));
    }
    if side_length < 1 {
        return invalid(format!("side length must be at least 1, got {}", side_length));
    }
    u32::try_from(dimension)
        .ok()
        .and_then(|d| side_length.checked_pow(d))
        .map_or_else(
            || {
                invalid(format!(
                    "lattice with side {} in {} dimensions is too large",
                    side_length, dimension
                ))
            },
            Ok,
        )
}

impl Lattice {
    fn from_parts(dimension: usize, side_length: usize, spins: Vec<i8>) -> Self {
        let mut strides: SmallVec<[usize; 4]> = SmallVec::from_elem(1, dimension);
        for axis in (0..dimension.saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * side_length;
        }
        Self {
            dimension,
            side_length,
            strides,
            spins,
        }
    }

    /// Build a lattice where each site is independently +1 or -1 with probability one half.
    ///
    /// One uniform `f64` is drawn per site in storage order; values below 0.5 give +1.
    pub fn new_random<R: Rng + ?Sized>(
        dimension: usize,
        side_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let n = checked_num_sites(dimension, side_length)?;
        let spins = (0..n)
            .map(|_| if rng.gen::<f64>() < 0.5 { 1 } else { -1 })
            .collect();
        Ok(Self::from_parts(dimension, side_length, spins))
    }

    /// Build a lattice from a caller supplied configuration of exactly `side_length^dimension`
    /// values, each +1 or -1.
    pub fn new_with_spins(dimension: usize, side_length: usize, spins: Vec<i8>) -> Result<Self> {
        let n = checked_num_sites(dimension, side_length)?;
        validate_spins(n, &spins)?;
        Ok(Self::from_parts(dimension, side_length, spins))
    }

    /// Every spin +1.
    pub fn all_up(dimension: usize, side_length: usize) -> Result<Self> {
        let n = checked_num_sites(dimension, side_length)?;
        Ok(Self::from_parts(dimension, side_length, vec![1; n]))
    }

    /// +1 where the coordinate sum is even, -1 where it is odd.
    pub fn checkerboard(dimension: usize, side_length: usize) -> Result<Self> {
        Self::from_site_fn(dimension, side_length, |coords| {
            if coords.iter().sum::<usize>() % 2 == 0 {
                1
            } else {
                -1
            }
        })
    }

    /// +1 on the lower half of `axis` (`coord[axis] < side_length / 2`), -1 on the rest.
    pub fn domain_wall(dimension: usize, side_length: usize, axis: usize) -> Result<Self> {
        if axis >= dimension {
            return invalid(format!(
                "domain wall axis {} out of range for {} dimensions",
                axis, dimension
            ));
        }
        Self::from_site_fn(dimension, side_length, |coords| {
            if coords[axis] < side_length / 2 {
                1
            } else {
                -1
            }
        })
    }

    fn from_site_fn<F>(dimension: usize, side_length: usize, f: F) -> Result<Self>
    where
        F: Fn(&[usize]) -> i8,
    {
        let n = checked_num_sites(dimension, side_length)?;
        let mut lattice = Self::from_parts(dimension, side_length, vec![1; n]);
        for i in 0..n {
            let coords = lattice.coords_of(i);
            lattice.spins[i] = f(&coords);
        }
        Ok(lattice)
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Length of every axis.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Total number of sites, `side_length^dimension`.
    pub fn num_sites(&self) -> usize {
        self.spins.len()
    }

    /// Read-only view of all spins in storage order.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// An owned copy of the spins, unaffected by later updates.
    pub fn snapshot(&self) -> Vec<i8> {
        self.spins.clone()
    }

    /// Overwrite the spin configuration, keeping the shape.
    pub fn set_spins(&mut self, spins: Vec<i8>) -> Result<()> {
        validate_spins(self.num_sites(), &spins)?;
        self.spins = spins;
        Ok(())
    }

    /// Flat index of a site.
    ///
    /// # Panics
    /// If `coords` does not have one entry per axis or any entry is `>= side_length`.
    pub fn index_of(&self, coords: &[usize]) -> usize {
        assert_eq!(
            coords.len(),
            self.dimension,
            "expected {} coordinates, got {:?}",
            self.dimension,
            coords
        );
        coords
            .iter()
            .zip(self.strides.iter())
            .map(|(c, stride)| {
                assert!(
                    *c < self.side_length,
                    "coordinate {:?} out of bounds for side length {}",
                    coords,
                    self.side_length
                );
                c * stride
            })
            .sum()
    }

    /// Coordinates of the site at a flat index.
    ///
    /// # Panics
    /// If `index >= num_sites()`.
    pub fn coords_of(&self, index: usize) -> Coords {
        assert!(
            index < self.num_sites(),
            "site index {} out of bounds for {} sites",
            index,
            self.num_sites()
        );
        self.strides
            .iter()
            .map(|stride| (index / stride) % self.side_length)
            .collect()
    }

    /// Spin at `coords`.
    pub fn get(&self, coords: &[usize]) -> i8 {
        self.spins[self.index_of(coords)]
    }

    /// Flip the spin at `coords`.
    pub fn flip(&mut self, coords: &[usize]) {
        let i = self.index_of(coords);
        self.flip_at(i)
    }

    /// Spin at a flat index.
    #[inline]
    pub fn spin_at(&self, index: usize) -> i8 {
        self.spins[index]
    }

    /// Flip the spin at a flat index.
    #[inline]
    pub fn flip_at(&mut self, index: usize) {
        self.spins[index] = -self.spins[index];
    }

    /// Coordinates of the periodic neighbor of `coords` one step along `axis`.
    ///
    /// # Panics
    /// If `axis >= dimension()` or `coords` is not a valid site.
    pub fn neighbor(&self, coords: &[usize], axis: usize, direction: Direction) -> Coords {
        assert!(axis < self.dimension, "axis {} out of range", axis);
        // Validates coords.
        self.index_of(coords);
        let mut n: Coords = coords.iter().cloned().collect();
        n[axis] = wrap(n[axis], self.side_length, direction);
        n
    }

    /// Flat index of the periodic neighbor of the site at `index` one step along `axis`.
    #[inline]
    pub fn neighbor_index(&self, index: usize, axis: usize, direction: Direction) -> usize {
        let stride = self.strides[axis];
        let c = (index / stride) % self.side_length;
        let nc = wrap(c, self.side_length, direction);
        index - c * stride + nc * stride
    }
}

/// Wire form of a [`Lattice`]; shape and spins are checked again when converting back.
#[cfg(feature = "serialize")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializeLattice {
    dimension: usize,
    side_length: usize,
    spins: Vec<i8>,
}

#[cfg(feature = "serialize")]
impl From<Lattice> for SerializeLattice {
    fn from(lattice: Lattice) -> Self {
        Self {
            dimension: lattice.dimension,
            side_length: lattice.side_length,
            spins: lattice.spins,
        }
    }
}

#[cfg(feature = "serialize")]
impl TryFrom<SerializeLattice> for Lattice {
    type Error = crate::error::IsingError;

    fn try_from(raw: SerializeLattice) -> Result<Self> {
        Lattice::new_with_spins(raw.dimension, raw.side_length, raw.spins)
    }
}

fn validate_spins(expected_len: usize, spins: &[i8]) -> Result<()> {
    if spins.len() != expected_len {
        return invalid(format!(
            "initial state has {} values, expected {}",
            spins.len(),
            expected_len
        ));
    }
    if let Some((i, s)) = spins.iter().enumerate().find(|(_, s)| **s != 1 && **s != -1) {
        return invalid(format!("initial state value {} at site {} is not +1 or -1", s, i));
    }
    Ok(())
}
