//! Subdivision tasks and their correspondence with orientations.

use serde::Serialize;

use crate::gray::BitVector;
use crate::traverse::Orientation;

/// A subdivision instance: entry corner plus dominant (exit) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Task {
    pub start: BitVector,
    pub top_dim: u32,
}

impl Task {
    #[inline]
    pub fn new(start: BitVector, top_dim: u32) -> Self {
        Self { start, top_dim }
    }

    /// The whole-cube task `(0, D-1)` the traverser solves.
    #[inline]
    pub fn root(dim: u32) -> Self {
        Self::new(0, dim.saturating_sub(1))
    }

    #[inline]
    pub fn is_within(&self, dim: u32) -> bool {
        self.top_dim < dim && u64::from(self.start) < (1u64 << dim)
    }

    /// Orientation with the same entry corner leaving along `top_dim`.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.start, 1 << self.top_dim)
    }

    /// Dense index in `[0, D · 2^D)`, axis-major.
    #[inline]
    pub fn index(&self, dim: u32) -> usize {
        ((self.top_dim as usize) << dim) | self.start as usize
    }

    #[inline]
    pub fn from_index(index: usize, dim: u32) -> Self {
        let mask = (1usize << dim) - 1;
        Self::new((index & mask) as BitVector, (index >> dim) as u32)
    }

    /// Number of distinct tasks for `dim`.
    #[inline]
    pub fn count(dim: u32) -> usize {
        (dim as usize) << dim
    }

    /// All tasks for `dim` in index order.
    pub fn all(dim: u32) -> impl Iterator<Item = Task> {
        (0..Self::count(dim)).map(move |i| Self::from_index(i, dim))
    }
}

impl Orientation {
    /// The task this orientation fulfils, if its displacement is one axis.
    #[inline]
    pub fn task(&self) -> Option<Task> {
        if self.disp.is_power_of_two() {
            Some(Task::new(self.start, self.disp.trailing_zeros()))
        } else {
            None
        }
    }
}
