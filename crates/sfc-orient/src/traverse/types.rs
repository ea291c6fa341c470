//! Data types for the traverser and its report.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::Serialize;

use crate::gray::BitVector;

/// Sub-curve template: entry corner inside the region plus net displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Orientation {
    pub start: BitVector,
    pub disp: BitVector,
}

impl Orientation {
    #[inline]
    pub fn new(start: BitVector, disp: BitVector) -> Self {
        Self { start, disp }
    }
}

/// Distinct orientations required by one complete sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OrientationSet(pub BTreeSet<Orientation>);

impl OrientationSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn contains(&self, o: &Orientation) -> bool {
        self.0.contains(o)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Orientation> {
        self.0.iter()
    }
}

impl FromIterator<Orientation> for OrientationSet {
    fn from_iter<I: IntoIterator<Item = Orientation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Distinct inventories across all sequences of one dimension.
pub type SolutionCollection = BTreeSet<OrientationSet>;

/// One pending branch: the state it was pushed from and the move to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub in_pos: BitVector,
    pub mv: BitVector,
    pub depth: usize,
}

/// Traversal configuration.
#[derive(Clone, Debug, Default)]
pub struct TraverseCfg {
    /// Stop after this many backtracking steps (pops). `None` runs to the end.
    pub max_steps: Option<u64>,
    /// Wall-clock limit, checked between steps.
    pub time_limit: Option<Duration>,
    /// Solution indices whose full ordered orientation sequence is kept.
    pub capture: BTreeSet<u64>,
}

/// Aggregate result of one traversal; partial if `complete == false`.
#[derive(Clone, Debug, Serialize)]
pub struct Traversal {
    pub dim: u32,
    pub total_solutions: u64,
    pub min_count: Option<usize>,
    pub min_indices: Vec<u64>,
    pub max_count: Option<usize>,
    pub max_indices: Vec<u64>,
    pub solutions: SolutionCollection,
    pub complete: bool,
    pub steps: u64,
    /// Ordered `(in-region start, move)` per depth for the requested indices.
    pub captured: BTreeMap<u64, Vec<Orientation>>,
}
