//! Group elements, composition, and the enumerator.

use serde::Serialize;

use crate::gray::BitVector;
use crate::traverse::{Orientation, OrientationSet};

use super::Task;

/// Move bit `i` of `x` to position `perm[i]`.
#[inline]
pub fn permute_bits(x: BitVector, perm: &[u32]) -> BitVector {
    perm.iter()
        .enumerate()
        .filter(|&(i, _)| (x >> i) & 1 == 1)
        .fold(0, |acc, (_, &p)| acc | (1 << p))
}

/// One symmetry of the D-cube: permute axes, then reflect along `flip`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SymmetryElement {
    perm: Vec<u32>,
    flip: BitVector,
}

impl SymmetryElement {
    /// Panics unless `perm` is a permutation of `0..perm.len()` and `flip`
    /// fits in that many bits.
    pub fn new(perm: Vec<u32>, flip: BitVector) -> Self {
        let d = perm.len();
        let mut seen = vec![false; d];
        for &p in &perm {
            assert!((p as usize) < d && !seen[p as usize], "not a permutation: {perm:?}");
            seen[p as usize] = true;
        }
        assert!(u64::from(flip) < (1u64 << d), "flip mask {flip} too wide for D={d}");
        Self { perm, flip }
    }

    pub fn identity(dim: u32) -> Self {
        Self {
            perm: (0..dim).collect(),
            flip: 0,
        }
    }

    #[inline]
    pub fn dim(&self) -> u32 {
        self.perm.len() as u32
    }
    #[inline]
    pub fn perm(&self) -> &[u32] {
        &self.perm
    }
    #[inline]
    pub fn flip(&self) -> BitVector {
        self.flip
    }

    /// Action on a corner.
    #[inline]
    pub fn apply_corner(&self, x: BitVector) -> BitVector {
        self.flip ^ permute_bits(x, &self.perm)
    }

    #[inline]
    pub fn apply_task(&self, t: Task) -> Task {
        Task::new(self.apply_corner(t.start), self.perm[t.top_dim as usize])
    }

    /// The displacement is a direction, so the flip does not touch it.
    #[inline]
    pub fn apply_orientation(&self, o: Orientation) -> Orientation {
        Orientation::new(self.apply_corner(o.start), permute_bits(o.disp, &self.perm))
    }

    pub fn apply_set(&self, set: &OrientationSet) -> OrientationSet {
        set.iter().map(|&o| self.apply_orientation(o)).collect()
    }

    /// `self ∘ other`: acting with the result equals acting with `other`
    /// first and `self` second.
    pub fn compose(&self, other: &SymmetryElement) -> SymmetryElement {
        debug_assert_eq!(self.perm.len(), other.perm.len());
        Self {
            perm: other.perm.iter().map(|&p| self.perm[p as usize]).collect(),
            flip: self.flip ^ permute_bits(other.flip, &self.perm),
        }
    }

    pub fn inverse(&self) -> SymmetryElement {
        let mut inv = vec![0u32; self.perm.len()];
        for (i, &p) in self.perm.iter().enumerate() {
            inv[p as usize] = i as u32;
        }
        let flip = permute_bits(self.flip, &inv);
        Self { perm: inv, flip }
    }
}

/// Permutations of `0..n` in lexicographic order.
#[derive(Clone, Debug)]
pub struct Permutations {
    next: Option<Vec<u32>>,
}

impl Permutations {
    pub fn new(n: u32) -> Self {
        Self {
            next: Some((0..n).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        // Standard next-permutation: rightmost ascent, swap with the smallest
        // larger suffix element, reverse the suffix.
        if let Some(i) = (1..succ.len()).rev().find(|&i| succ[i - 1] < succ[i]) {
            let pivot = i - 1;
            let mut j = succ.len() - 1;
            while succ[j] <= succ[pivot] {
                j -= 1;
            }
            succ.swap(pivot, j);
            succ[i..].reverse();
            self.next = Some(succ);
        }
        Some(current)
    }
}

/// Enumerator over all `2^D · D!` symmetries, permutation-major.
#[derive(Clone, Debug)]
pub struct SymmetryGroup {
    perms: Permutations,
    current: Option<Vec<u32>>,
    next_flip: u64,
    num_flips: u64,
}

impl SymmetryGroup {
    pub fn new(dim: u32) -> Self {
        let mut perms = Permutations::new(dim);
        let current = perms.next();
        Self {
            perms,
            current,
            next_flip: 0,
            num_flips: 1u64 << dim,
        }
    }

    /// Group order `2^D · D!`.
    pub fn order(dim: u32) -> u64 {
        (1..=u64::from(dim)).product::<u64>() << dim
    }
}

impl Iterator for SymmetryGroup {
    type Item = SymmetryElement;

    fn next(&mut self) -> Option<SymmetryElement> {
        if self.next_flip == self.num_flips {
            self.current = self.perms.next();
            self.next_flip = 0;
        }
        let perm = self.current.as_ref()?;
        let elem = SymmetryElement {
            perm: perm.clone(),
            flip: self.next_flip as BitVector,
        };
        self.next_flip += 1;
        Some(elem)
    }
}
