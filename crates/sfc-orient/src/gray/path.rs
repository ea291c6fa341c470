//! Base path (ruler sequence) and base order (prefix XOR scan).

use tracing::debug;

use super::{num_regions, validate_dimension, BitVector, DimensionError};

/// Canonical Gray-code flip sequence for dimension `dim`.
///
/// `P(0) = []`, `P(D) = P(D-1) ++ [1 << (D-1)] ++ P(D-1)`; length `2^D - 1`.
pub fn generate_path(dim: u32) -> Vec<BitVector> {
    if dim == 0 {
        return Vec::new();
    }
    let lower = generate_path(dim - 1);
    let mut path = Vec::with_capacity(2 * lower.len() + 1);
    path.extend_from_slice(&lower);
    path.push(1 << (dim - 1));
    path.extend_from_slice(&lower);
    path
}

/// Corner visitation order induced by `path`, starting at corner 0.
///
/// Panics if two entries coincide: that is a broken base path, not an input
/// the caller can recover from.
pub fn derive_order(path: &[BitVector]) -> Vec<BitVector> {
    let mut order = Vec::with_capacity(path.len() + 1);
    let mut pos: BitVector = 0;
    order.push(pos);
    for &flip in path {
        pos ^= flip;
        order.push(pos);
    }
    let mut sorted = order.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(
        sorted.len(),
        order.len(),
        "base order revisits a corner; base path is not Hamiltonian"
    );
    order
}

/// Base path and base order for one dimension. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseCurve {
    dim: u32,
    path: Vec<BitVector>,
    order: Vec<BitVector>,
}

impl BaseCurve {
    pub fn new(dim: u32) -> Result<Self, DimensionError> {
        validate_dimension(dim)?;
        let path = generate_path(dim);
        let order = derive_order(&path);
        assert_eq!(
            order.len(),
            num_regions(dim),
            "num_regions does not match region visitation list"
        );
        debug!(dim, path = ?path, "base path");
        Ok(Self { dim, path, order })
    }

    #[inline]
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Axis flip taken when leaving region `depth` (length `2^D - 1`).
    #[inline]
    pub fn path(&self) -> &[BitVector] {
        &self.path
    }

    /// Corner of region `depth` in visitation order (length `2^D`).
    #[inline]
    pub fn order(&self) -> &[BitVector] {
        &self.order
    }

    #[inline]
    pub fn num_regions(&self) -> usize {
        self.order.len()
    }

    /// Depth of the last region; reaching it ends a displacement sequence.
    #[inline]
    pub fn terminal_depth(&self) -> usize {
        self.order.len() - 1
    }

    /// Flip reused as the forced final move. `None` for D=0.
    #[inline]
    pub fn final_move(&self) -> Option<BitVector> {
        self.path.last().copied()
    }
}
