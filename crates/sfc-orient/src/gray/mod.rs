//! Gray-code base curve: flip sequence, corner order, and move candidates.
//!
//! Purpose
//! - `generate_path` produces the reflected-binary "ruler sequence" of axis
//!   flips; `derive_order` turns it into the corner visitation order.
//! - `generate_moves` proposes the sub-curve displacements that are allowed in
//!   one region of that order.
//!
//! Both sequences are computed once per dimension and bundled in `BaseCurve`.

mod moves;
mod path;

pub use moves::{generate_moves, Moves};
pub use path::{derive_order, generate_path, BaseCurve};

use std::fmt;

use crate::cfg::MAX_DIMENSION;

/// A hypercube corner (or an axis flip) encoded as D bits.
pub type BitVector = u32;

/// Rejected dimension parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DimensionError {
    TooLarge { dim: u32, max: u32 },
    Degenerate { dim: u32, reason: String },
}

impl DimensionError {
    pub(crate) fn degenerate(dim: u32, reason: impl Into<String>) -> Self {
        Self::Degenerate {
            dim,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { dim, max } => {
                write!(f, "dimension {dim} exceeds the supported maximum {max}")
            }
            Self::Degenerate { dim, reason } => write!(f, "dimension {dim}: {reason}"),
        }
    }
}

impl std::error::Error for DimensionError {}

/// Check `dim` against `MAX_DIMENSION`. Zero is allowed here; searches that
/// need a target axis reject it themselves.
pub fn validate_dimension(dim: u32) -> Result<(), DimensionError> {
    if dim > MAX_DIMENSION {
        return Err(DimensionError::TooLarge {
            dim,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

/// Number of corners of the D-cube.
#[inline]
pub fn num_regions(dim: u32) -> usize {
    1usize << dim
}
