//! Candidate sub-curve displacements for one region.

use super::BitVector;

/// Lazy candidate sequence returned by `generate_moves`.
#[derive(Clone, Debug)]
pub enum Moves {
    /// The region's own flip is the only continuation.
    Forced(Option<BitVector>),
    /// Every other axis, highest bit first.
    Free { skip: BitVector, next_bit: u32 },
}

impl Iterator for Moves {
    type Item = BitVector;

    fn next(&mut self) -> Option<BitVector> {
        match self {
            Moves::Forced(m) => m.take(),
            Moves::Free { skip, next_bit } => {
                while *next_bit > 0 {
                    *next_bit -= 1;
                    let m = 1 << *next_bit;
                    if m != *skip {
                        return Some(m);
                    }
                }
                None
            }
        }
    }
}

/// Moves allowed in the region at `out_pos` when the curve enters it at
/// in-region corner `in_pos` and must leave across `region_disp`.
///
/// If the entry corner agrees with the region's own corner along
/// `region_disp`, the only move is `region_disp` itself. Otherwise any other single axis works,
/// yielded in descending bit order; the order fixes enumeration order only.
pub fn generate_moves(
    in_pos: BitVector,
    out_pos: BitVector,
    region_disp: BitVector,
    dim: u32,
) -> Moves {
    if (in_pos & region_disp) == (out_pos & region_disp) {
        Moves::Forced(Some(region_disp))
    } else {
        Moves::Free {
            skip: region_disp,
            next_bit: dim,
        }
    }
}
