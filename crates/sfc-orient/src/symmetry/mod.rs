//! Symmetry group of the D-cube acting on tasks and orientations.
//!
//! Purpose
//! - Enumerate the `2^D · D!` elements of the hyperoctahedral group as
//!   explicit `(permutation, flip mask)` values.
//! - Act on tasks (start corner, dominant axis) and on orientations (start
//!   corner, displacement). Displacements are directions: they are permuted
//!   but never flipped.
//!
//! Convention
//! - An element first moves bit `i` to position `perm[i]`, then XORs `flip`.

mod group;
mod task;

pub use group::{permute_bits, Permutations, SymmetryElement, SymmetryGroup};
pub use task::Task;

#[cfg(test)]
mod tests;
