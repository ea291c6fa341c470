//! Orientation search for recursive hypercube space-filling curves.
//!
//! A D-cube is split into 2^D sub-cubes that are visited in the canonical
//! Gray-code order. Each sub-cube is itself filled by a smaller copy of the
//! curve, entering at some corner and leaving along one axis; that pair is an
//! *orientation*. This crate
//! - enumerates every displacement sequence that is consistent with the Gray
//!   code and ends at the required offset (`traverse`),
//! - records the orientation inventory each sequence needs, and
//! - projects those inventories through the symmetry group of the cube to find
//!   a smallest orientation table closed under subdivision (`closure`).
//!
//! Limits
//! - Exhaustive enumeration is practical up to D=4 (5733 sequences). D=5 does
//!   not finish; callers bound it with `TraverseCfg::max_steps`.
//!
//! API Policy
//! - Project-internal. `api` is the curated surface for the CLI and benches.

pub mod api;
pub mod cfg;
pub mod closure;
pub mod gray;
pub mod symmetry;
pub mod traverse;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::closure::{solve, solve_with, ClosureCfg, ClosureTable, SolveError};
    pub use crate::gray::{BaseCurve, BitVector, DimensionError};
    pub use crate::symmetry::{SymmetryElement, SymmetryGroup, Task};
    pub use crate::traverse::{
        traverse, traverse_with, Orientation, OrientationSet, SolutionCollection, Traversal,
        TraverseCfg,
    };
}
