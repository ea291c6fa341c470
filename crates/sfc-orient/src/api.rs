//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   benches. Breaking changes are allowed and expected.

// Gray-code base curve
pub use crate::gray::{derive_order, generate_moves, generate_path, BaseCurve, BitVector};
// Backtracking search
pub use crate::traverse::{
    traverse, traverse_with, Orientation, OrientationSet, SolutionCollection, StepOutcome,
    Traversal, TraverseCfg, Traverser,
};
// Symmetry group
pub use crate::symmetry::{permute_bits, SymmetryElement, SymmetryGroup, Task};
// Closure solver
pub use crate::closure::{
    project, solve, solve_with, ClosureCfg, ClosureTable, SatisfiedParents, SolveError,
};
