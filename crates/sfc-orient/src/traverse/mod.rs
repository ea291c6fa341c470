//! Backtracking enumeration of Gray-code displacement sequences.
//!
//! Purpose
//! - Walk the 2^D regions of the base order, choosing one sub-curve
//!   displacement per region, and keep every sequence whose exit lands on the
//!   required offset `2^(D-1)`.
//! - Summarize each complete sequence by its orientation inventory and track
//!   the smallest and largest inventories seen.
//!
//! Design
//! - Depth-first over an explicit frame stack, so depth is not limited by the
//!   call stack. Histories are truncated to the popped depth on backtrack.
//! - `Traverser` is resumable one step at a time; aggregate statistics are
//!   only touched when a sequence completes, so an aborted run still reports
//!   consistent partial results.
//!
//! Regression oracle: D=2 → 1, D=3 → 5, D=4 → 5733 sequences.

mod search;
mod types;

pub use search::{traverse, traverse_with, StepOutcome, Traverser};
pub use types::{Orientation, OrientationSet, SolutionCollection, Traversal, TraverseCfg};
