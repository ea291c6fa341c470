//! Closure solver: from one task's inventories to a closed orientation table.
//!
//! Purpose
//! - `project`: push every inventory of the root task through the symmetry
//!   group, recording which tasks each transformed inventory realizes.
//! - `solve`: choose the fewest orientations `O` containing the root such
//!   that every member of `O` has a realization drawn from `O` alone.
//!
//! Method
//! - Candidate realizations per task are reduced to inclusion-minimal ones.
//! - A greedy closure expansion gives an initial table; a depth-first
//!   branch-and-bound then searches for strictly smaller tables. A pending
//!   task with a realization already inside the table is assigned without
//!   branching. The bound is the table size plus the largest cheapest
//!   extension over pending tasks.
//! - `ClosureCfg::node_budget` caps the exact phase; `proven_minimal` reports
//!   whether it finished.

mod mask;
mod project;
mod search;

pub use project::{project, SatisfiedParents};
pub use search::{solve, solve_with, ClosureTable};

use std::fmt;

use crate::cfg::DEFAULT_NODE_BUDGET;
use crate::gray::DimensionError;
use crate::symmetry::Task;

/// Closure search configuration.
#[derive(Clone, Copy, Debug)]
pub struct ClosureCfg {
    /// Nodes the branch-and-bound may expand. `None` searches to the end.
    pub node_budget: Option<u64>,
}

impl Default for ClosureCfg {
    fn default() -> Self {
        Self {
            node_budget: Some(DEFAULT_NODE_BUDGET),
        }
    }
}

/// Reasons `solve` cannot produce a table.
#[derive(Debug)]
pub enum SolveError {
    Dimension(DimensionError),
    RootOutOfRange { root: Task, dim: u32 },
    NoSolutions,
    Unsatisfiable { task: Task },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(e) => write!(f, "{e}"),
            Self::RootOutOfRange { root, dim } => write!(
                f,
                "root task (start={}, axis={}) lies outside dimension {dim}",
                root.start, root.top_dim
            ),
            Self::NoSolutions => write!(f, "no inventories to project"),
            Self::Unsatisfiable { task } => write!(
                f,
                "task (start={}, axis={}) has no realization",
                task.start, task.top_dim
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dimension(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DimensionError> for SolveError {
    fn from(e: DimensionError) -> Self {
        Self::Dimension(e)
    }
}

#[cfg(test)]
mod tests;
