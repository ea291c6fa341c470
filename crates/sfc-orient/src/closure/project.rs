//! Projection of single-task inventories through the symmetry group.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::symmetry::{SymmetryGroup, Task};
use crate::traverse::{OrientationSet, SolutionCollection};

/// Which tasks each orientation set can subdivide.
pub type SatisfiedParents = BTreeMap<OrientationSet, BTreeSet<Task>>;

/// For every symmetry `g` and inventory `r`, record that `g(r)` realizes
/// `g(root)`.
pub fn project(dim: u32, root: Task, solutions: &SolutionCollection) -> SatisfiedParents {
    let mut satisfied = SatisfiedParents::new();
    for g in SymmetryGroup::new(dim) {
        let parent = g.apply_task(root);
        for r in solutions {
            satisfied.entry(g.apply_set(r)).or_default().insert(parent);
        }
    }
    debug!(
        dim,
        inventories = solutions.len(),
        projected = satisfied.len(),
        "projection"
    );
    satisfied
}
