//! Smallest closed orientation table: greedy incumbent + branch-and-bound.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::gray::{validate_dimension, DimensionError};
use crate::symmetry::Task;
use crate::traverse::{Orientation, OrientationSet, SolutionCollection};

use super::mask::TaskMask;
use super::project::{project, SatisfiedParents};
use super::{ClosureCfg, SolveError};

/// Closed orientation table with one chosen realization per member.
#[derive(Clone, Debug, Serialize)]
pub struct ClosureTable {
    pub dim: u32,
    pub root: Task,
    /// Table members as orientations, in task-index order.
    pub orientations: Vec<Orientation>,
    /// Realization used to subdivide each member.
    #[serde(serialize_with = "as_pairs")]
    pub assignments: BTreeMap<Task, OrientationSet>,
    /// Distinct realizations among `assignments`.
    pub realizations_used: usize,
    /// Size of the greedy table the exact phase started from.
    pub greedy_size: usize,
    /// False when the node budget ran out before the search space did.
    pub proven_minimal: bool,
    pub nodes: u64,
}

impl ClosureTable {
    #[inline]
    pub fn size(&self) -> usize {
        self.orientations.len()
    }

    /// Every member has a realization made only of members, and the root is
    /// a member.
    pub fn is_closed(&self) -> bool {
        let members: BTreeSet<Orientation> = self.orientations.iter().copied().collect();
        members.contains(&self.root.orientation())
            && self.orientations.iter().all(|o| {
                o.task()
                    .and_then(|t| self.assignments.get(&t))
                    .is_some_and(|r| r.iter().all(|x| members.contains(x)))
            })
    }

    /// Every assignment is one of the realizations recorded in `satisfied`.
    pub fn realizations_valid(&self, satisfied: &SatisfiedParents) -> bool {
        self.assignments
            .iter()
            .all(|(t, r)| satisfied.get(r).is_some_and(|parents| parents.contains(t)))
    }
}

/// JSON object keys must be strings; emit `[task, set]` pairs instead.
fn as_pairs<S: serde::Serializer>(
    map: &BTreeMap<Task, OrientationSet>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    ser.collect_seq(map.iter())
}

/// Smallest closed table containing `root`, with the default budget.
pub fn solve(
    dim: u32,
    root: Task,
    solutions: &SolutionCollection,
) -> Result<ClosureTable, SolveError> {
    solve_with(dim, root, solutions, ClosureCfg::default())
}

/// Smallest closed table containing `root`.
///
/// Objective: fewest member orientations. The greedy table is always
/// available; the exact phase replaces it only by strictly smaller tables.
pub fn solve_with(
    dim: u32,
    root: Task,
    solutions: &SolutionCollection,
    cfg: ClosureCfg,
) -> Result<ClosureTable, SolveError> {
    validate_dimension(dim)?;
    if dim == 0 {
        return Err(DimensionError::degenerate(0, "a 0-cube has no tasks").into());
    }
    if !root.is_within(dim) {
        return Err(SolveError::RootOutOfRange { root, dim });
    }
    if solutions.is_empty() {
        return Err(SolveError::NoSolutions);
    }
    let satisfied = project(dim, root, solutions);
    let candidates = Candidates::build(dim, &satisfied);
    let mut bnb = BranchAndBound::new(&candidates, cfg.node_budget);
    let root_ix = root.index(dim);
    let greedy = bnb.greedy(root_ix)?;
    let greedy_size = greedy.table.len();
    bnb.best = Some(greedy);

    let mut table = TaskMask::new(candidates.num_tasks);
    table.insert(root_ix);
    let mut assign: Vec<Option<usize>> = vec![None; candidates.num_tasks];
    bnb.recur(table, &mut assign);

    let proven_minimal = !bnb.budget_hit;
    if !proven_minimal {
        warn!(nodes = bnb.nodes, "closure node budget spent; table may not be minimal");
    }
    let nodes = bnb.nodes;
    let Some(best) = bnb.best else {
        return Err(SolveError::Unsatisfiable { task: root });
    };
    let out = best.into_table(dim, root, &candidates, greedy_size, proven_minimal, nodes);
    info!(
        dim,
        size = out.size(),
        greedy = greedy_size,
        realizations = out.realizations_used,
        proven = proven_minimal,
        nodes,
        "closure table"
    );
    Ok(out)
}

/// Per-task realizations as task masks, inclusion-minimal, smallest first.
struct Candidates {
    dim: u32,
    num_tasks: usize,
    masks: Vec<TaskMask>,
    sets: Vec<OrientationSet>,
    by_task: Vec<Vec<usize>>,
}

impl Candidates {
    fn build(dim: u32, satisfied: &SatisfiedParents) -> Self {
        let num_tasks = Task::count(dim);
        let mut masks = Vec::with_capacity(satisfied.len());
        let mut sets = Vec::with_capacity(satisfied.len());
        let mut raw: Vec<Vec<usize>> = vec![Vec::new(); num_tasks];
        for (set, parents) in satisfied {
            let mut mask = TaskMask::new(num_tasks);
            let mut single_axis = true;
            for o in set.iter() {
                match o.task() {
                    Some(t) => mask.insert(t.index(dim)),
                    None => single_axis = false,
                }
            }
            if !single_axis {
                warn!(?set, "skipping inventory with a multi-axis displacement");
                continue;
            }
            let id = masks.len();
            masks.push(mask);
            sets.push(set.clone());
            for p in parents {
                raw[p.index(dim)].push(id);
            }
        }

        // Keep only inclusion-minimal realizations per task.
        let by_task = raw
            .into_iter()
            .map(|mut ids| {
                ids.sort_by_key(|&id| (masks[id].len(), id));
                let mut kept: Vec<usize> = Vec::new();
                for id in ids {
                    if !kept.iter().any(|&k| masks[k].is_subset(&masks[id])) {
                        kept.push(id);
                    }
                }
                kept
            })
            .collect::<Vec<_>>();
        debug!(
            dim,
            realizations = masks.len(),
            kept = by_task.iter().map(Vec::len).sum::<usize>(),
            "closure candidates"
        );
        Self {
            dim,
            num_tasks,
            masks,
            sets,
            by_task,
        }
    }
}

/// A closed table under construction or finished.
#[derive(Clone, Debug)]
struct Incumbent {
    table: TaskMask,
    assign: Vec<Option<usize>>,
}

impl Incumbent {
    fn into_table(
        self,
        dim: u32,
        root: Task,
        cands: &Candidates,
        greedy_size: usize,
        proven_minimal: bool,
        nodes: u64,
    ) -> ClosureTable {
        let members: Vec<Task> = self.table.iter().map(|i| Task::from_index(i, dim)).collect();
        let assignments: BTreeMap<Task, OrientationSet> = members
            .iter()
            .filter_map(|t| self.assign[t.index(dim)].map(|id| (*t, cands.sets[id].clone())))
            .collect();
        let realizations_used = members
            .iter()
            .filter_map(|t| self.assign[t.index(dim)])
            .collect::<BTreeSet<_>>()
            .len();
        ClosureTable {
            dim,
            root,
            orientations: members.iter().map(Task::orientation).collect(),
            assignments,
            realizations_used,
            greedy_size,
            proven_minimal,
            nodes,
        }
    }
}

struct BranchAndBound<'a> {
    c: &'a Candidates,
    budget: Option<u64>,
    nodes: u64,
    budget_hit: bool,
    best: Option<Incumbent>,
    /// Tasks assigned on the current branch, for undo.
    trail: Vec<usize>,
}

impl<'a> BranchAndBound<'a> {
    fn new(c: &'a Candidates, budget: Option<u64>) -> Self {
        Self {
            c,
            budget,
            nodes: 0,
            budget_hit: false,
            best: None,
            trail: Vec::new(),
        }
    }

    fn best_size(&self) -> usize {
        self.best.as_ref().map_or(usize::MAX, |b| b.table.len())
    }

    /// Repeatedly subdivide the lowest pending task with the realization that
    /// adds the fewest new members.
    fn greedy(&self, root_ix: usize) -> Result<Incumbent, SolveError> {
        let mut table = TaskMask::new(self.c.num_tasks);
        table.insert(root_ix);
        let mut assign = vec![None; self.c.num_tasks];
        loop {
            let Some(t) = table.iter().find(|&t| assign[t].is_none()) else {
                break;
            };
            let Some(&id) = self.c.by_task[t]
                .iter()
                .min_by_key(|&&id| (self.c.masks[id].count_outside(&table), id))
            else {
                return Err(SolveError::Unsatisfiable {
                    task: Task::from_index(t, self.c.dim),
                });
            };
            assign[t] = Some(id);
            table.union_with(&self.c.masks[id]);
        }
        debug!(size = table.len(), "greedy closure");
        Ok(Incumbent { table, assign })
    }

    /// Assign every pending task that has a realization inside `table`.
    /// Returns the pending tasks that still need branching.
    fn settle_free(&mut self, table: &TaskMask, assign: &mut [Option<usize>]) -> Vec<usize> {
        let mut pending = Vec::new();
        for t in table.iter() {
            if assign[t].is_some() {
                continue;
            }
            let inside = self.c.by_task[t]
                .iter()
                .copied()
                .find(|&id| self.c.masks[id].is_subset(table));
            match inside {
                Some(id) => {
                    assign[t] = Some(id);
                    self.trail.push(t);
                }
                None => pending.push(t),
            }
        }
        pending
    }

    fn recur(&mut self, table: TaskMask, assign: &mut [Option<usize>]) {
        if self.budget.is_some_and(|b| self.nodes >= b) {
            self.budget_hit = true;
            return;
        }
        self.nodes += 1;
        let mark = self.trail.len();
        let pending = self.settle_free(&table, assign);

        if pending.is_empty() {
            if table.len() < self.best_size() {
                self.best = Some(Incumbent {
                    table,
                    assign: assign.to_vec(),
                });
            }
            self.undo(mark, assign);
            return;
        }

        // Each pending task must add at least its cheapest realization.
        let mut branch_task = pending[0];
        let mut fewest = usize::MAX;
        let mut lower = 0;
        for &t in &pending {
            let cands = &self.c.by_task[t];
            let cheapest = cands
                .iter()
                .map(|&id| self.c.masks[id].count_outside(&table))
                .min()
                .unwrap_or(usize::MAX);
            lower = lower.max(cheapest);
            if cands.len() < fewest {
                fewest = cands.len();
                branch_task = t;
            }
        }
        if lower == usize::MAX || table.len() + lower >= self.best_size() {
            self.undo(mark, assign);
            return;
        }

        let mut order: Vec<(usize, usize)> = self.c.by_task[branch_task]
            .iter()
            .map(|&id| (self.c.masks[id].count_outside(&table), id))
            .collect();
        order.sort_unstable();
        for (added, id) in order {
            if table.len() + added >= self.best_size() || self.budget_hit {
                break;
            }
            let mut next = table.clone();
            next.union_with(&self.c.masks[id]);
            assign[branch_task] = Some(id);
            self.trail.push(branch_task);
            let inner = self.trail.len();
            self.recur(next, assign);
            self.undo(inner - 1, assign);
        }
        self.undo(mark, assign);
    }

    fn undo(&mut self, mark: usize, assign: &mut [Option<usize>]) {
        for t in self.trail.drain(mark..) {
            assign[t] = None;
        }
    }
}
