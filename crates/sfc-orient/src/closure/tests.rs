//! Projection and closure-table tests; D=2 is cross-checked by brute force.

use std::collections::BTreeSet;

use super::mask::TaskMask;
use super::*;
use crate::symmetry::SymmetryGroup;
use crate::traverse::{traverse, OrientationSet, SolutionCollection};

fn inventories(dim: u32) -> SolutionCollection {
    traverse(dim).unwrap().solutions
}

fn exhaustive() -> ClosureCfg {
    ClosureCfg { node_budget: None }
}

/// Smallest closed table by enumerating every task subset containing the root.
fn brute_force_min(dim: u32, satisfied: &SatisfiedParents) -> usize {
    let tasks: Vec<Task> = Task::all(dim).collect();
    let root = Task::root(dim).index(dim);
    let realizes = |t: &Task, members: &BTreeSet<Task>| {
        satisfied.iter().any(|(set, parents)| {
            parents.contains(t) && set.iter().all(|o| o.task().is_some_and(|x| members.contains(&x)))
        })
    };
    (0u64..1 << tasks.len())
        .filter(|bits| (bits >> root) & 1 == 1)
        .filter_map(|bits| {
            let members: BTreeSet<Task> = tasks
                .iter()
                .enumerate()
                .filter(|(i, _)| (bits >> i) & 1 == 1)
                .map(|(_, t)| *t)
                .collect();
            members
                .iter()
                .all(|t| realizes(t, &members))
                .then_some(members.len())
        })
        .min()
        .unwrap()
}

#[test]
fn task_mask_basics() {
    let mut a = TaskMask::new(130);
    a.insert(0);
    a.insert(64);
    a.insert(129);
    assert_eq!(a.len(), 3);
    assert_eq!(a.iter().collect::<Vec<_>>(), vec![0, 64, 129]);
    let mut b = TaskMask::new(130);
    b.insert(64);
    assert!(b.is_subset(&a) && !a.is_subset(&b));
    assert_eq!(a.count_outside(&b), 2);
    b.union_with(&a);
    assert_eq!(b, a);
}

#[test]
fn projection_d2_covers_every_task_once_per_element() {
    let sols = inventories(2);
    let root = Task::root(2);
    let sat = project(2, root, &sols);
    assert!(sat.len() <= SymmetryGroup::order(2) as usize);
    assert!(sat.keys().all(|k| k.len() == 3));
    let total: usize = sat.values().map(BTreeSet::len).sum();
    assert_eq!(total as u64, SymmetryGroup::order(2));
    let parents: BTreeSet<Task> = sat.values().flatten().copied().collect();
    assert_eq!(parents.len(), Task::count(2));
    let inventory = sols.iter().next().unwrap();
    assert!(sat[inventory].contains(&root));
}

#[test]
fn projection_matches_independent_pairs() {
    let sols = inventories(3);
    let root = Task::root(3);
    let sat = project(3, root, &sols);
    let expect: BTreeSet<(OrientationSet, Task)> = SymmetryGroup::new(3)
        .flat_map(|g| {
            let parent = g.apply_task(root);
            sols.iter()
                .map(|r| (g.apply_set(r), parent))
                .collect::<Vec<_>>()
        })
        .collect();
    let got: BTreeSet<(OrientationSet, Task)> = sat
        .iter()
        .flat_map(|(k, ps)| ps.iter().map(move |p| (k.clone(), *p)))
        .collect();
    assert_eq!(got, expect);
    let parents: BTreeSet<Task> = sat.values().flatten().copied().collect();
    assert_eq!(parents.len(), Task::count(3));
}

#[test]
fn d1_table_is_the_root_alone() {
    let t = solve_with(1, Task::root(1), &inventories(1), exhaustive()).unwrap();
    assert_eq!(t.size(), 1);
    assert!(t.is_closed());
    assert!(t.proven_minimal);
    assert_eq!(t.realizations_used, 1);
}

#[test]
fn d2_exact_matches_brute_force() {
    let sols = inventories(2);
    let root = Task::root(2);
    let sat = project(2, root, &sols);
    let t = solve_with(2, root, &sols, exhaustive()).unwrap();
    assert!(t.is_closed());
    assert!(t.realizations_valid(&sat));
    assert!(t.proven_minimal);
    assert!(t.size() <= t.greedy_size);
    assert_eq!(t.size(), brute_force_min(2, &sat));
}

#[test]
fn d3_table_is_closed_and_no_worse_than_greedy() {
    let sols = inventories(3);
    let root = Task::root(3);
    let sat = project(3, root, &sols);
    let t = solve_with(3, root, &sols, exhaustive()).unwrap();
    assert!(t.is_closed());
    assert!(t.realizations_valid(&sat));
    assert!(t.proven_minimal);
    assert!(t.size() <= t.greedy_size);
    assert!(t.orientations.contains(&root.orientation()));
    assert_eq!(t.assignments.len(), t.size());
}

#[test]
fn zero_budget_returns_greedy_table_unproven() {
    let sols = inventories(3);
    let cfg = ClosureCfg {
        node_budget: Some(0),
    };
    let t = solve_with(3, Task::root(3), &sols, cfg).unwrap();
    assert!(!t.proven_minimal);
    assert_eq!(t.nodes, 0);
    assert_eq!(t.size(), t.greedy_size);
    assert!(t.is_closed());
}

#[test]
fn rejects_bad_inputs() {
    let sols = inventories(2);
    assert!(matches!(
        solve(0, Task::root(0), &sols),
        Err(SolveError::Dimension(_))
    ));
    assert!(matches!(
        solve(2, Task::new(4, 0), &sols),
        Err(SolveError::RootOutOfRange { .. })
    ));
    assert!(matches!(
        solve(2, Task::root(2), &SolutionCollection::new()),
        Err(SolveError::NoSolutions)
    ));
    let err = solve(2, Task::new(0, 2), &sols).unwrap_err();
    assert!(err.to_string().contains("outside dimension 2"));
}
