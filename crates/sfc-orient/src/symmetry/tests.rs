use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::traverse::Orientation;

fn element(dim: u32) -> impl Strategy<Value = SymmetryElement> {
    let perm = Just((0..dim).collect::<Vec<u32>>()).prop_shuffle();
    (perm, 0..1u32 << dim).prop_map(|(p, f)| SymmetryElement::new(p, f))
}

fn task(dim: u32) -> impl Strategy<Value = Task> {
    (0..1u32 << dim, 0..dim).prop_map(|(s, k)| Task::new(s, k))
}

#[test]
fn permute_bits_examples() {
    assert_eq!(permute_bits(0b001, &[2, 0, 1]), 0b100);
    assert_eq!(permute_bits(0b011, &[2, 0, 1]), 0b101);
    assert_eq!(permute_bits(0b110, &[0, 1, 2]), 0b110);
    assert_eq!(permute_bits(0, &[1, 0]), 0);
}

#[test]
fn group_order_and_distinct_elements() {
    for dim in 0..=4u32 {
        let elems: Vec<_> = SymmetryGroup::new(dim).collect();
        assert_eq!(elems.len() as u64, SymmetryGroup::order(dim), "dim={dim}");
        let distinct: BTreeSet<_> = elems.iter().map(|e| (e.perm().to_vec(), e.flip())).collect();
        assert_eq!(distinct.len(), elems.len());
        assert_eq!(elems[0], SymmetryElement::identity(dim));
    }
    assert_eq!(SymmetryGroup::order(4), 384);
}

#[test]
fn permutations_are_lexicographic() {
    let p: Vec<_> = Permutations::new(3).collect();
    assert_eq!(
        p,
        vec![
            vec![0, 1, 2],
            vec![0, 2, 1],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![2, 1, 0],
        ]
    );
    assert_eq!(Permutations::new(0).count(), 1);
}

#[test]
fn group_is_transitive_on_tasks() {
    for dim in 1..=4u32 {
        let root = Task::root(dim);
        let orbit: BTreeSet<Task> = SymmetryGroup::new(dim).map(|g| g.apply_task(root)).collect();
        assert_eq!(orbit.len(), Task::count(dim), "dim={dim}");
    }
}

#[test]
fn flip_leaves_displacement_alone() {
    let g = SymmetryElement::new(vec![0, 1, 2], 0b111);
    let o = g.apply_orientation(Orientation::new(0b001, 0b010));
    assert_eq!(o, Orientation::new(0b110, 0b010));
    let h = SymmetryElement::new(vec![1, 2, 0], 0b000);
    let o = h.apply_orientation(Orientation::new(0b001, 0b100));
    assert_eq!(o, Orientation::new(0b010, 0b001));
}

#[test]
fn task_index_round_trip_covers_all() {
    let dim = 3;
    let all: Vec<_> = Task::all(dim).collect();
    assert_eq!(all.len(), 24);
    for (i, t) in all.iter().enumerate() {
        assert_eq!(t.index(dim), i);
        assert!(t.is_within(dim));
        assert_eq!(t.orientation().task(), Some(*t));
    }
    assert_eq!(Orientation::new(1, 0b011).task(), None);
    assert!(!Task::new(8, 0).is_within(3));
    assert!(!Task::new(0, 3).is_within(3));
}

#[test]
#[should_panic(expected = "not a permutation")]
fn rejects_non_permutation() {
    SymmetryElement::new(vec![0, 0], 0);
}

proptest! {
    #[test]
    fn permute_then_inverse_is_identity(
        (dim, x, g) in (1u32..=6).prop_flat_map(|d| (Just(d), 0..1u32 << d, element(d)))
    ) {
        let inv = g.inverse();
        prop_assert_eq!(permute_bits(permute_bits(x, g.perm()), inv.perm()), x);
        prop_assert_eq!(inv.apply_corner(g.apply_corner(x)), x);
        prop_assert_eq!(g.compose(&inv), SymmetryElement::identity(dim));
    }

    #[test]
    fn identity_acts_trivially((dim, t) in (1u32..=6).prop_flat_map(|d| (Just(d), task(d)))) {
        let id = SymmetryElement::identity(dim);
        prop_assert_eq!(id.apply_task(t), t);
        prop_assert_eq!(id.apply_orientation(t.orientation()), t.orientation());
    }

    #[test]
    fn action_is_compatible_with_composition(
        (t, g1, g2) in (1u32..=6).prop_flat_map(|d| (task(d), element(d), element(d)))
    ) {
        let composed = g2.compose(&g1);
        prop_assert_eq!(g2.apply_task(g1.apply_task(t)), composed.apply_task(t));
        let o = t.orientation();
        prop_assert_eq!(
            g2.apply_orientation(g1.apply_orientation(o)),
            composed.apply_orientation(o)
        );
    }

    #[test]
    fn task_and_orientation_actions_agree((t, g) in (1u32..=6).prop_flat_map(|d| (task(d), element(d)))) {
        prop_assert_eq!(g.apply_orientation(t.orientation()).task(), Some(g.apply_task(t)));
    }
}
