use lazy_bst::{Error, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a model mapping each physical value to whether
/// it is live. This way we can ensure that after a random smattering of inserts and deletes the
/// tree reports the same changes and shows the same values as the model.
fn do_ops<E>(ops: &[Op<E>], tree: &mut Tree<E>, model: &mut BTreeMap<E, bool>) -> bool
where
    E: Ord + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(x) => {
            let changed = model.insert(x.clone(), true) != Some(true);
            tree.insert(x.clone()) == changed
        }
        Op::Remove(x) => match model.get_mut(x) {
            Some(live) => {
                let was_live = std::mem::replace(live, false);
                tree.remove(x) == Ok(was_live)
            }
            None => tree.remove(x) == Err(Error::NotFound),
        },
        Op::RemoveHard(x) => tree.remove_hard(x) == model.remove(x).is_some(),
    })
}

/// The live values of a model, in order.
fn live_values<E>(model: &BTreeMap<E, bool>) -> impl Iterator<Item = &E> {
    model.iter().filter(|(_, live)| **live).map(|(x, _)| x)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model)
        && tree.iter().eq(live_values(&model))
        && tree.iter_hard().eq(model.keys())
        && tree.size() == live_values(&model).count()
        && live_values(&model).all(|x| tree.find(x) == Ok(x))
}

#[quickcheck]
fn hard_traversal_is_sorted(xs: Vec<i16>, removes: Vec<i16>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    for x in &removes {
        let _ = tree.remove(x);
    }

    let mut seen = Vec::new();
    tree.traverse_hard(&mut |x: &i16| seen.push(*x));
    seen.windows(2).all(|w| w[0] < w[1]) && seen.len() == tree.size_hard()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::NotFound))
}

#[quickcheck]
fn tombstones_are_the_size_difference(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut tombstoned = HashSet::new();
    for x in &removes {
        if tree.remove(x) == Ok(true) {
            tombstoned.insert(*x);
        }
    }

    let before = tree.size_hard() - tree.size() == tombstoned.len();
    tree.collect_garbage();
    before && tree.size() == tree.size_hard() && tombstoned.iter().all(|x| !tree.contains(x))
}

#[quickcheck]
fn revival_reuses_the_node(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    tree.insert(x);
    let (size, size_hard) = (tree.size(), tree.size_hard());

    tree.remove(&x) == Ok(true)
        && tree.insert(x)
        && tree.find(&x) == Ok(&x)
        && tree.size() == size
        && tree.size_hard() == size_hard
}

#[quickcheck]
fn clone_is_independent(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    let _ = tree.remove(&0);
    let before: Vec<_> = tree.iter().copied().collect();
    let (size, size_hard) = (tree.size(), tree.size_hard());

    let mut copy = tree.clone();
    let same = copy.iter().eq(tree.iter()) && copy.iter_hard().eq(tree.iter_hard());

    let mut model: BTreeMap<_, _> = copy.iter_hard().map(|x| (*x, copy.contains(x))).collect();
    let agrees = do_ops(&ops, &mut copy, &mut model);
    copy.collect_garbage();

    same && agrees
        && tree.iter().copied().eq(before)
        && tree.size() == size
        && tree.size_hard() == size_hard
}

#[quickcheck]
fn min_and_max_are_the_live_extremes(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut live: BTreeSet<_> = xs.into_iter().collect();
    for x in &removes {
        let _ = tree.remove(x);
        live.remove(x);
    }

    match (live.iter().next(), live.iter().next_back()) {
        (Some(min), Some(max)) => tree.find_min() == Ok(min) && tree.find_max() == Ok(max),
        _ => {
            tree.find_min() == Err(Error::EmptyCollection)
                && tree.find_max() == Err(Error::EmptyCollection)
        }
    }
}
