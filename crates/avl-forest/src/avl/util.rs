use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::AvlError;
use crate::types::{KvNode, Node};
use crate::util::{first, get_l, get_p, get_r, last, next, set_l, set_p, set_r, size, swap_content};

use super::types::{AvlNode, Shape};

#[inline]
fn bf<K, V>(arena: &[AvlNode<K, V>], i: u32) -> i8 {
    arena[i as usize].bf
}

#[inline]
fn set_bf<K, V>(arena: &mut [AvlNode<K, V>], i: u32, v: i8) {
    arena[i as usize].bf = v;
}

/// Points whatever held `old` (the child link of `p`, or the root when `p` is
/// `None`) at `new`. Returns the root.
fn replace_child<K, V>(
    arena: &mut [AvlNode<K, V>],
    root: Option<u32>,
    p: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    let Some(p) = p else {
        return new;
    };
    if get_l(arena, p) == Some(old) {
        set_l(arena, p, new);
    } else {
        set_r(arena, p, new);
    }
    root
}

/// Promotes the left child of `pivot` to the top of its subtree.
///
/// ```text
///       pivot          top
///       /    \        /   \
///     top     c  →   a   pivot
///    /   \               /   \
///   a     b             b     c
/// ```
///
/// Balance factors are left for the caller. No-op when `pivot` has no left
/// child. Returns the (possibly new) tree root.
pub fn rotate_right<K, V>(arena: &mut [AvlNode<K, V>], root: Option<u32>, pivot: u32) -> Option<u32> {
    let Some(top) = get_l(arena, pivot) else {
        return root;
    };
    let p = get_p(arena, pivot);
    let moved = get_r(arena, top);

    set_p(arena, top, p);
    set_l(arena, pivot, moved);
    if let Some(moved) = moved {
        set_p(arena, moved, Some(pivot));
    }
    let root = replace_child(arena, root, p, pivot, Some(top));
    set_r(arena, top, Some(pivot));
    set_p(arena, pivot, Some(top));

    trace!(pivot = pivot, top = top, "rotate right");
    root
}

/// Mirror of [`rotate_right`]: promotes the right child of `pivot`.
pub fn rotate_left<K, V>(arena: &mut [AvlNode<K, V>], root: Option<u32>, pivot: u32) -> Option<u32> {
    let Some(top) = get_r(arena, pivot) else {
        return root;
    };
    let p = get_p(arena, pivot);
    let moved = get_l(arena, top);

    set_p(arena, top, p);
    set_r(arena, pivot, moved);
    if let Some(moved) = moved {
        set_p(arena, moved, Some(pivot));
    }
    let root = replace_child(arena, root, p, pivot, Some(top));
    set_l(arena, top, Some(pivot));
    set_p(arena, pivot, Some(top));

    trace!(pivot = pivot, top = top, "rotate left");
    root
}

/// Classifies the chain `n` → `p` → `g`, where `p` is a child of `g` and `n`
/// a child of `p`.
pub fn classify<K, V>(arena: &[AvlNode<K, V>], n: u32, p: u32, g: u32) -> Shape {
    let p_is_left = get_l(arena, g) == Some(p);
    let n_is_left = get_l(arena, p) == Some(n);
    match (p_is_left, n_is_left) {
        (true, true) => Shape::ZigZigLeft,
        (false, false) => Shape::ZigZigRight,
        (true, false) => Shape::ZigZagLeft,
        (false, true) => Shape::ZigZagRight,
    }
}

/// Inserts `key` → `value` into the tree rooted at `root`.
///
/// An existing key gets its value replaced in place and the previous value is
/// returned; the shape and every balance factor stay as they were. Otherwise a
/// new leaf is pushed onto the arena and the tree is rebalanced.
///
/// Returns the new root and the replaced value, if any.
pub fn insert<K, V, C>(
    arena: &mut Vec<AvlNode<K, V>>,
    root: Option<u32>,
    key: K,
    value: V,
    comparator: &C,
) -> (Option<u32>, Option<V>)
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        arena.push(AvlNode::new(key, value, None));
        let n = (arena.len() - 1) as u32;
        debug!(node = n, "insert into empty tree");
        return (Some(n), None);
    };

    loop {
        let cmp = comparator(&key, arena[curr as usize].key());
        if cmp == 0 {
            let old = arena[curr as usize].set_value(value);
            return (root, Some(old));
        }
        let next = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        if let Some(next) = next {
            curr = next;
            continue;
        }

        arena.push(AvlNode::new(key, value, Some(curr)));
        let n = (arena.len() - 1) as u32;
        let diff = if cmp < 0 {
            set_l(arena, curr, Some(n));
            -1
        } else {
            set_r(arena, curr, Some(n));
            1
        };
        debug!(node = n, parent = curr, "insert leaf");

        // A parent leaning one way just got its shorter side filled.
        if bf(arena, curr) != 0 {
            set_bf(arena, curr, 0);
            return (root, None);
        }
        arena[curr as usize].update_bf(diff);
        return (insert_fix(arena, root, curr, n), None);
    }
}

/// Propagates a height increase of `p` (whose child `n` just grew) up the
/// ancestor chain, rotating once if some ancestor tips to ±2.
///
/// Returns the tree root.
pub fn insert_fix<K, V>(arena: &mut [AvlNode<K, V>], root: Option<u32>, p: u32, n: u32) -> Option<u32> {
    let (mut p, mut n) = (p, n);
    loop {
        if bf(arena, p).abs() != 1 && bf(arena, n).abs() != 1 {
            return root;
        }
        let Some(g) = get_p(arena, p) else {
            return root;
        };

        let shape = classify(arena, n, p, g);
        arena[g as usize].update_bf(shape.lean());
        match bf(arena, g) {
            0 => return root,
            -1 | 1 => {
                n = p;
                p = g;
            }
            _ => return resolve_insert(arena, root, shape, n, p, g),
        }
    }
}

fn resolve_insert<K, V>(
    arena: &mut [AvlNode<K, V>],
    root: Option<u32>,
    shape: Shape,
    n: u32,
    p: u32,
    g: u32,
) -> Option<u32> {
    trace!(?shape, grandparent = g, "insert fix-up rotation");
    match shape {
        Shape::ZigZigLeft | Shape::ZigZigRight => {
            let root = if shape == Shape::ZigZigLeft {
                rotate_right(arena, root, g)
            } else {
                rotate_left(arena, root, g)
            };
            set_bf(arena, p, 0);
            set_bf(arena, g, 0);
            root
        }
        Shape::ZigZagLeft | Shape::ZigZagRight => {
            let nbf = bf(arena, n);
            let root = if shape == Shape::ZigZagLeft {
                let root = rotate_left(arena, root, p);
                rotate_right(arena, root, g)
            } else {
                let root = rotate_right(arena, root, p);
                rotate_left(arena, root, g)
            };
            let (pbf, gbf) = match (shape, nbf) {
                (_, 0) => (0, 0),
                (Shape::ZigZagLeft, -1) => (0, 1),
                (Shape::ZigZagLeft, _) => (-1, 0),
                (Shape::ZigZagRight, 1) => (0, -1),
                (_, _) => (1, 0),
            };
            set_bf(arena, p, pbf);
            set_bf(arena, g, gbf);
            set_bf(arena, n, 0);
            root
        }
    }
}

/// Removes the node holding `key` from the tree rooted at `root`.
///
/// A node with two children first trades key and value with its in-order
/// predecessor, so the slot actually unlinked has at most one child. Balance
/// factors describe tree positions and stay with their slots. The unlinked
/// slot is released from the arena (see [`release`]).
///
/// Returns the new root and the removed entry, or `None` if `key` is absent.
pub fn remove<K, V, C>(
    arena: &mut Vec<AvlNode<K, V>>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> (Option<u32>, Option<(K, V)>)
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut n) = crate::util::find(arena, root, key, |n| &n.k, comparator) else {
        return (root, None);
    };

    if let (Some(l), Some(_)) = (get_l(arena, n), get_r(arena, n)) {
        let pre = last(arena, Some(l)).expect("left subtree has a rightmost node");
        swap_content(arena, n, pre);
        n = pre;
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    let diff = match p {
        Some(p) if get_l(arena, p) == Some(n) => 1,
        Some(_) => -1,
        None => 0,
    };

    if let Some(child) = child {
        set_p(arena, child, p);
    }
    let mut root = replace_child(arena, root, p, n, child);
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    debug!(node = n, leaf = child.is_none(), "unlink node");

    if let Some(p) = p {
        root = remove_fix(arena, root, p, diff);
    }

    let (root, node) = release(arena, root, n);
    (root, Some((node.k, node.v)))
}

/// Restores balance after the subtree on one side of `n` shrank by one level.
///
/// `diff` is added to the stored balance of `n`: `+1` when the left side
/// shrank, `-1` when the right side did. Climbs while subtree heights keep
/// shrinking. Returns the tree root.
pub fn remove_fix<K, V>(arena: &mut [AvlNode<K, V>], root: Option<u32>, n: u32, diff: i8) -> Option<u32> {
    let mut root = root;
    let mut curr = Some(n);
    let mut diff = diff;

    while let Some(n) = curr {
        let p = get_p(arena, n);
        let ndiff = match p {
            Some(p) if get_l(arena, p) == Some(n) => 1,
            Some(_) => -1,
            None => 0,
        };

        match bf(arena, n) + diff {
            -2 => {
                let c = get_l(arena, n).expect("left-heavy node has a left child");
                match bf(arena, c) {
                    -1 => {
                        root = rotate_right(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                    }
                    0 => {
                        root = rotate_right(arena, root, n);
                        set_bf(arena, n, -1);
                        set_bf(arena, c, 1);
                        return root;
                    }
                    _ => {
                        let g = get_r(arena, c).expect("right-leaning child has a right child");
                        let gbf = bf(arena, g);
                        root = rotate_left(arena, root, c);
                        root = rotate_right(arena, root, n);
                        let (nbf, cbf) = match gbf {
                            1 => (0, -1),
                            0 => (0, 0),
                            _ => (1, 0),
                        };
                        set_bf(arena, n, nbf);
                        set_bf(arena, c, cbf);
                        set_bf(arena, g, 0);
                    }
                }
            }
            2 => {
                let c = get_r(arena, n).expect("right-heavy node has a right child");
                match bf(arena, c) {
                    1 => {
                        root = rotate_left(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                    }
                    0 => {
                        root = rotate_left(arena, root, n);
                        set_bf(arena, n, 1);
                        set_bf(arena, c, -1);
                        return root;
                    }
                    _ => {
                        let g = get_l(arena, c).expect("left-leaning child has a left child");
                        let gbf = bf(arena, g);
                        root = rotate_right(arena, root, c);
                        root = rotate_left(arena, root, n);
                        let (nbf, cbf) = match gbf {
                            -1 => (0, 1),
                            0 => (0, 0),
                            _ => (-1, 0),
                        };
                        set_bf(arena, n, nbf);
                        set_bf(arena, c, cbf);
                        set_bf(arena, g, 0);
                    }
                }
            }
            b @ (-1 | 1) => {
                set_bf(arena, n, b);
                return root;
            }
            0 => set_bf(arena, n, 0),
            b => unreachable!("provisional balance {b} outside -2..=2"),
        }

        trace!(node = n, "remove fix-up climbs");
        curr = p;
        diff = ndiff;
    }

    root
}

/// Frees slot `idx`, which must already be unlinked from the tree.
///
/// The last arena slot is moved into `idx` and every link pointing at it is
/// re-pointed, so the arena stays dense. Returns the root (which changes when
/// the moved node was the root) and the freed node.
pub fn release<K, V>(
    arena: &mut Vec<AvlNode<K, V>>,
    root: Option<u32>,
    idx: u32,
) -> (Option<u32>, AvlNode<K, V>) {
    let moved_from = (arena.len() - 1) as u32;
    let node = arena.swap_remove(idx as usize);
    if idx == moved_from {
        return (root, node);
    }

    if let Some(l) = get_l(arena, idx) {
        set_p(arena, l, Some(idx));
    }
    if let Some(r) = get_r(arena, idx) {
        set_p(arena, r, Some(idx));
    }
    let p = get_p(arena, idx);
    let root = replace_child(arena, root, p, moved_from, Some(idx));
    (root, node)
}

fn balanced_height<K, V>(arena: &[AvlNode<K, V>], node: Option<u32>) -> Option<usize> {
    let Some(i) = node else {
        return Some(0);
    };
    let lh = balanced_height(arena, get_l(arena, i))?;
    let rh = balanced_height(arena, get_r(arena, i))?;
    if lh.abs_diff(rh) > 1 {
        return None;
    }
    Some(1 + lh.max(rh))
}

/// Checks the height property from recomputed heights, ignoring stored
/// balance factors.
pub fn is_balanced<K, V>(arena: &[AvlNode<K, V>], root: Option<u32>) -> bool {
    balanced_height(arena, root).is_some()
}

fn validate_links_and_bf<K, V>(arena: &[AvlNode<K, V>], node: u32) -> Result<usize, AvlError> {
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let mut lh = 0;
    if let Some(l) = l {
        if get_p(arena, l) != Some(node) {
            return Err(AvlError::Invariant(format!("broken parent link on left child of {node}")));
        }
        lh = validate_links_and_bf(arena, l)?;
    }
    let mut rh = 0;
    if let Some(r) = r {
        if get_p(arena, r) != Some(node) {
            return Err(AvlError::Invariant(format!("broken parent link on right child of {node}")));
        }
        rh = validate_links_and_bf(arena, r)?;
    }

    let expected = rh as i64 - lh as i64;
    let actual = bf(arena, node);
    if i64::from(actual) != expected {
        return Err(AvlError::Invariant(format!(
            "balance factor mismatch at {node}: expected {expected}, got {actual}"
        )));
    }
    if !(-1..=1).contains(&actual) {
        return Err(AvlError::Invariant(format!("height balance violated at {node}")));
    }

    Ok(1 + lh.max(rh))
}

/// Verifies links, balance factors, the height property, key order and that
/// every arena slot is reachable from `root`.
pub fn assert_avl_tree<K, V, C>(arena: &[AvlNode<K, V>], root: Option<u32>, comparator: &C) -> Result<(), AvlError>
where
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        if arena.is_empty() {
            return Ok(());
        }
        return Err(AvlError::Invariant(format!("empty tree owns {} slots", arena.len())));
    };

    if get_p(arena, root).is_some() {
        return Err(AvlError::Invariant("root has parent".to_string()));
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(AvlError::Invariant("node order violated".to_string()));
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    let reachable = size(arena, Some(root));
    if reachable != arena.len() {
        return Err(AvlError::Invariant(format!(
            "{reachable} reachable nodes, {} arena slots",
            arena.len()
        )));
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K: Debug, V: Debug>(arena: &[AvlNode<K, V>], node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf,
                n.key(),
                n.value()
            )
        }
    }
}
