//! Ordered-container helpers over any [`Node`] arena.
//!
//! These walk `p` / `l` / `r` links only and never restructure the tree, so
//! the balancing layer can share them with any node layout.
//!
//! Key-based lookups take a `key_of` accessor closure so callers can use
//! arena-backed node layouts.

pub mod swap;

use crate::types::Node;

pub use swap::swap_content;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree under `root`, counting nodes; an empty tree is `0`.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i))),
    }
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct Link {
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
        k: i32,
    }

    impl Node for Link {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    //      0:20
    //     /    \
    //   1:10   2:30
    //      \
    //      3:15
    fn sample() -> Vec<Link> {
        vec![
            Link { p: None, l: Some(1), r: Some(2), k: 20 },
            Link { p: Some(0), l: None, r: Some(3), k: 10 },
            Link { p: Some(0), l: None, r: None, k: 30 },
            Link { p: Some(1), l: None, r: None, k: 15 },
        ]
    }

    #[test]
    fn walks_in_order_both_ways() {
        let arena = sample();
        let mut forward = Vec::new();
        let mut curr = first(&arena, Some(0));
        while let Some(i) = curr {
            forward.push(arena[i as usize].k);
            curr = next(&arena, i);
        }
        assert_eq!(forward, vec![10, 15, 20, 30]);

        let mut backward = Vec::new();
        let mut curr = last(&arena, Some(0));
        while let Some(i) = curr {
            backward.push(arena[i as usize].k);
            curr = prev(&arena, i);
        }
        assert_eq!(backward, vec![30, 20, 15, 10]);
    }

    #[test]
    fn size_height_and_find() {
        let arena = sample();
        assert_eq!(size(&arena, Some(0)), 4);
        assert_eq!(size::<Link>(&arena, None), 0);
        assert_eq!(height(&arena, Some(0)), 3);
        assert_eq!(height(&arena, Some(2)), 1);

        let cmp = |a: &i32, b: &i32| a - b;
        assert_eq!(find(&arena, Some(0), &15, |n| &n.k, cmp), Some(3));
        assert_eq!(find(&arena, Some(0), &16, |n| &n.k, cmp), None);
        assert_eq!(find(&arena, None, &20, |n| &n.k, cmp), None);
    }
}
