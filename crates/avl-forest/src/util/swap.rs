use std::mem;

use crate::types::KvNode;

/// Exchanges the key and value stored in slots `x` and `y`.
///
/// Links are left alone: both nodes keep their position, parent and children.
/// Node layouts with extra per-node state (such as a balance factor) must
/// swap that state themselves.
pub fn swap_content<K, V, N: KvNode<K, V>>(arena: &mut [N], x: u32, y: u32) {
    if x == y {
        return;
    }
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    let a = &mut head[lo as usize];
    let b = &mut tail[0];
    mem::swap(a.key_mut(), b.key_mut());
    mem::swap(a.value_mut(), b.value_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;
    use crate::types::Node;

    #[test]
    fn swaps_payload_but_not_links() {
        let mut arena = vec![AvlNode::new(1, "one", None), AvlNode::new(2, "two", Some(0))];
        arena[0].set_r(Some(1));

        swap_content(&mut arena, 1, 0);

        assert_eq!((arena[0].k, arena[0].v), (2, "two"));
        assert_eq!((arena[1].k, arena[1].v), (1, "one"));
        assert_eq!(arena[0].r(), Some(1));
        assert_eq!(arena[1].p(), Some(0));
    }

    #[test]
    fn same_slot_is_noop() {
        let mut arena = vec![AvlNode::new(7, 70, None)];
        swap_content(&mut arena, 0, 0);
        assert_eq!((arena[0].k, arena[0].v), (7, 70));
    }
}
