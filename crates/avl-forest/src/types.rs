//! Node trait definitions.
//!
//! Nodes are plain structs stored in a [`Vec`]-backed arena. Every link is an
//! `Option<u32>` index into that arena, so a parent link is only a handle and
//! never owns the node it points at. All tree-manipulation functions take the
//! arena as a slice and work with indices.

/// Structural links (`p`, `l`, `r`) of a binary tree node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value payload of a node.
///
/// `key_mut` exists for content swaps, which move payloads between slots
/// without touching links. Changing a key in any other way breaks ordering.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn key_mut(&mut self) -> &mut K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V) -> V;
}

/// Default comparator for `PartialOrd` keys: negative, zero or positive.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}
