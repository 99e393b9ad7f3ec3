use crate::types::{KvNode, Node};

/// AVL tree node stored in an arena slot.
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Balance factor, `height(right) - height(left)`.
    ///
    /// Always in `-1..=1` once a public operation returns; fix-up code may
    /// observe `-2` or `2` on its provisional value before rotating.
    pub bf: i8,
}

impl<K, V> AvlNode<K, V> {
    /// New leaf hanging off `p`, balanced.
    pub fn new(k: K, v: V, p: Option<u32>) -> Self {
        Self {
            p,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }

    /// Adds `diff` to the balance factor.
    pub fn update_bf(&mut self, diff: i8) {
        self.bf += diff;
    }
}

impl<K, V> Node for AvlNode<K, V> {
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

impl<K, V> KvNode<K, V> for AvlNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn key_mut(&mut self) -> &mut K {
        &mut self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.v, value)
    }
}

/// Shape of a child / parent / grandparent chain.
///
/// `Left` / `Right` name the side of the grandparent the parent hangs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Parent is the left child, child is the parent's left child.
    ZigZigLeft,
    /// Parent is the right child, child is the parent's right child.
    ZigZigRight,
    /// Parent is the left child, child is the parent's right child.
    ZigZagLeft,
    /// Parent is the right child, child is the parent's left child.
    ZigZagRight,
}

impl Shape {
    /// Balance change the grandparent takes when the chain grows by one.
    pub fn lean(self) -> i8 {
        match self {
            Shape::ZigZigLeft | Shape::ZigZagLeft => -1,
            Shape::ZigZigRight | Shape::ZigZagRight => 1,
        }
    }
}
