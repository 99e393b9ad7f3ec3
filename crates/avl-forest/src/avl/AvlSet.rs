use crate::error::AvlError;
use crate::types::default_comparator;

use super::avl_map::AvlMap;

/// AVL tree set backed by [`AvlMap<V, ()>`].
pub struct AvlSet<V, C = fn(&V, &V) -> i32>
where
    C: Fn(&V, &V) -> i32,
{
    inner: AvlMap<V, (), C>,
}

impl<V> AvlSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<V>)
    }
}

impl<V> Default for AvlSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> AvlSet<V, C>
where
    C: Fn(&V, &V) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    /// Adds `value`; returns `false` if it was already present.
    pub fn add(&mut self, value: V) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    /// Removes `value`; returns `false` if it was absent.
    pub fn del(&mut self, value: &V) -> bool {
        self.inner.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn has(&self, value: &V) -> bool {
        self.inner.contains_key(value)
    }

    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.keys()
    }

    pub fn assert_valid(&self) -> Result<(), AvlError> {
        self.inner.assert_valid()
    }
}
