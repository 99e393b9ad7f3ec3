use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use crate::error::AvlError;
use crate::types::default_comparator;
use crate::util::{find, first, height, last, next};

use super::types::AvlNode;
use super::util;

/// Ordered map kept height-balanced by AVL rotations.
///
/// Nodes live in a dense arena: the map holds exactly one slot per entry, and
/// removing an entry frees its slot. Handles returned by
/// [`find_index`](Self::find_index) stay valid until the next removal.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Option<u32>,
    comparator: C,
    arena: Vec<AvlNode<K, V>>,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
        }
    }

    /// Inserts `key` → `value`.
    ///
    /// If the key is already present its value is overwritten and the old one
    /// returned; the tree shape does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = util::insert(&mut self.arena, self.root, key, value, &self.comparator);
        self.root = root;
        old
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (root, removed) = util::remove(&mut self.arena, self.root, key, &self.comparator);
        self.root = root;
        removed
    }

    pub fn find_index(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n| &n.k, &self.comparator)
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_index(key)?;
        Some(&mut self.arena[i as usize].v)
    }

    /// Like [`find`](Self::find), but a missing key is an error.
    pub fn at(&self, key: &K) -> Result<&V, AvlError> {
        self.find(key).ok_or(AvlError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        first(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        last(&self.arena, self.root).map(|i| self.entry(i))
    }

    /// Number of levels; `0` for an empty map.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    /// In-order (ascending key) iterator.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            curr: first(&self.arena, self.root),
            remaining: self.arena.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Recomputes subtree heights and checks the height property only.
    pub fn is_balanced(&self) -> bool {
        util::is_balanced(&self.arena, self.root)
    }

    /// Checks links, balance factors, height balance, key order and slot
    /// accounting.
    pub fn assert_valid(&self) -> Result<(), AvlError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        format!("AvlMap\n{}", util::print(&self.arena, self.root, ""))
    }

    fn entry(&self, i: u32) -> (&K, &V) {
        let n = &self.arena[i as usize];
        (&n.k, &n.v)
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: PartialOrd, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> i32> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over an [`AvlMap`].
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        self.remaining -= 1;
        let n = &self.arena[i as usize];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
