//! Arena-based AVL tree map.
//!
//! Every node carries a balance factor (`height(right) - height(left)`) that
//! is kept in `-1..=1` by rotations performed during insertion and removal, so
//! the tree height stays `O(log n)`.
//!
//! Instead of raw pointers, all links are `Option<u32>` indices into a
//! map-owned `Vec` arena. A parent link is just an index and never owns
//! anything; the arena owns every node.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits, default comparator |
//! [`util`] | Ordered-container walks: `first`, `next`, `find`, content swap … |
//! [`avl`] | Balance bookkeeping, rotations, [`AvlMap`], [`AvlSet`] |
//! [`error`] | [`AvlError`] |
//!
//! # Example
//!
//! ```
//! use avl_forest::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for k in 1..=7 {
//!     map.insert(k, k * 10);
//! }
//! assert_eq!(map.find(&4), Some(&40));
//! assert_eq!(map.height(), 3);
//! assert_eq!(map.remove(&4), Some(40));
//! assert!(map.at(&4).is_err());
//! map.assert_valid().unwrap();
//! ```

pub mod avl;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlSet};
pub use error::AvlError;
pub use types::{default_comparator, KvNode, Node};
