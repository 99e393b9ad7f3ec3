//! AVL balancing layer.
//!
//! [`util`] holds the free functions that operate on an arena of
//! [`AvlNode`]s: rotations, the insert and remove fix-ups, and validation.
//! [`AvlMap`] and [`AvlSet`] wrap them behind an owning container.

#[path = "AvlMap.rs"]
pub mod avl_map;
#[path = "AvlSet.rs"]
pub mod avl_set;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use avl_set::AvlSet;
pub use types::{AvlNode, Shape};
pub use util::{assert_avl_tree, insert, insert_fix, print, remove, remove_fix, rotate_left, rotate_right};
