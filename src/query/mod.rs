//! # Tree Queries
//!
//! Pure derivation of hierarchical views from a store [`Snapshot`]: folder
//! trees for sidebars and destination pickers, direct-children listings for
//! the main view, breadcrumb paths, ancestry checks, and deterministic
//! sorting. Nothing in this module mutates; every function takes a snapshot
//! and returns owned results the caller is free to keep after the snapshot
//! goes away.
//!
//! Every presentation surface that needs traversal calls these primitives
//! with different filter/exclusion parameters instead of walking the tree
//! itself. Queries never fail on a well-formed snapshot; an unmatched folder
//! id simply yields an empty result. The one exception is
//! [`breadcrumb_path`], which reports a stale folder id so the caller can
//! reset to root.
//!
//! [`Snapshot`]: crate::store::Snapshot

mod breadcrumbs;
mod list;
mod sort;
mod tree;

pub use breadcrumbs::{breadcrumb_path, category_label, Crumb, ALL_FILES_LABEL};
pub use list::{list_children, ListFilter};
pub use sort::{sort_items, SortKey, SortOrder, SortSpec};
pub use tree::{build_folder_tree, is_descendant, FolderNode, TreeOptions};
