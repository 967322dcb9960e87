use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::model::{Item, ItemKind, MAX_TREE_DEPTH};
use crate::store::Snapshot;

/// A folder with its recursively attached subfolders. Files never appear in
/// the tree; they come from [`super::list_children`].
#[derive(Debug, Clone)]
pub struct FolderNode {
    pub item: Item,
    pub children: Vec<FolderNode>,
}

/// Filters for [`build_folder_tree`].
///
/// `category` keeps only folders tagged with that category, at every level.
/// `excluded` prunes the listed folders *and their entire subtrees*; move and
/// copy destination pickers put the items being moved in here so a folder can
/// never be offered as its own destination.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub category: Option<String>,
    pub excluded: HashSet<Uuid>,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn without(mut self, excluded: impl IntoIterator<Item = Uuid>) -> Self {
        self.excluded.extend(excluded);
        self
    }
}

/// Derives the folder tree under `parent` (`None` for the root level).
/// Sibling order is insertion order.
pub fn build_folder_tree(
    snapshot: &Snapshot,
    parent: Option<Uuid>,
    opts: &TreeOptions,
) -> Vec<FolderNode> {
    // Group matching folders by parent once, then expand level by level.
    // Folders in the excluded set never enter the map, so their subtrees are
    // unreachable from the root recursion.
    let mut by_parent: HashMap<Option<Uuid>, Vec<&Item>> = HashMap::new();
    for item in snapshot.iter() {
        if item.kind != ItemKind::Folder {
            continue;
        }
        if opts.excluded.contains(&item.id) {
            continue;
        }
        if let Some(category) = &opts.category {
            if item.category.as_deref() != Some(category.as_str()) {
                continue;
            }
        }
        by_parent.entry(item.parent_id).or_default().push(item);
    }

    build_level(parent, &by_parent)
}

fn build_level(
    parent: Option<Uuid>,
    by_parent: &HashMap<Option<Uuid>, Vec<&Item>>,
) -> Vec<FolderNode> {
    let Some(folders) = by_parent.get(&parent) else {
        return Vec::new();
    };
    folders
        .iter()
        .map(|folder| FolderNode {
            item: (*folder).clone(),
            children: build_level(Some(folder.id), by_parent),
        })
        .collect()
}

/// True when `candidate_ancestor` equals `id` or appears in the ancestor
/// chain of `id`.
///
/// This is the primitive behind every cycle check. It walks the chain
/// freshly against the given snapshot on every call; callers must not cache
/// the answer across mutations.
pub fn is_descendant(snapshot: &Snapshot, candidate_ancestor: Uuid, id: Uuid) -> bool {
    if candidate_ancestor == id {
        return true;
    }
    let mut current = snapshot.get(&id).and_then(|item| item.parent_id);
    let mut depth = 0;
    while let Some(parent_id) = current {
        if parent_id == candidate_ancestor {
            return true;
        }
        depth += 1;
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        current = snapshot.get(&parent_id).and_then(|item| item.parent_id);
    }
    false
}
