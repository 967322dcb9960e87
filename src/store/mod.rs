//! # Item Store
//!
//! The store owns the canonical, flat item collection and is the **only**
//! mutation surface in the crate. Every structural edit (create, rename,
//! re-parent, delete, deep copy, attribute and sharing updates) goes through
//! a method here, and every method validates fully before it touches state:
//! a failed call leaves the collection exactly as it was.
//!
//! ## Guarantees
//!
//! After every successful mutation:
//! - `parent_id`, when present, references an existing folder
//! - the parent graph is acyclic
//! - ids are unique and never reused
//! - no item references a removed id (deletes cascade over whole subtrees)
//! - names are non-empty after trimming
//!
//! ## Representation
//!
//! Items live in a `Vec` in insertion order (sibling order in tree views is
//! insertion order) with a side map from id to position for direct lookup.
//! Child views are derived on demand by the query layer; nothing bidirectional
//! is maintained here.
//!
//! ## Injected Dependencies
//!
//! The store is generic over an [`IdSource`] and a [`Clock`]
//! ([`env`]) so tests get deterministic ids and timestamps. `ItemStore::new()`
//! wires the production pair.

use std::collections::{HashMap, HashSet};

use log::debug;
use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{
    copy_name, split_extension, FolderColor, Item, ItemKind, NewItem, Permission, MAX_TREE_DEPTH,
};

pub mod env;

pub use env::{Clock, IdSource, SystemClock, UuidSource};

/// A read-only view of the collection, valid for the duration of one query
/// call. The borrow ties any derived result to the state it was derived from;
/// re-derive after every mutation.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    items: &'a [Item],
}

impl<'a> Snapshot<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Item> {
        self.items.iter()
    }

    pub fn get(&self, id: &Uuid) -> Option<&'a Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Attribute patch for [`ItemStore::set_attributes`]. Unset fields are left
/// untouched; `category` can be cleared by patching it to `None`.
#[derive(Debug, Clone, Default)]
pub struct AttrPatch {
    color: Option<FolderColor>,
    is_shared: Option<bool>,
    category: Option<Option<String>>,
}

impl AttrPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: FolderColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn shared(mut self, is_shared: bool) -> Self {
        self.is_shared = Some(is_shared);
        self
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }
}

pub struct ItemStore<I: IdSource = UuidSource, C: Clock = SystemClock> {
    items: Vec<Item>,
    index: HashMap<Uuid, usize>,
    ids: I,
    clock: C,
}

impl ItemStore {
    pub fn new() -> ItemStore {
        ItemStore::with_env(UuidSource, SystemClock)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource, C: Clock> ItemStore<I, C> {
    pub fn with_env(ids: I, clock: C) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            ids,
            clock,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { items: &self.items }
    }

    /// Creates a new item from the given attributes.
    ///
    /// The name must be non-empty after trimming, and `parent_id`, when
    /// given, must resolve to an existing folder. Folders are stored with
    /// size 0 regardless of the requested size; requesting a color on a file
    /// is a [`DriveError::Validation`].
    pub fn create(&mut self, new: NewItem) -> Result<Item> {
        let name = valid_name(&new.name)?;
        self.require_folder(new.parent_id)?;
        if new.kind == ItemKind::File && new.color.is_some() {
            return Err(DriveError::Validation(
                "only folders carry a color".to_string(),
            ));
        }

        let id = self.ids.next_id();
        debug_assert!(!self.index.contains_key(&id), "id source repeated an id");

        let now = self.clock.now();
        let item = Item {
            id,
            name,
            kind: new.kind,
            parent_id: new.parent_id,
            size: match new.kind {
                ItemKind::Folder => 0,
                ItemKind::File => new.size,
            },
            category: new.category,
            is_shared: new.is_shared,
            permissions: Vec::new(),
            color: new.color,
            created_at: now,
            modified_at: now,
            team_id: new.team_id,
            deal_id: new.deal_id,
            owner_id: new.owner_id,
            file_type: new.file_type,
            url: new.url,
        };

        debug!("created {} {} under {:?}", item.kind, item.id, item.parent_id);
        self.index.insert(item.id, self.items.len());
        self.items.push(item.clone());
        Ok(item)
    }

    /// Renames an item.
    ///
    /// For files whose current name carries a `.extension` segment, the new
    /// name is treated as the base name and the original extension is
    /// re-appended, even when the new name itself contains dots. Folder names
    /// are taken verbatim (trimmed).
    pub fn rename(&mut self, id: Uuid, new_name: &str) -> Result<Item> {
        let base = valid_name(new_name)?;
        let pos = self.position(id)?;

        let item = &mut self.items[pos];
        item.name = match item.kind {
            ItemKind::File => match split_extension(&item.name) {
                (_, Some(extension)) => format!("{}{}", base, extension),
                (_, None) => base,
            },
            ItemKind::Folder => base,
        };
        item.modified_at = self.clock.now();
        Ok(item.clone())
    }

    /// Moves an item to a new parent (`None` means root).
    ///
    /// Fails with [`DriveError::Cycle`] when the target equals the item or
    /// lies inside its subtree, and with `NotFound`/`TypeMismatch` when the
    /// target does not resolve to an existing folder.
    pub fn set_parent(&mut self, id: Uuid, new_parent: Option<Uuid>) -> Result<Item> {
        let pos = self.position(id)?;

        if let Some(target) = new_parent {
            if target == id {
                return Err(DriveError::Cycle { id, target });
            }
            self.require_folder(Some(target))?;
            if self.is_ancestor(id, target) {
                return Err(DriveError::Cycle { id, target });
            }
        }

        debug!("moving {} to {:?}", id, new_parent);
        let item = &mut self.items[pos];
        item.parent_id = new_parent;
        item.modified_at = self.clock.now();
        Ok(item.clone())
    }

    /// Removes an item and, for folders, its entire subtree. Returns the
    /// removed items. Removing an unknown id is a [`DriveError::NotFound`],
    /// never a silent no-op.
    pub fn remove(&mut self, id: Uuid) -> Result<Vec<Item>> {
        self.position(id)?;

        let children = self.child_map();
        let mut doomed = HashSet::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if doomed.insert(next) {
                if let Some(kids) = children.get(&next) {
                    stack.extend(kids.iter().copied());
                }
            }
        }

        let mut removed = Vec::new();
        self.items.retain(|item| {
            if doomed.contains(&item.id) {
                removed.push(item.clone());
                false
            } else {
                true
            }
        });
        self.reindex();

        debug!("removed {} with {} descendants", id, removed.len() - 1);
        Ok(removed)
    }

    /// Deep-clones an item into `target_parent`, assigning fresh ids
    /// throughout while preserving the relative structure of the subtree.
    /// The root clone's name gets a `" - Copy"` suffix; the original is
    /// untouched. Returns the root clone.
    pub fn copy_subtree(&mut self, id: Uuid, target_parent: Option<Uuid>) -> Result<Item> {
        self.position(id)?;

        if let Some(target) = target_parent {
            if target == id {
                return Err(DriveError::Cycle { id, target });
            }
            self.require_folder(Some(target))?;
            if self.is_ancestor(id, target) {
                return Err(DriveError::Cycle { id, target });
            }
        }

        let now = self.clock.now();
        let children = self.child_map();
        let mut clones = Vec::new();
        let mut stack = vec![(id, target_parent)];
        while let Some((source_id, clone_parent)) = stack.pop() {
            let source = &self.items[self.index[&source_id]];
            let mut clone = source.clone();
            clone.id = self.ids.next_id();
            clone.parent_id = clone_parent;
            clone.created_at = now;
            clone.modified_at = now;
            if source_id == id {
                clone.name = copy_name(&source.name);
            }
            if let Some(kids) = children.get(&source_id) {
                for &kid in kids {
                    stack.push((kid, Some(clone.id)));
                }
            }
            clones.push(clone);
        }

        debug!("copied {} as {} ({} items)", id, clones[0].id, clones.len());
        let root_clone = clones[0].clone();
        for clone in clones {
            self.index.insert(clone.id, self.items.len());
            self.items.push(clone);
        }
        Ok(root_clone)
    }

    /// Shallow-merges the mutable attribute set (color, shared flag,
    /// category). Setting a color on a file is a [`DriveError::TypeMismatch`].
    pub fn set_attributes(&mut self, id: Uuid, patch: AttrPatch) -> Result<Item> {
        let pos = self.position(id)?;

        if patch.color.is_some() && self.items[pos].kind == ItemKind::File {
            return Err(DriveError::TypeMismatch {
                id,
                expected: ItemKind::Folder,
                actual: ItemKind::File,
            });
        }

        let item = &mut self.items[pos];
        if let Some(color) = patch.color {
            item.color = Some(color);
        }
        if let Some(is_shared) = patch.is_shared {
            item.is_shared = is_shared;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        item.modified_at = self.clock.now();
        Ok(item.clone())
    }

    /// Adds a sharing grant, replacing any existing grant for the same user,
    /// and marks the item shared.
    pub fn grant(&mut self, id: Uuid, permission: Permission) -> Result<Item> {
        let pos = self.position(id)?;

        let item = &mut self.items[pos];
        item.permissions
            .retain(|existing| existing.user_id != permission.user_id);
        item.permissions.push(permission);
        item.is_shared = true;
        item.modified_at = self.clock.now();
        Ok(item.clone())
    }

    /// Removes the grant for a user. The shared flag clears when the last
    /// grant goes.
    pub fn revoke(&mut self, id: Uuid, user_id: &str) -> Result<Item> {
        let pos = self.position(id)?;

        let item = &mut self.items[pos];
        item.permissions
            .retain(|existing| existing.user_id != user_id);
        if item.permissions.is_empty() {
            item.is_shared = false;
        }
        item.modified_at = self.clock.now();
        Ok(item.clone())
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.index.get(&id).copied().ok_or(DriveError::NotFound(id))
    }

    fn require_folder(&self, parent: Option<Uuid>) -> Result<()> {
        let Some(parent_id) = parent else {
            // Root is always a valid parent.
            return Ok(());
        };
        let parent_item = self.get(&parent_id).ok_or(DriveError::NotFound(parent_id))?;
        if parent_item.kind != ItemKind::Folder {
            return Err(DriveError::TypeMismatch {
                id: parent_id,
                expected: ItemKind::Folder,
                actual: parent_item.kind,
            });
        }
        Ok(())
    }

    /// Walks the parent chain of `start`, true when `candidate` appears in it.
    fn is_ancestor(&self, candidate: Uuid, start: Uuid) -> bool {
        let mut current = self.get(&start).and_then(|item| item.parent_id);
        let mut depth = 0;
        while let Some(parent_id) = current {
            if parent_id == candidate {
                return true;
            }
            depth += 1;
            if depth >= MAX_TREE_DEPTH {
                break;
            }
            current = self.get(&parent_id).and_then(|item| item.parent_id);
        }
        false
    }

    fn child_map(&self) -> HashMap<Uuid, Vec<Uuid>> {
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for item in &self.items {
            if let Some(parent_id) = item.parent_id {
                children.entry(parent_id).or_default().push(item.id);
            }
        }
        children
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
    }
}

fn valid_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DriveError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use uuid::Uuid;

    use super::env::fixtures::{SequentialIds, SteppingClock};
    use super::ItemStore;
    use crate::model::NewItem;

    pub type DeterministicStore = ItemStore<SequentialIds, SteppingClock>;

    pub fn deterministic_store() -> DeterministicStore {
        ItemStore::with_env(SequentialIds::new(), SteppingClock::new())
    }

    /// A small drive used across the unit tests:
    ///
    /// ```text
    /// Projects/            (folder)
    ///   Reports/           (folder)
    ///     q3.pdf           (file, 100)
    ///   notes.txt          (file, 10)
    /// Archive/             (folder)
    /// readme.md            (file, 5, root-level)
    /// ```
    pub struct SampleDrive {
        pub store: DeterministicStore,
        pub projects: Uuid,
        pub reports: Uuid,
        pub q3: Uuid,
        pub notes: Uuid,
        pub archive: Uuid,
        pub readme: Uuid,
    }

    pub fn sample_drive() -> SampleDrive {
        let mut store = deterministic_store();
        let projects = store.create(NewItem::folder("Projects")).unwrap().id;
        let reports = store
            .create(NewItem::folder("Reports").with_parent(Some(projects)))
            .unwrap()
            .id;
        let q3 = store
            .create(
                NewItem::file("q3.pdf")
                    .with_parent(Some(reports))
                    .with_size(100),
            )
            .unwrap()
            .id;
        let notes = store
            .create(
                NewItem::file("notes.txt")
                    .with_parent(Some(projects))
                    .with_size(10),
            )
            .unwrap()
            .id;
        let archive = store.create(NewItem::folder("Archive")).unwrap().id;
        let readme = store
            .create(NewItem::file("readme.md").with_size(5))
            .unwrap()
            .id;

        SampleDrive {
            store,
            projects,
            reports,
            q3,
            notes,
            archive,
            readme,
        }
    }
}
