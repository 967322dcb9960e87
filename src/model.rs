//! # Domain Model
//!
//! This module defines the item record and its value types. An [`Item`] is
//! either a file or a folder; folders can parent other items through
//! `parent_id` links, and the flat collection of items plus those links is the
//! entire tree representation. There is no nested structure to keep in sync:
//! the store owns the flat collection, and the query layer derives child
//! views on demand.
//!
//! ## Field Notes
//!
//! - `size` is meaningful for files only. Folders always report 0; descendant
//!   sizes are deliberately not aggregated.
//! - `category` is a free-form classification tag, independent of where the
//!   item sits in the tree. A fixed set of well-known ids carries display
//!   labels (see the breadcrumb module); anything else is displayed as-is.
//! - `color` is a display tag for folders. It has no effect on queries.
//! - `team_id`, `deal_id`, and `owner_id` are opaque foreign references. The
//!   core stores them but never validates or resolves them.
//! - `file_type` and `url` support link items: a link is a zero-size file
//!   with `file_type = "link"` and a target url.
//!
//! All types are serde-serializable so an external persistence collaborator
//! can snapshot the collection in whatever format it likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on parent-chain walks. Protects ancestor traversal against a
/// corrupt tree that somehow acquired a cycle.
pub(crate) const MAX_TREE_DEPTH: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::File => write!(f, "file"),
            ItemKind::Folder => write!(f, "folder"),
        }
    }
}

/// Display tag for folders. No semantic effect on queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderColor {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRole {
    Viewer,
    Editor,
    Admin,
}

/// A sharing grant on an item. Grantee ids are opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub user_id: String,
    pub role: PermissionRole,
    #[serde(default)]
    pub team_id: Option<String>,
}

impl Permission {
    pub fn new(user_id: impl Into<String>, role: PermissionRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            team_id: None,
        }
    }

    pub fn for_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub color: Option<FolderColor>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Item {
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }
}

/// Creation attributes for [`crate::store::ItemStore::create`].
///
/// The store assigns the id and timestamps; everything else comes from here.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub kind: ItemKind,
    pub parent_id: Option<Uuid>,
    pub size: u64,
    pub category: Option<String>,
    pub is_shared: bool,
    pub color: Option<FolderColor>,
    pub team_id: Option<String>,
    pub deal_id: Option<String>,
    pub owner_id: Option<String>,
    pub file_type: Option<String>,
    pub url: Option<String>,
}

impl NewItem {
    fn with_kind(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: None,
            size: 0,
            category: None,
            is_shared: false,
            color: None,
            team_id: None,
            deal_id: None,
            owner_id: None,
            file_type: None,
            url: None,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::with_kind(name, ItemKind::File)
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self::with_kind(name, ItemKind::Folder)
    }

    pub fn with_parent(mut self, parent_id: Option<Uuid>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_color(mut self, color: FolderColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_deal(mut self, deal_id: impl Into<String>) -> Self {
        self.deal_id = Some(deal_id.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Splits a file name into its base and a trailing `.extension` segment.
///
/// The extension (dot included) starts at the last `.` in the name, provided
/// that dot is not the first character. `"report.pdf"` splits into
/// `("report", Some(".pdf"))`; `"archive.tar.gz"` keeps only the final
/// segment; `".bashrc"` and `"Makefile"` have no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx..])),
        _ => (name, None),
    }
}

/// The name given to the root of a copied subtree.
pub fn copy_name(original: &str) -> String {
    format!("{} - Copy", original)
}
