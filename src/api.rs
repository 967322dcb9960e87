//! # API Facade
//!
//! [`DriveApi`] is the single handle a presentation layer holds. It owns the
//! item store and dispatches to the operations and query layers; there is no
//! business logic here. View derivation (`list`, `folder_tree`,
//! `breadcrumbs`) takes a fresh snapshot per call, so results always reflect
//! the latest mutation.
//!
//! Generic over the store's id source and clock with the same production
//! defaults, so `DriveApi::new()` is all a real caller needs and tests can
//! inject deterministic doubles through [`DriveApi::with_store`].

use uuid::Uuid;

use crate::error::Result;
use crate::model::{FolderColor, Item, NewItem, Permission};
use crate::ops::{self, upload::FileUpload, upload::TreeEntry, UploadContext};
use crate::query::{
    self, breadcrumb_path, build_folder_tree, list_children, Crumb, FolderNode, ListFilter,
    SortSpec, TreeOptions,
};
use crate::store::{AttrPatch, Clock, IdSource, ItemStore, SystemClock, UuidSource};

pub struct DriveApi<I: IdSource = UuidSource, C: Clock = SystemClock> {
    store: ItemStore<I, C>,
}

impl DriveApi {
    pub fn new() -> DriveApi {
        DriveApi::with_store(ItemStore::new())
    }
}

impl Default for DriveApi {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource, C: Clock> DriveApi<I, C> {
    pub fn with_store(store: ItemStore<I, C>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ItemStore<I, C> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ItemStore<I, C> {
        &mut self.store
    }

    // --- Mutations ---

    pub fn create_folder(&mut self, name: &str, ctx: &UploadContext) -> Result<Item> {
        self.store
            .create(ctx.apply(NewItem::folder(name).with_parent(ctx.parent_id)))
    }

    pub fn upload_files(&mut self, uploads: Vec<FileUpload>, ctx: &UploadContext) -> Result<Vec<Item>> {
        ops::upload::upload_files(&mut self.store, uploads, ctx)
    }

    pub fn upload_tree(&mut self, entries: Vec<TreeEntry>, ctx: &UploadContext) -> Result<Vec<Item>> {
        ops::upload::upload_tree(&mut self.store, entries, ctx)
    }

    pub fn create_link(&mut self, name: &str, url: &str, ctx: &UploadContext) -> Result<Item> {
        ops::upload::create_link(&mut self.store, name, url, ctx)
    }

    pub fn rename(&mut self, id: Uuid, new_name: &str) -> Result<Item> {
        self.store.rename(id, new_name)
    }

    pub fn move_items(&mut self, ids: &[Uuid], target: Option<Uuid>) -> Result<Vec<Item>> {
        ops::move_items::run(&mut self.store, ids, target)
    }

    pub fn copy_items(&mut self, ids: &[Uuid], target: Option<Uuid>) -> Result<Vec<Item>> {
        ops::copy_items::run(&mut self.store, ids, target)
    }

    pub fn delete_items(&mut self, ids: &[Uuid]) -> Result<Vec<Item>> {
        ops::delete_items::run(&mut self.store, ids)
    }

    pub fn share_items(&mut self, ids: &[Uuid], grants: &[Permission]) -> Result<Vec<Item>> {
        ops::share::run(&mut self.store, ids, grants)
    }

    pub fn grant_access(&mut self, id: Uuid, permission: Permission) -> Result<Item> {
        self.store.grant(id, permission)
    }

    pub fn revoke_access(&mut self, id: Uuid, user_id: &str) -> Result<Item> {
        self.store.revoke(id, user_id)
    }

    pub fn set_folder_color(&mut self, id: Uuid, color: FolderColor) -> Result<Item> {
        self.store.set_attributes(id, AttrPatch::new().color(color))
    }

    pub fn set_category(&mut self, id: Uuid, category: Option<String>) -> Result<Item> {
        self.store
            .set_attributes(id, AttrPatch::new().category(category))
    }

    // --- Views ---

    pub fn list(&self, folder: Option<Uuid>, filter: &ListFilter, sort: &SortSpec) -> Vec<Item> {
        list_children(&self.store.snapshot(), folder, filter, sort)
    }

    pub fn folder_tree(&self, opts: &TreeOptions) -> Vec<FolderNode> {
        build_folder_tree(&self.store.snapshot(), None, opts)
    }

    pub fn breadcrumbs(&self, folder: Option<Uuid>, category: Option<&str>) -> Result<Vec<Crumb>> {
        breadcrumb_path(&self.store.snapshot(), folder, category)
    }

    pub fn is_descendant(&self, candidate_ancestor: Uuid, id: Uuid) -> bool {
        query::is_descendant(&self.store.snapshot(), candidate_ancestor, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::env::fixtures::{SequentialIds, SteppingClock};

    fn api() -> DriveApi<SequentialIds, SteppingClock> {
        DriveApi::with_store(ItemStore::with_env(
            SequentialIds::new(),
            SteppingClock::new(),
        ))
    }

    #[test]
    fn test_facade_round_trip() {
        let mut drive = api();
        let folder = drive
            .create_folder("Inbox", &UploadContext::default())
            .unwrap();
        let files = drive
            .upload_files(
                vec![FileUpload::new("a.txt", 1), FileUpload::new("b.txt", 2)],
                &UploadContext::in_folder(Some(folder.id)),
            )
            .unwrap();

        let listing = drive.list(Some(folder.id), &ListFilter::new(), &SortSpec::default());
        assert_eq!(listing.len(), 2);

        drive.delete_items(&[files[0].id]).unwrap();
        let listing = drive.list(Some(folder.id), &ListFilter::new(), &SortSpec::default());
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "b.txt");
    }

    #[test]
    fn test_facade_tree_and_breadcrumbs_reflect_moves() {
        let mut drive = api();
        let ctx = UploadContext::default();
        let outer = drive.create_folder("Outer", &ctx).unwrap();
        let inner = drive.create_folder("Inner", &ctx).unwrap();

        drive.move_items(&[inner.id], Some(outer.id)).unwrap();

        let tree = drive.folder_tree(&TreeOptions::new());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].item.name, "Inner");

        let crumbs = drive.breadcrumbs(Some(inner.id), None).unwrap();
        let names: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["All Files", "Outer", "Inner"]);

        assert!(drive.is_descendant(outer.id, inner.id));
    }

    #[test]
    fn test_facade_color_and_category() {
        let mut drive = api();
        let folder = drive
            .create_folder("Tagged", &UploadContext::default())
            .unwrap();

        let updated = drive
            .set_folder_color(folder.id, FolderColor::Purple)
            .unwrap();
        assert_eq!(updated.color, Some(FolderColor::Purple));

        let updated = drive
            .set_category(folder.id, Some("meetings".to_string()))
            .unwrap();
        assert_eq!(updated.category.as_deref(), Some("meetings"));
    }
}
