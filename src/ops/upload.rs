use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{Item, NewItem};
use crate::store::{Clock, IdSource, ItemStore};

use super::UploadContext;

/// One file handed over by a file-picker style collaborator.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub size: u64,
    pub file_type: Option<String>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            file_type: None,
        }
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }
}

/// One file from a directory-picker style collaborator, addressed by its
/// slash-separated path relative to the picked directory.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub relative_path: String,
    pub size: u64,
    pub file_type: Option<String>,
}

impl TreeEntry {
    pub fn new(relative_path: impl Into<String>, size: u64) -> Self {
        Self {
            relative_path: relative_path.into(),
            size,
            file_type: None,
        }
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }
}

/// Ingests a batch of files into the context's folder. Creates run one at a
/// time, each independently atomic; a bad name mid-batch stops the batch and
/// leaves the earlier files in place, mirroring how an upload queue behaves.
pub fn upload_files<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    uploads: Vec<FileUpload>,
    ctx: &UploadContext,
) -> Result<Vec<Item>> {
    let mut created = Vec::new();
    for upload in uploads {
        let mut new = NewItem::file(upload.name)
            .with_parent(ctx.parent_id)
            .with_size(upload.size);
        if let Some(file_type) = upload.file_type {
            new = new.with_file_type(file_type);
        }
        created.push(store.create(ctx.apply(new))?);
    }
    Ok(created)
}

/// Ingests a whole directory structure.
///
/// Two passes: the first creates one folder per distinct path prefix
/// (reusing folders already created for earlier entries), the second creates
/// each file under its resolved parent.
pub fn upload_tree<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    entries: Vec<TreeEntry>,
    ctx: &UploadContext,
) -> Result<Vec<Item>> {
    let mut folder_ids: HashMap<String, Uuid> = HashMap::new();
    let mut created = Vec::new();

    for entry in &entries {
        let parts = path_parts(&entry.relative_path)?;
        let mut current_path = String::new();
        let mut current_parent = ctx.parent_id;
        for part in &parts[..parts.len() - 1] {
            let path = if current_path.is_empty() {
                part.to_string()
            } else {
                format!("{}/{}", current_path, part)
            };
            let folder_id = match folder_ids.get(&path) {
                Some(&id) => id,
                None => {
                    let folder = store.create(
                        ctx.apply(NewItem::folder(*part).with_parent(current_parent)),
                    )?;
                    folder_ids.insert(path.clone(), folder.id);
                    created.push(folder.clone());
                    folder.id
                }
            };
            current_parent = Some(folder_id);
            current_path = path;
        }
    }

    for entry in entries {
        let parts = path_parts(&entry.relative_path)?;
        let name = parts[parts.len() - 1];
        let dir_path = parts[..parts.len() - 1].join("/");
        let parent = match folder_ids.get(&dir_path) {
            Some(&id) => Some(id),
            None => ctx.parent_id,
        };

        let mut new = NewItem::file(name)
            .with_parent(parent)
            .with_size(entry.size);
        if let Some(file_type) = &entry.file_type {
            new = new.with_file_type(file_type.clone());
        }
        created.push(store.create(ctx.apply(new))?);
    }

    Ok(created)
}

/// Creates a link item: a zero-size file with `file_type = "link"` pointing
/// at `url`.
pub fn create_link<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    name: &str,
    url: &str,
    ctx: &UploadContext,
) -> Result<Item> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DriveError::Validation(
            "link url must not be empty".to_string(),
        ));
    }
    store.create(
        ctx.apply(
            NewItem::file(name)
                .with_parent(ctx.parent_id)
                .with_file_type("link")
                .with_url(url),
        ),
    )
}

fn path_parts(relative_path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = relative_path
        .split('/')
        .filter(|part| !part.trim().is_empty())
        .collect();
    if parts.is_empty() {
        return Err(DriveError::Validation(format!(
            "upload path has no file name: {:?}",
            relative_path
        )));
    }
    Ok(parts)
}
