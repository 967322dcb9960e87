use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{Item, ItemKind};
use crate::query::is_descendant;
use crate::store::{Clock, IdSource, ItemStore};

/// Deep-copies a batch of items into `target` (`None` for root) and returns
/// the root clones. The whole batch is validated first: the target must be a
/// real folder (or root) and must not lie inside any of the subtrees being
/// copied.
pub fn run<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    ids: &[Uuid],
    target: Option<Uuid>,
) -> Result<Vec<Item>> {
    validate(store, ids, target)?;

    let mut processed = HashSet::new();
    let mut clones = Vec::new();
    for &id in ids {
        if !processed.insert(id) {
            continue;
        }
        clones.push(store.copy_subtree(id, target)?);
    }
    Ok(clones)
}

fn validate<I: IdSource, C: Clock>(
    store: &ItemStore<I, C>,
    ids: &[Uuid],
    target: Option<Uuid>,
) -> Result<()> {
    let snapshot = store.snapshot();

    if let Some(target_id) = target {
        let target_item = snapshot
            .get(&target_id)
            .ok_or(DriveError::NotFound(target_id))?;
        if target_item.kind != ItemKind::Folder {
            return Err(DriveError::TypeMismatch {
                id: target_id,
                expected: ItemKind::Folder,
                actual: target_item.kind,
            });
        }
    }

    for &id in ids {
        snapshot.get(&id).ok_or(DriveError::NotFound(id))?;
        if let Some(target_id) = target {
            if is_descendant(&snapshot, id, target_id) {
                return Err(DriveError::Cycle {
                    id,
                    target: target_id,
                });
            }
        }
    }
    Ok(())
}
