use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{Item, ItemKind};
use crate::query::is_descendant;
use crate::store::{Clock, IdSource, ItemStore};

/// Moves a batch of items into `target` (`None` for root). The whole batch
/// is validated against the current state first; nothing moves unless
/// everything can. Items already sitting at the target are reported but left
/// untouched (their `modified_at` does not bump).
pub fn run<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    ids: &[Uuid],
    target: Option<Uuid>,
) -> Result<Vec<Item>> {
    validate(store, ids, target)?;

    let mut processed = HashSet::new();
    let mut affected = Vec::new();
    for &id in ids {
        if !processed.insert(id) {
            continue;
        }
        let item = match store.get(&id) {
            Some(item) if item.parent_id == target => item.clone(),
            _ => store.set_parent(id, target)?,
        };
        affected.push(item);
    }
    Ok(affected)
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
            // Covers both moving into itself and into its own subtree.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_drive;

    #[test]
    fn test_moves_batch_into_folder() {
        let mut drive = sample_drive();
        let moved = run(
            &mut drive.store,
            &[drive.notes, drive.readme],
            Some(drive.archive),
        )
        .unwrap();

        assert_eq!(moved.len(), 2);
        assert_eq!(
            drive.store.get(&drive.notes).unwrap().parent_id,
            Some(drive.archive)
        );
        assert_eq!(
            drive.store.get(&drive.readme).unwrap().parent_id,
            Some(drive.archive)
        );
    }

    #[test]
    fn test_moves_to_root() {
        let mut drive = sample_drive();
        run(&mut drive.store, &[drive.q3], None).unwrap();
        assert!(drive.store.get(&drive.q3).unwrap().parent_id.is_none());
    }

    #[test]
    fn test_duplicate_selection_is_processed_once() {
        let mut drive = sample_drive();
        let moved = run(
            &mut drive.store,
            &[drive.notes, drive.notes],
            Some(drive.archive),
        )
        .unwrap();
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn test_item_already_at_target_is_untouched() {
        let mut drive = sample_drive();
        let before = drive.store.get(&drive.q3).unwrap().modified_at;
        let moved = run(&mut drive.store, &[drive.q3], Some(drive.reports)).unwrap();

        assert_eq!(moved.len(), 1);
        assert_eq!(drive.store.get(&drive.q3).unwrap().modified_at, before);
    }

    #[test]
    fn test_cycle_anywhere_in_batch_aborts_whole_batch() {
        let mut drive = sample_drive();
        // notes is fine on its own, but projects -> reports is a cycle.
        let result = run(
            &mut drive.store,
            &[drive.notes, drive.projects],
            Some(drive.reports),
        );

        assert!(matches!(result, Err(DriveError::Cycle { .. })));
        // Nothing moved, notes included.
        assert_eq!(
            drive.store.get(&drive.notes).unwrap().parent_id,
            Some(drive.projects)
        );
    }

    #[test]
    fn test_unknown_id_aborts_whole_batch() {
        let mut drive = sample_drive();
        let ghost = Uuid::from_u128(99);
        let result = run(&mut drive.store, &[drive.notes, ghost], Some(drive.archive));

        assert!(matches!(result, Err(DriveError::NotFound(id)) if id == ghost));
        assert_eq!(
            drive.store.get(&drive.notes).unwrap().parent_id,
            Some(drive.projects)
        );
    }

    #[test]
    fn test_file_target_is_rejected() {
        let mut drive = sample_drive();
        let result = run(&mut drive.store, &[drive.notes], Some(drive.readme));
        assert!(matches!(result, Err(DriveError::TypeMismatch { .. })));
    }
}
