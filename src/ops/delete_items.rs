use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::Item;
use crate::store::{Clock, IdSource, ItemStore};

/// Removes a batch of items (with their subtrees) and returns everything
/// that was removed. All ids must exist up front; after that, ids that were
/// already swallowed by an earlier cascade in the same batch (a folder and
/// one of its descendants both selected) are skipped rather than reported as
/// stale.
pub fn run<I: IdSource, C: Clock>(store: &mut ItemStore<I, C>, ids: &[Uuid]) -> Result<Vec<Item>> {
    {
        let snapshot = store.snapshot();
        for &id in ids {
            snapshot.get(&id).ok_or(DriveError::NotFound(id))?;
        }
    }

    let mut removed = Vec::new();
    for &id in ids {
        if store.get(&id).is_none() {
            continue;
        }
        removed.extend(store.remove(id)?);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_drive;

    #[test]
    fn test_deletes_batch() {
        let mut drive = sample_drive();
        let removed = run(&mut drive.store, &[drive.readme, drive.archive]).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(drive.store.get(&drive.readme).is_none());
        assert!(drive.store.get(&drive.archive).is_none());
        assert_eq!(drive.store.len(), 4);
    }

    #[test]
    fn test_overlapping_selection_deletes_subtree_once() {
        let mut drive = sample_drive();
        // projects cascades over reports; the explicit reports id must not
        // then fail as stale.
        let removed = run(&mut drive.store, &[drive.projects, drive.reports]).unwrap();

        assert_eq!(removed.len(), 4);
        assert_eq!(drive.store.len(), 2);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let mut drive = sample_drive();
        let removed = run(&mut drive.store, &[drive.reports, drive.projects]).unwrap();

        // reports goes first (with q3.pdf), then projects (with notes.txt).
        assert_eq!(removed.len(), 4);
        assert_eq!(drive.store.len(), 2);
    }

    #[test]
    fn test_unknown_id_aborts_before_anything_is_removed() {
        let mut drive = sample_drive();
        let ghost = Uuid::from_u128(99);
        let result = run(&mut drive.store, &[drive.readme, ghost]);

        assert!(matches!(result, Err(DriveError::NotFound(id)) if id == ghost));
        assert!(drive.store.get(&drive.readme).is_some());
        assert_eq!(drive.store.len(), 6);
    }
}
