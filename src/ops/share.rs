use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{Item, Permission};
use crate::store::{AttrPatch, Clock, IdSource, ItemStore};

/// Shares a batch of items: every item gets the given grants and its shared
/// flag set. An empty grant list still marks the items shared (link-style
/// sharing, where access rides on the link rather than named grantees).
pub fn run<I: IdSource, C: Clock>(
    store: &mut ItemStore<I, C>,
    ids: &[Uuid],
    grants: &[Permission],
) -> Result<Vec<Item>> {
    {
        let snapshot = store.snapshot();
        for &id in ids {
            snapshot.get(&id).ok_or(DriveError::NotFound(id))?;
        }
    }

    let mut affected = Vec::new();
    for &id in ids {
        let mut latest = None;
        for grant in grants {
            latest = Some(store.grant(id, grant.clone())?);
        }
        let item = match latest {
            Some(item) => item,
            None => store.set_attributes(id, AttrPatch::new().shared(true))?,
        };
        affected.push(item);
    }
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PermissionRole;
    use crate::store::fixtures::sample_drive;

    #[test]
    fn test_share_applies_grants_to_every_item() {
        let mut drive = sample_drive();
        let grants = vec![
            Permission::new("user-1", PermissionRole::Viewer),
            Permission::new("user-2", PermissionRole::Editor).for_team("team-1"),
        ];
        let shared = run(&mut drive.store, &[drive.q3, drive.readme], &grants).unwrap();

        assert_eq!(shared.len(), 2);
        for item in &shared {
            assert!(item.is_shared);
            assert_eq!(item.permissions.len(), 2);
        }
    }

    #[test]
    fn test_share_without_grants_still_marks_shared() {
        let mut drive = sample_drive();
        let shared = run(&mut drive.store, &[drive.archive], &[]).unwrap();

        assert!(shared[0].is_shared);
        assert!(shared[0].permissions.is_empty());
    }

    #[test]
    fn test_unknown_id_aborts_whole_batch() {
        let mut drive = sample_drive();
        let ghost = Uuid::from_u128(99);
        let result = run(&mut drive.store, &[drive.q3, ghost], &[]);

        assert!(matches!(result, Err(DriveError::NotFound(id)) if id == ghost));
        assert!(!drive.store.get(&drive.q3).unwrap().is_shared);
    }
}
