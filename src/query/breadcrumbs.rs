use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::error::{DriveError, Result};
use crate::model::{ItemKind, MAX_TREE_DEPTH};
use crate::store::Snapshot;

/// Name of the synthetic root segment when no category is active.
pub const ALL_FILES_LABEL: &str = "All Files";

static CATEGORY_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("meetings", "Meetings"),
        ("calls", "Calls"),
        ("emails", "Emails"),
        ("marketing", "Marketing"),
        ("proposals", "Proposals"),
        ("customers", "Customer Documents"),
        ("others", "Others"),
        ("personal", "Personal Files"),
        ("transcripts", "Transcripts"),
        ("recordings", "Recordings"),
        ("documents", "Documents"),
        ("images", "Images"),
        ("videos", "Videos"),
        ("audio", "Audio"),
        ("archives", "Archives"),
        ("other", "Other"),
    ])
});

/// Display label for a category id. Unknown ids display as themselves.
pub fn category_label(category: &str) -> &str {
    CATEGORY_LABELS.get(category).copied().unwrap_or(category)
}

/// One segment of a breadcrumb path. `id` is `None` for the synthetic root
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: Option<Uuid>,
    pub name: String,
}

/// Derives the breadcrumb path to `folder`, root-first, starting with a
/// synthetic segment labelled "All Files" or the active category's label.
///
/// Fails when `folder` is supplied but does not resolve to a folder; the
/// caller is expected to treat that as "reset to root" (the id went stale
/// under it, e.g. the folder was deleted from another dialog).
pub fn breadcrumb_path(
    snapshot: &Snapshot,
    folder: Option<Uuid>,
    category: Option<&str>,
) -> Result<Vec<Crumb>> {
    let root_name = match category {
        Some(category) => category_label(category).to_string(),
        None => ALL_FILES_LABEL.to_string(),
    };
    let mut crumbs = vec![Crumb {
        id: None,
        name: root_name,
    }];

    let Some(folder_id) = folder else {
        return Ok(crumbs);
    };

    // Walk up the parent chain, then flip into root-first order.
    let mut chain = Vec::new();
    let mut current = Some(folder_id);
    let mut depth = 0;
    while let Some(id) = current {
        let item = snapshot.get(&id).ok_or(DriveError::NotFound(id))?;
        if item.kind != ItemKind::Folder {
            return Err(DriveError::TypeMismatch {
                id,
                expected: ItemKind::Folder,
                actual: item.kind,
            });
        }
        chain.push(Crumb {
            id: Some(item.id),
            name: item.name.clone(),
        });
        depth += 1;
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        current = item.parent_id;
    }
    chain.reverse();
    crumbs.extend(chain);
    Ok(crumbs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_drive;

    fn crumb_names(crumbs: &[Crumb]) -> Vec<&str> {
        crumbs.iter().map(|crumb| crumb.name.as_str()).collect()
    }

    #[test]
    fn test_path_is_root_first() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let crumbs = breadcrumb_path(&snapshot, Some(drive.reports), None).unwrap();

        assert_eq!(crumb_names(&crumbs), vec!["All Files", "Projects", "Reports"]);
        assert_eq!(crumbs[0].id, None);
        assert_eq!(crumbs[1].id, Some(drive.projects));
        assert_eq!(crumbs[2].id, Some(drive.reports));
    }

    #[test]
    fn test_path_covers_deep_chains() {
        let mut drive = sample_drive();
        let deep = drive
            .store
            .create(crate::model::NewItem::folder("Deep").with_parent(Some(drive.reports)))
            .unwrap();

        let snapshot = drive.store.snapshot();
        let crumbs = breadcrumb_path(&snapshot, Some(deep.id), None).unwrap();
        assert_eq!(
            crumb_names(&crumbs),
            vec!["All Files", "Projects", "Reports", "Deep"]
        );
    }

    #[test]
    fn test_no_folder_yields_root_segment_only() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let crumbs = breadcrumb_path(&snapshot, None, None).unwrap();
        assert_eq!(crumb_names(&crumbs), vec!["All Files"]);
    }

    #[test]
    fn test_active_category_labels_the_root_segment() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let crumbs = breadcrumb_path(&snapshot, None, Some("transcripts")).unwrap();
        assert_eq!(crumb_names(&crumbs), vec!["Transcripts"]);
    }

    #[test]
    fn test_unknown_category_id_labels_as_itself() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let crumbs = breadcrumb_path(&snapshot, None, Some("q3-specials")).unwrap();
        assert_eq!(crumb_names(&crumbs), vec!["q3-specials"]);
    }

    #[test]
    fn test_stale_folder_id_is_reported() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let ghost = Uuid::from_u128(99);
        let result = breadcrumb_path(&snapshot, Some(ghost), None);
        assert!(matches!(result, Err(DriveError::NotFound(id)) if id == ghost));
    }

    #[test]
    fn test_file_id_is_not_a_breadcrumb_target() {
        let drive = sample_drive();
        let snapshot = drive.store.snapshot();
        let result = breadcrumb_path(&snapshot, Some(drive.q3), None);
        assert!(matches!(result, Err(DriveError::TypeMismatch { .. })));
    }

    #[test]
    fn test_category_label_table() {
        assert_eq!(category_label("customers"), "Customer Documents");
        assert_eq!(category_label("personal"), "Personal Files");
        assert_eq!(category_label("something-else"), "something-else");
    }
}
