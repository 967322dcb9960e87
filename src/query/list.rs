use uuid::Uuid;

use crate::model::Item;
use crate::store::Snapshot;

use super::sort::{sort_items, SortSpec};

/// Filters for [`list_children`]. `search` matches case-insensitively as a
/// substring of the item name.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Lists the direct children of a folder (`None` for root-level items),
/// filtered and sorted. This is the main-view listing; it never recurses.
pub fn list_children(
    snapshot: &Snapshot,
    folder: Option<Uuid>,
    filter: &ListFilter,
    sort: &SortSpec,
) -> Vec<Item> {
    let needle = filter.search.as_ref().map(|search| search.to_lowercase());
    let mut items: Vec<Item> = snapshot
        .iter()
        .filter(|item| item.parent_id == folder)
        .filter(|item| match &filter.category {
            Some(category) => item.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|item| match &needle {
            Some(needle) => item.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    sort_items(&mut items, sort);
    items
}
