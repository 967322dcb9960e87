use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Item, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive name order (lowercase fold).
    Name,
    /// Modification time. Callers usually want `Desc` here (newest first).
    Modified,
    /// File size; folders count as 0.
    Size,
    /// Folders before files, names within.
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::Name, SortOrder::Asc)
    }
}

/// Sorts items into a deterministic total order.
///
/// The primary key follows the requested direction; ties are always broken by
/// lowercased name ascending, then raw name, then id, regardless of
/// direction. Repeated calls over an unchanged collection produce identical
/// output, which keeps rendering stable.
pub fn sort_items(items: &mut [Item], spec: &SortSpec) {
    items.sort_by(|a, b| {
        let primary = match spec.key {
            SortKey::Name => folded(a).cmp(&folded(b)),
            SortKey::Modified => a.modified_at.cmp(&b.modified_at),
            SortKey::Size => effective_size(a).cmp(&effective_size(b)),
            SortKey::Kind => kind_rank(a).cmp(&kind_rank(b)),
        };
        let primary = match spec.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| tie_break(a, b))
    });
}

fn folded(item: &Item) -> String {
    item.name.to_lowercase()
}

fn effective_size(item: &Item) -> u64 {
    match item.kind {
        ItemKind::Folder => 0,
        ItemKind::File => item.size,
    }
}

fn kind_rank(item: &Item) -> u8 {
    match item.kind {
        ItemKind::Folder => 0,
        ItemKind::File => 1,
    }
}

fn tie_break(a: &Item, b: &Item) -> Ordering {
    folded(a)
        .cmp(&folded(b))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewItem;
    use crate::store::fixtures::deterministic_store;

    fn items_named(names: &[&str]) -> Vec<Item> {
        let mut store = deterministic_store();
        names
            .iter()
            .map(|name| store.create(NewItem::file(*name)).unwrap())
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let mut items = items_named(&["b", "A", "a"]);
        sort_items(&mut items, &SortSpec::default());
        // "A" and "a" fold equal; the raw-name tie break puts "A" first.
        assert_eq!(names(&items), vec!["A", "a", "b"]);
    }

    #[test]
    fn test_name_sort_is_stable_across_calls() {
        let mut first = items_named(&["b", "A", "a"]);
        let mut second = first.clone();
        sort_items(&mut first, &SortSpec::default());
        sort_items(&mut second, &SortSpec::default());
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_name_sort_descending_keeps_tie_break_ascending() {
        let mut items = items_named(&["b", "A", "a"]);
        sort_items(
            &mut items,
            &SortSpec::new(SortKey::Name, SortOrder::Desc),
        );
        assert_eq!(names(&items), vec!["b", "A", "a"]);
    }

    #[test]
    fn test_modified_descending_is_newest_first() {
        // The fixture clock steps forward per create, so later names are newer.
        let mut items = items_named(&["oldest", "middle", "newest"]);
        sort_items(
            &mut items,
            &SortSpec::new(SortKey::Modified, SortOrder::Desc),
        );
        assert_eq!(names(&items), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_size_sort_treats_folders_as_zero() {
        let mut store = deterministic_store();
        let big = store
            .create(NewItem::file("big.bin").with_size(1000))
            .unwrap();
        let folder = store
            .create(NewItem::folder("Stuffed").with_size(5000))
            .unwrap();
        let small = store
            .create(NewItem::file("small.txt").with_size(1))
            .unwrap();

        let mut items = vec![big, folder, small];
        sort_items(&mut items, &SortSpec::new(SortKey::Size, SortOrder::Asc));
        assert_eq!(names(&items), vec!["Stuffed", "small.txt", "big.bin"]);
    }

    #[test]
    fn test_kind_sort_puts_folders_first() {
        let mut store = deterministic_store();
        let file = store.create(NewItem::file("alpha.txt")).unwrap();
        let folder = store.create(NewItem::folder("zeta")).unwrap();

        let mut items = vec![file, folder];
        sort_items(&mut items, &SortSpec::new(SortKey::Kind, SortOrder::Asc));
        assert_eq!(names(&items), vec!["zeta", "alpha.txt"]);
    }

    #[test]
    fn test_kind_sort_orders_names_within_rank() {
        let mut store = deterministic_store();
        let b = store.create(NewItem::folder("beta")).unwrap();
        let a = store.create(NewItem::folder("alpha")).unwrap();
        let f = store.create(NewItem::file("zz.txt")).unwrap();

        let mut items = vec![b, a, f];
        sort_items(&mut items, &SortSpec::new(SortKey::Kind, SortOrder::Asc));
        assert_eq!(names(&items), vec!["alpha", "beta", "zz.txt"]);
    }
}
