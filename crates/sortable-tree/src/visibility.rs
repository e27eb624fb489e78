//! Hiding collapsed and dragged subtrees from the flat sequence

use std::collections::HashSet;

use crate::codec::flatten;
use crate::item::{FlattenedItem, ItemId, TreeItem};

/// Remove every descendant of the given ids, keeping the ids themselves
///
/// Single left-to-right pass over a pre-order sequence: an item whose parent
/// is excluded is dropped, and its own id joins the excluded set when it has
/// children. The relative order of the remaining items is preserved.
pub fn remove_children_of<'a, I>(items: Vec<FlattenedItem>, hidden_ancestor_ids: I) -> Vec<FlattenedItem>
where
    I: IntoIterator<Item = &'a ItemId>,
{
    let mut excluded: HashSet<ItemId> = hidden_ancestor_ids.into_iter().cloned().collect();

    items
        .into_iter()
        .filter(|flat| {
            let hidden = flat
                .parent_id
                .as_ref()
                .is_some_and(|parent_id| excluded.contains(parent_id));
            if hidden && flat.has_children() {
                excluded.insert(flat.id().clone());
            }
            !hidden
        })
        .collect()
}

/// Ids of items that are collapsed and actually have children
pub fn collapsed_ids(items: &[FlattenedItem]) -> Vec<ItemId> {
    items
        .iter()
        .filter(|flat| flat.item.collapsed && flat.has_children())
        .map(|flat| flat.id().clone())
        .collect()
}

/// The sequence used as the ordering context for a drag
///
/// Children of collapsed items and of the active item are hidden, and
/// when `max_depth` is set, so is anything nested deeper than it.
pub fn visible_items(
    tree: &[TreeItem],
    active_id: Option<&ItemId>,
    max_depth: Option<usize>,
) -> Vec<FlattenedItem> {
    let flattened = flatten(tree);
    let mut hidden = collapsed_ids(&flattened);
    if let Some(active_id) = active_id {
        hidden.insert(0, active_id.clone());
    }

    let mut visible = remove_children_of(flattened, &hidden);
    if let Some(max_depth) = max_depth {
        visible.retain(|flat| flat.depth <= max_depth);
    }
    visible
}
