//! Queries and functional edits on the nested tree
//!
//! Edits never mutate the input. They rebuild the path from the top level
//! down to the edited item and share every untouched subtree by reference.

use std::sync::Arc;

use crate::item::{ItemId, TreeItem, TreeItems};

/// Find an item anywhere in the tree
pub fn find_item<'a>(items: &'a [TreeItem], id: &ItemId) -> Option<&'a TreeItem> {
    let mut stack: Vec<&TreeItem> = items.iter().rev().collect();
    while let Some(item) = stack.pop() {
        if &item.id == id {
            return Some(item);
        }
        stack.extend(item.children.iter().rev());
    }
    None
}

/// Number of descendants of an item, at any depth
///
/// Returns 0 for leaves and unknown ids.
pub fn child_count(items: &[TreeItem], id: &ItemId) -> usize {
    find_item(items, id).map_or(0, |item| count_descendants(&item.children))
}

fn count_descendants(children: &[TreeItem]) -> usize {
    children
        .iter()
        .map(|child| 1 + count_descendants(&child.children))
        .sum()
}

/// Apply `edit` to the item with `id`, returning the new tree
///
/// Returns `None` when the id is not in the tree.
pub fn update_item<F>(items: &[TreeItem], id: &ItemId, edit: F) -> Option<TreeItems>
where
    F: FnOnce(&mut TreeItem),
{
    let mut edit = Some(edit);
    rebuild_path(items, id, &mut |item: &mut TreeItem| {
        if let Some(edit) = edit.take() {
            edit(item);
        }
    })
}

fn rebuild_path(
    siblings: &[TreeItem],
    id: &ItemId,
    edit: &mut dyn FnMut(&mut TreeItem),
) -> Option<Vec<TreeItem>> {
    for (position, item) in siblings.iter().enumerate() {
        let replacement = if &item.id == id {
            let mut edited = item.clone();
            edit(&mut edited);
            Some(edited)
        } else {
            rebuild_path(&item.children, id, edit).map(|children| {
                let mut parent = item.clone();
                parent.children = Arc::from(children);
                parent
            })
        };

        if let Some(replacement) = replacement {
            // Sibling clones are shallow: their children stay shared
            let mut rebuilt = siblings.to_vec();
            rebuilt[position] = replacement;
            return Some(rebuilt);
        }
    }
    None
}

/// Set the collapsed flag of an item
///
/// Returns `None` when the id is not in the tree.
pub fn set_collapsed(items: &[TreeItem], id: &ItemId, collapsed: bool) -> Option<TreeItems> {
    update_item(items, id, |item| item.collapsed = collapsed)
}

/// Flip the collapsed flag of an item
///
/// Returns `None` when the id is not in the tree.
pub fn toggle_collapsed(items: &[TreeItem], id: &ItemId) -> Option<TreeItems> {
    update_item(items, id, |item| item.collapsed = !item.collapsed)
}

/// Remove an item together with its subtree
///
/// Returns `None` when the id is not in the tree.
pub fn remove_item(items: &[TreeItem], id: &ItemId) -> Option<TreeItems> {
    if let Some(position) = items.iter().position(|item| &item.id == id) {
        let mut remaining = items.to_vec();
        remaining.remove(position);
        return Some(remaining);
    }

    for (position, item) in items.iter().enumerate() {
        if let Some(children) = remove_item(&item.children, id) {
            let mut parent = item.clone();
            parent.children = Arc::from(children);
            let mut rebuilt = items.to_vec();
            rebuilt[position] = parent;
            return Some(rebuilt);
        }
    }
    None
}
