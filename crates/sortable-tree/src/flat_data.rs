//! Parent/order form of a tree, for hosts that persist rows
//!
//! Each row names its parent and its position among siblings, which maps
//! directly onto a table. Converting back sorts siblings by `order` and
//! rebuilds the tree with [`build`](crate::build).

use std::sync::Arc;

use crate::codec::{build, flatten};
use crate::error::Result;
use crate::item::{FlattenedItem, ItemId, Metadata, TreeItem, TreeItems};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of the persisted form
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlatTreeItem {
    pub id: ItemId,
    pub title: String,
    pub parent: Option<ItemId>,
    pub order: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collapsed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: Metadata,
}

/// Convert a tree to rows, in pre-order
pub fn to_flat_data(items: &[TreeItem]) -> Vec<FlatTreeItem> {
    flatten(items)
        .into_iter()
        .map(|flat| FlatTreeItem {
            id: flat.item.id,
            title: flat.item.title,
            parent: flat.parent_id,
            order: flat.index,
            collapsed: flat.item.collapsed,
            disabled: flat.item.disabled,
            metadata: flat.item.metadata,
        })
        .collect()
}

/// Rebuild a tree from rows in any order
///
/// Siblings are ordered by `order`; ties keep their row order. Duplicate
/// ids, unknown parents and parent cycles are reported as errors.
pub fn from_flat_data(mut rows: Vec<FlatTreeItem>) -> Result<TreeItems> {
    rows.sort_by_key(|row| row.order);

    let flattened = rows
        .into_iter()
        .map(|row| FlattenedItem {
            item: TreeItem {
                id: row.id,
                title: row.title,
                children: Arc::from(Vec::new()),
                collapsed: row.collapsed,
                disabled: row.disabled,
                metadata: row.metadata,
            },
            parent_id: row.parent,
            // Recomputed by `build`
            depth: 0,
            index: row.order,
            path: String::new(),
        })
        .collect();

    build(flattened)
}
