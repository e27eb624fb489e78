//! Sortable Tree
//!
//! The model behind a drag-and-drop outline: items are reordered and
//! reparented by dragging them vertically over other items and horizontally
//! to change their depth.
//!
//! # Core Concepts
//!
//! - **Flatten/Build**: lossless conversion between the nested tree and a
//!   pre-order sequence annotated with parent, depth, index and path
//! - **Visible sequence**: the flat list with collapsed and dragged subtrees
//!   removed, used as the ordering context of a drag
//! - **Projection**: the depth and parent a dragged item would land at
//! - **DragSession**: start, move, then commit or cancel; the only place a
//!   drag turns into a new tree
//!
//! # Example
//!
//! ```
//! use sortable_tree::prelude::*;
//!
//! let mut tree = SortableTree::with_config(
//!     vec![
//!         TreeItem::leaf("a").with_children(vec![TreeItem::leaf("b"), TreeItem::leaf("c")]),
//!         TreeItem::leaf("d"),
//!     ],
//!     TreeConfig::new(),
//! )
//! .expect("ids are unique");
//!
//! // Drag `c` one indentation to the left, out of `a`
//! let c = ItemId::from("c");
//! tree.drag_start(&c);
//! tree.drag_move(Some(c.clone()), -50.0);
//! tree.drag_end(Some(&c)).expect("tree is well formed");
//!
//! for row in tree.rows() {
//!     println!("{:indent$}{}", "", row.title, indent = row.depth * 2);
//! }
//! ```

mod codec;
mod config;
mod error;
mod flat_data;
mod item;
mod ops;
mod permission;
mod projection;
mod session;
mod tree;
mod visibility;

pub use codec::{build, flatten, validate};
pub use config::{TreeConfig, DEFAULT_INDENTATION_WIDTH};
pub use error::{Result, StructuralError};
pub use flat_data::{from_flat_data, to_flat_data, FlatTreeItem};
pub use item::{Children, FlattenedItem, ItemId, Metadata, TreeItem, TreeItems};
pub use ops::{child_count, find_item, remove_item, set_collapsed, toggle_collapsed, update_item};
pub use permission::{is_draggable, AllowAll, PermissionGate, Predicates};
pub use projection::{drag_depth, get_projection, Projection};
pub use session::{ActiveDrag, DragSession, DragState, DropOutcome, DropRejection};
pub use tree::{SortableTree, TreeRow};
pub use visibility::{collapsed_ids, remove_children_of, visible_items};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        DragSession, DropOutcome, DropRejection, ItemId, PermissionGate, Predicates, Projection,
        SortableTree, TreeConfig, TreeItem, TreeItems,
    };
}
