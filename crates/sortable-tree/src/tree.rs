//! A sortable tree that owns its items
//!
//! Ties the pieces together the way a host view would: it keeps the
//! authoritative items, routes drag events to a [`DragSession`], swaps in the
//! new tree on a successful drop and produces one [`TreeRow`] per visible
//! item for rendering.

use log::debug;

use crate::codec::validate;
use crate::config::TreeConfig;
use crate::error::Result;
use crate::item::{ItemId, TreeItem, TreeItems};
use crate::ops::{child_count, find_item, toggle_collapsed};
use crate::permission::{AllowAll, PermissionGate};
use crate::projection::Projection;
use crate::session::{DragSession, DropOutcome};
use crate::visibility::visible_items;

/// What the rendering layer needs to draw one visible item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: ItemId,
    pub title: String,
    /// Indentation level; the projected depth for the item being dragged
    pub depth: usize,
    pub collapsed: bool,
    /// Number of direct children
    pub child_count: usize,
    /// Whether a collapse toggle should be offered
    pub has_children: bool,
    /// False marks the row as locked
    pub draggable: bool,
    /// The row is under the pointer and indicators are enabled
    pub indicator: bool,
    /// The row is under the pointer and the gate allows dropping onto it
    pub droppable: bool,
    /// The row is the item being dragged
    pub ghost: bool,
}

/// Items plus the drag session acting on them
#[derive(Debug)]
pub struct SortableTree<G = AllowAll> {
    items: TreeItems,
    session: DragSession<G>,
}

impl SortableTree<AllowAll> {
    /// Create a tree that allows every drag and drop
    pub fn with_config(items: TreeItems, config: TreeConfig) -> Result<Self> {
        Self::new(items, config, AllowAll)
    }
}

impl<G: PermissionGate> SortableTree<G> {
    /// Create a new tree, rejecting duplicate ids
    pub fn new(items: TreeItems, config: TreeConfig, gate: G) -> Result<Self> {
        validate(&items)?;
        Ok(Self {
            items,
            session: DragSession::new(config, gate),
        })
    }

    /// The current items
    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Take the items out
    pub fn into_items(self) -> TreeItems {
        self.items
    }

    /// The configuration
    pub fn config(&self) -> &TreeConfig {
        self.session.config()
    }

    /// The drag session
    pub fn session(&self) -> &DragSession<G> {
        &self.session
    }

    /// Begin dragging an item
    pub fn drag_start(&mut self, id: &ItemId) -> bool {
        self.session.start(&self.items, id)
    }

    /// Pointer moved; returns the live projection
    pub fn drag_move(&mut self, over_id: Option<ItemId>, offset: f64) -> Option<Projection> {
        self.session.move_over(over_id, offset)
    }

    /// Drop the dragged item over `over_id`
    ///
    /// On success the items are replaced by the rebuilt tree.
    pub fn drag_end(&mut self, over_id: Option<&ItemId>) -> Result<DropOutcome> {
        let outcome = self.session.commit(&self.items, over_id)?;
        if let DropOutcome::Moved { items, .. } = &outcome {
            self.items = items.clone();
        }
        Ok(outcome)
    }

    /// Abandon the drag
    pub fn drag_cancel(&mut self) -> bool {
        self.session.cancel()
    }

    /// Collapse or expand an item with children
    ///
    /// Returns false if collapsing is disabled, the id is unknown or the item
    /// has no children.
    pub fn toggle_collapsed(&mut self, id: &ItemId) -> bool {
        if !self.config().allow_collapse {
            return false;
        }
        if !find_item(&self.items, id).is_some_and(TreeItem::has_children) {
            return false;
        }
        let Some(items) = toggle_collapsed(&self.items, id) else {
            return false;
        };

        debug!("Toggled collapse of {}", id);
        self.items = items;
        self.session.refresh(&self.items);
        true
    }

    /// Rows for every visible item, in display order
    pub fn rows(&self) -> Vec<TreeRow> {
        let config = self.config();
        let active_id = self.session.active_id();
        let over_id = self.session.over_id();
        let projection = self.session.projection();
        let droppable = self.session.can_drop_over(&self.items);

        visible_items(&self.items, active_id, config.max_depth)
            .into_iter()
            .map(|flat| {
                let is_active = active_id == Some(flat.id());
                let is_over = active_id.is_some() && over_id == Some(flat.id());
                let depth = match (&projection, is_active) {
                    (Some(projection), true) => projection.depth,
                    _ => flat.depth,
                };
                TreeRow {
                    indicator: config.indicator && is_over,
                    droppable: droppable && is_over,
                    ghost: is_active,
                    draggable: self.session.is_draggable(&flat.item),
                    child_count: flat.item.children.len(),
                    has_children: flat.has_children(),
                    collapsed: flat.item.collapsed,
                    depth,
                    title: flat.item.title,
                    id: flat.item.id,
                }
            })
            .collect()
    }

    /// Count shown on the drag overlay: the active item plus its descendants
    pub fn overlay_child_count(&self) -> Option<usize> {
        let active_id = self.session.active_id()?;
        Some(child_count(&self.items, active_id) + 1)
    }
}
