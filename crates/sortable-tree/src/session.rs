//! The drag lifecycle: start, any number of moves, then commit or cancel
//!
//! A session never mutates the tree it is given. A successful commit hands
//! back a new tree; every other outcome leaves the caller's tree as it was.

use derive_more::Display;
use log::{debug, trace, warn};

use crate::codec::{build, flatten};
use crate::config::TreeConfig;
use crate::error::Result;
use crate::item::{FlattenedItem, ItemId, TreeItem, TreeItems};
use crate::ops::find_item;
use crate::permission::{is_draggable, AllowAll, PermissionGate};
use crate::projection::{get_projection, Projection};
use crate::visibility::visible_items;

/// Why a drop left the tree unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DropRejection {
    /// No drag was in progress
    #[display(fmt = "no drag in progress")]
    NotDragging,

    /// Nothing under the pointer, or no valid landing place
    #[display(fmt = "no valid drop position")]
    Indeterminate,

    /// The drop would move the item to another parent and that is disabled
    #[display(fmt = "changing parent is not allowed")]
    ParentChangeDenied,

    /// The permission gate refused the drop
    #[display(fmt = "drop not permitted")]
    DropDenied,

    /// The drop would nest the item deeper than the configured maximum
    #[display(fmt = "maximum depth exceeded")]
    MaxDepthExceeded,
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item moved; `items` is the new tree
    Moved {
        items: TreeItems,
        projection: Projection,
    },

    /// The tree is unchanged
    Rejected(DropRejection),
}

impl DropOutcome {
    /// Returns true if the drop produced a new tree
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }

    /// The new tree, if the drop succeeded
    pub fn into_items(self) -> Option<TreeItems> {
        match self {
            DropOutcome::Moved { items, .. } => Some(items),
            DropOutcome::Rejected(_) => None,
        }
    }
}

/// State of an in-progress drag
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    /// The item being dragged
    pub active_id: ItemId,

    /// The item under the pointer
    pub over_id: Option<ItemId>,

    /// Horizontal distance from the drag start
    pub offset: f64,

    /// Parent of the active item when the drag started
    pub anchor_parent: Option<ItemId>,

    visible: Vec<FlattenedItem>,
}

impl ActiveDrag {
    /// The visible sequence the drag is projected onto
    pub fn visible(&self) -> &[FlattenedItem] {
        &self.visible
    }
}

/// Drag lifecycle state
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// One tree's drag state machine
///
/// # Example
///
/// ```
/// use sortable_tree::{DragSession, ItemId, TreeConfig, TreeItem};
///
/// let tree = vec![
///     TreeItem::leaf("a").with_children(vec![TreeItem::leaf("b")]),
///     TreeItem::leaf("c"),
/// ];
/// let mut session = DragSession::with_config(TreeConfig::new());
///
/// let c = ItemId::from("c");
/// assert!(session.start(&tree, &c));
/// // One indentation to the right of its own position: nest under `a`
/// let projection = session.move_over(Some(c.clone()), 50.0).unwrap();
/// assert_eq!(projection.parent_id, Some(ItemId::from("a")));
///
/// let items = session.commit(&tree, Some(&c)).unwrap().into_items().unwrap();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].children.len(), 2);
/// ```
#[derive(Debug)]
pub struct DragSession<G = AllowAll> {
    config: TreeConfig,
    gate: G,
    state: DragState,
}

impl DragSession<AllowAll> {
    /// Create a session that allows every drag and drop
    pub fn with_config(config: TreeConfig) -> Self {
        Self::new(config, AllowAll)
    }
}

impl Default for DragSession<AllowAll> {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
    }
}

impl<G: PermissionGate> DragSession<G> {
    /// Create a new idle session
    pub fn new(config: TreeConfig, gate: G) -> Self {
        Self {
            config,
            gate,
            state: DragState::Idle,
        }
    }

    /// The configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The permission gate
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Current state
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns true while a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The in-progress drag, if any
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    /// Id of the item being dragged
    pub fn active_id(&self) -> Option<&ItemId> {
        self.active().map(|drag| &drag.active_id)
    }

    /// Id of the item under the pointer
    pub fn over_id(&self) -> Option<&ItemId> {
        self.active().and_then(|drag| drag.over_id.as_ref())
    }

    /// Whether the item may start a drag
    pub fn is_draggable(&self, item: &TreeItem) -> bool {
        is_draggable(&self.gate, item)
    }

    /// Begin dragging `id`
    ///
    /// Returns false, and stays idle, if a drag is already in progress, the id
    /// is not in the tree, or the item may not be dragged.
    pub fn start(&mut self, tree: &[TreeItem], id: &ItemId) -> bool {
        if let Some(active_id) = self.active_id() {
            debug!("Ignoring drag start of {} while {} is active", id, active_id);
            return false;
        }

        let anchor = flatten(tree).into_iter().find(|flat| flat.id() == id);
        let Some(anchor) = anchor else {
            debug!("Ignoring drag start of unknown item {}", id);
            return false;
        };
        if !self.is_draggable(&anchor.item) {
            debug!("Item {} is locked, not starting drag", id);
            return false;
        }

        debug!("Drag started: {}", id);
        self.state = DragState::Dragging(ActiveDrag {
            active_id: id.clone(),
            over_id: Some(id.clone()),
            offset: 0.0,
            anchor_parent: anchor.parent_id,
            visible: visible_items(tree, Some(id), self.config.max_depth),
        });
        true
    }

    /// Update the pointer position and return the live projection
    ///
    /// Ignored while idle. Never touches the tree.
    pub fn move_over(&mut self, over_id: Option<ItemId>, offset: f64) -> Option<Projection> {
        let DragState::Dragging(drag) = &mut self.state else {
            trace!("Ignoring pointer move while idle");
            return None;
        };
        drag.over_id = over_id;
        drag.offset = offset;

        let projection = self.projection();
        trace!("Projection at offset {}: {:?}", offset, projection);
        projection
    }

    /// The projection for the current pointer position
    pub fn projection(&self) -> Option<Projection> {
        let drag = self.active()?;
        let over_id = drag.over_id.as_ref()?;
        get_projection(
            &drag.visible,
            &drag.active_id,
            over_id,
            drag.offset,
            self.config.indentation_width,
        )
    }

    /// Re-derive the visible sequence after the tree changed mid-drag
    pub fn refresh(&mut self, tree: &[TreeItem]) {
        let max_depth = self.config.max_depth;
        if let DragState::Dragging(drag) = &mut self.state {
            drag.visible = visible_items(tree, Some(&drag.active_id), max_depth);
        }
    }

    /// Whether the gate allows dropping the active item over the item under
    /// the pointer, checked against the items of `tree`
    ///
    /// False while idle or when nothing is under the pointer.
    pub fn can_drop_over(&self, tree: &[TreeItem]) -> bool {
        let Some(drag) = self.active() else {
            return false;
        };
        let Some(over_id) = drag.over_id.as_ref() else {
            return false;
        };
        match (find_item(tree, &drag.active_id), find_item(tree, over_id)) {
            (Some(source), Some(target)) => self.gate.can_drop(source, target),
            _ => false,
        }
    }

    /// Abandon the drag; the tree is untouched
    ///
    /// Returns true if a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                debug!("Drag cancelled: {}", drag.active_id);
                true
            }
            DragState::Idle => false,
        }
    }

    /// End the drag over `over_id`
    ///
    /// The session is idle afterwards whatever the outcome. Policy failures
    /// come back as [`DropOutcome::Rejected`]; only a tree that cannot be
    /// rebuilt is an error.
    pub fn commit(&mut self, tree: &[TreeItem], over_id: Option<&ItemId>) -> Result<DropOutcome> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            debug!("Ignoring drop while idle");
            return Ok(DropOutcome::Rejected(DropRejection::NotDragging));
        };

        match self.evaluate(tree, &drag, over_id) {
            Ok(projection) => self.apply(tree, &drag.active_id, over_id, projection),
            Err(rejection) => {
                debug!("Drop of {} rejected: {}", drag.active_id, rejection);
                Ok(DropOutcome::Rejected(rejection))
            }
        }
    }

    fn evaluate(
        &self,
        tree: &[TreeItem],
        drag: &ActiveDrag,
        over_id: Option<&ItemId>,
    ) -> std::result::Result<Projection, DropRejection> {
        let over_id = over_id.ok_or(DropRejection::Indeterminate)?;
        let visible = visible_items(tree, Some(&drag.active_id), self.config.max_depth);
        let projection = get_projection(
            &visible,
            &drag.active_id,
            over_id,
            drag.offset,
            self.config.indentation_width,
        )
        .ok_or(DropRejection::Indeterminate)?;

        if !self.config.can_change_parent && projection.parent_id != drag.anchor_parent {
            return Err(DropRejection::ParentChangeDenied);
        }

        let source = find_item(tree, &drag.active_id).ok_or(DropRejection::Indeterminate)?;
        let target = find_item(tree, over_id).ok_or(DropRejection::Indeterminate)?;
        if !self.gate.can_drop(source, target) {
            return Err(DropRejection::DropDenied);
        }

        if !self.config.depth_allowed(projection.depth) {
            return Err(DropRejection::MaxDepthExceeded);
        }

        Ok(projection)
    }

    fn apply(
        &self,
        tree: &[TreeItem],
        active_id: &ItemId,
        over_id: Option<&ItemId>,
        projection: Projection,
    ) -> Result<DropOutcome> {
        // Work on a fresh copy; `tree` itself is never touched
        let mut flattened = flatten(tree);
        let active_index = flattened.iter().position(|flat| flat.id() == active_id);
        let over_index = over_id.and_then(|over_id| flattened.iter().position(|flat| flat.id() == over_id));
        let (Some(active_index), Some(over_index)) = (active_index, over_index) else {
            return Ok(DropOutcome::Rejected(DropRejection::Indeterminate));
        };

        let mut moved = flattened.remove(active_index);
        moved.depth = projection.depth;
        moved.parent_id = projection.parent_id.clone();
        flattened.insert(over_index, moved);

        match build(flattened) {
            Ok(items) => {
                debug!(
                    "Dropped {} at depth {} under {:?}",
                    active_id, projection.depth, projection.parent_id
                );
                Ok(DropOutcome::Moved { items, projection })
            }
            Err(err) => {
                warn!("Drop of {} produced a malformed tree: {}", active_id, err);
                Err(err)
            }
        }
    }
}
