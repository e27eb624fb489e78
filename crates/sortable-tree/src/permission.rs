//! Host-supplied drag and drop permissions

use std::fmt;

use crate::item::TreeItem;

/// Decides which items may be dragged and where they may be dropped
///
/// Both checks default to allowing everything. Implementations must be pure:
/// they are called on every pointer move as well as at commit time, always
/// with the items of the authoritative tree.
pub trait PermissionGate {
    /// May this item start a drag
    fn can_drag(&self, _item: &TreeItem) -> bool {
        true
    }

    /// May `source` be dropped over `target`
    fn can_drop(&self, _source: &TreeItem, _target: &TreeItem) -> bool {
        true
    }
}

/// A gate that allows every drag and drop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl PermissionGate for AllowAll {}

impl<G: PermissionGate + ?Sized> PermissionGate for &G {
    fn can_drag(&self, item: &TreeItem) -> bool {
        (**self).can_drag(item)
    }

    fn can_drop(&self, source: &TreeItem, target: &TreeItem) -> bool {
        (**self).can_drop(source, target)
    }
}

impl<G: PermissionGate + ?Sized> PermissionGate for Box<G> {
    fn can_drag(&self, item: &TreeItem) -> bool {
        (**self).can_drag(item)
    }

    fn can_drop(&self, source: &TreeItem, target: &TreeItem) -> bool {
        (**self).can_drop(source, target)
    }
}

type DragPredicate = Box<dyn Fn(&TreeItem) -> bool>;
type DropPredicate = Box<dyn Fn(&TreeItem, &TreeItem) -> bool>;

/// A gate built from closures
///
/// # Example
///
/// ```
/// use sortable_tree::{PermissionGate, Predicates, TreeItem};
///
/// let gate = Predicates::new()
///     .with_can_drag(|item| item.metadata.get("locked").is_none())
///     .with_can_drop(|_source, target| target.id.as_str() != "trash");
///
/// assert!(gate.can_drag(&TreeItem::leaf("a")));
/// assert!(!gate.can_drop(&TreeItem::leaf("a"), &TreeItem::leaf("trash")));
/// ```
#[derive(Default)]
pub struct Predicates {
    can_drag: Option<DragPredicate>,
    can_drop: Option<DropPredicate>,
}

impl Predicates {
    /// Create a gate with no predicates, allowing everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drag predicate
    pub fn with_can_drag(mut self, predicate: impl Fn(&TreeItem) -> bool + 'static) -> Self {
        self.can_drag = Some(Box::new(predicate));
        self
    }

    /// Set the drop predicate
    pub fn with_can_drop(mut self, predicate: impl Fn(&TreeItem, &TreeItem) -> bool + 'static) -> Self {
        self.can_drop = Some(Box::new(predicate));
        self
    }
}

impl PermissionGate for Predicates {
    fn can_drag(&self, item: &TreeItem) -> bool {
        self.can_drag.as_ref().map_or(true, |predicate| predicate(item))
    }

    fn can_drop(&self, source: &TreeItem, target: &TreeItem) -> bool {
        self.can_drop
            .as_ref()
            .map_or(true, |predicate| predicate(source, target))
    }
}

impl fmt::Debug for Predicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicates")
            .field("can_drag", &self.can_drag.is_some())
            .field("can_drop", &self.can_drop.is_some())
            .finish()
    }
}

/// Whether the item may be picked up: not disabled and allowed by the gate
///
/// Rendering uses the negation as the "locked" marker.
pub fn is_draggable<G: PermissionGate + ?Sized>(gate: &G, item: &TreeItem) -> bool {
    !item.disabled && gate.can_drag(item)
}
