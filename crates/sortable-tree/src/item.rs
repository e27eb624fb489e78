//! Core item types for the sortable tree

use derive_more::Display;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for an item within a tree
///
/// Opaque to the core; clones share the same backing string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct ItemId(Arc<str>);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: impl AsRef<str>) -> Self {
        ItemId(Arc::from(id.as_ref()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(Arc::from(id))
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accepts a string or an integer; integers become their decimal string
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = ItemId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<ItemId, E> {
                Ok(ItemId::new(value))
            }

            fn visit_string<E: serde::de::Error>(self, value: String) -> Result<ItemId, E> {
                Ok(ItemId::from(value))
            }

            fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<ItemId, E> {
                Ok(ItemId::from(value.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<ItemId, E> {
                Ok(ItemId::from(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Opaque key/value bag attached to an item, read only by permission predicates
pub type Metadata = BTreeMap<String, String>;

/// Ordered children of an item
///
/// Shared so that functional edits can reuse untouched subtrees.
pub type Children = Arc<[TreeItem]>;

/// The top-level sequence of a tree
pub type TreeItems = Vec<TreeItem>;

/// A single item in the tree, owning its children
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TreeItem {
    /// Stable identifier, unique across the whole tree
    pub id: ItemId,

    /// Display label
    pub title: String,

    /// Ordered children
    #[cfg_attr(
        feature = "serde",
        serde(default = "no_children", skip_serializing_if = "is_leaf")
    )]
    pub children: Children,

    /// Whether the children are hidden from the visible sequence
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub collapsed: bool,

    /// Whether the item is locked against dragging
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub disabled: bool,

    /// Host data for permission predicates
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub metadata: Metadata,
}

#[cfg(feature = "serde")]
fn no_children() -> Children {
    Arc::from(Vec::new())
}

#[cfg(feature = "serde")]
fn is_leaf(children: &Children) -> bool {
    children.is_empty()
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

impl TreeItem {
    /// Create a new leaf item
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: Arc::from(Vec::new()),
            collapsed: false,
            disabled: false,
            metadata: Metadata::new(),
        }
    }

    /// Create an item whose title is its id
    pub fn leaf(id: &str) -> Self {
        Self::new(id, id)
    }

    /// Replace the children
    pub fn with_children(mut self, children: impl Into<Vec<TreeItem>>) -> Self {
        self.children = Arc::from(children.into());
        self
    }

    /// Set the collapsed flag
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set the disabled flag
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns true if the item has at least one child
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Display for TreeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

/// A tree item annotated with its position in a pre-order traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedItem {
    /// The item itself, with its children as they were when flattened
    pub item: TreeItem,

    /// Id of the parent, `None` for top-level items. A lookup key only.
    pub parent_id: Option<ItemId>,

    /// Nesting depth, top-level items have depth 0
    pub depth: usize,

    /// Position among siblings
    pub index: usize,

    /// Dot-joined sibling indices from the root, e.g. `0.2.1`
    pub path: String,
}

impl FlattenedItem {
    /// The item's id
    pub fn id(&self) -> &ItemId {
        &self.item.id
    }

    /// Returns true if the item had children when flattened
    pub fn has_children(&self) -> bool {
        self.item.has_children()
    }
}
