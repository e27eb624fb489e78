//! Configuration options for a sortable tree.
//!
//! This module provides the `TreeConfig` struct which controls the
//! indentation used to turn pointer offsets into depths, the nesting limit
//! and the reparenting policy of one tree instance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default width of one depth level, in pointer units.
pub const DEFAULT_INDENTATION_WIDTH: f64 = 50.0;

/// Static configuration for one tree instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TreeConfig {
    /// Width of one depth level in the same units as the drag offset.
    pub indentation_width: f64,

    /// Deepest depth an item may be dropped at. `None` means unlimited.
    ///
    /// Items deeper than this are also left out of the visible sequence.
    pub max_depth: Option<usize>,

    /// Whether a drop may move an item under a different parent.
    pub can_change_parent: bool,

    /// Whether items with children may be collapsed.
    pub allow_collapse: bool,

    /// Whether the row under the pointer is marked as the drop indicator.
    pub indicator: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            indentation_width: DEFAULT_INDENTATION_WIDTH,
            max_depth: None,
            can_change_parent: true,
            allow_collapse: true,
            indicator: false,
        }
    }
}

impl TreeConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width.
    pub fn indentation_width(mut self, width: f64) -> Self {
        self.indentation_width = width;
        self
    }

    /// Set the maximum drop depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the maximum drop depth.
    pub fn unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Allow or forbid reparenting.
    pub fn can_change_parent(mut self, allowed: bool) -> Self {
        self.can_change_parent = allowed;
        self
    }

    /// Allow or forbid collapsing.
    pub fn allow_collapse(mut self, allowed: bool) -> Self {
        self.allow_collapse = allowed;
        self
    }

    /// Enable or disable the drop indicator.
    pub fn indicator(mut self, enabled: bool) -> Self {
        self.indicator = enabled;
        self
    }

    /// Returns true if `depth` is within the configured maximum.
    pub fn depth_allowed(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}
