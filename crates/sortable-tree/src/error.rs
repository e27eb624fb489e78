use derive_more::Display;

use crate::item::ItemId;

/// A malformed tree or flat sequence
///
/// Returned instead of producing a corrupted tree. Policy rejections during a
/// drag are not errors, see [`DropRejection`](crate::DropRejection).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StructuralError {
    /// The same id appears more than once
    #[display(fmt = "duplicate item id `{}`", id)]
    DuplicateId { id: ItemId },

    /// An item points at a parent that is not in the sequence
    #[display(fmt = "item `{}` references missing parent `{}`", id, parent_id)]
    MissingParent { id: ItemId, parent_id: ItemId },

    /// An item's parent chain never reaches the root
    #[display(fmt = "item `{}` is part of a parent cycle", id)]
    Cycle { id: ItemId },
}

impl std::error::Error for StructuralError {}

/// Convenience alias for results carrying a [`StructuralError`]
pub type Result<T, E = StructuralError> = std::result::Result<T, E>;
