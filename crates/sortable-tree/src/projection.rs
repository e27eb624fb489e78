//! Where a dragged item would land
//!
//! The projection is computed on the visible sequence as it would look with
//! the active item moved to the over position. The horizontal offset picks a
//! depth, which is clamped so the item can nest at most one level under its
//! new predecessor and no shallower than its new successor.

use crate::item::{FlattenedItem, ItemId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Candidate landing place for the active item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Projection {
    /// Depth the item would be dropped at
    pub depth: usize,

    /// Parent it would be dropped under, `None` for top level
    pub parent_id: Option<ItemId>,

    /// Shallowest depth allowed by the next item
    pub min_depth: usize,

    /// Deepest depth allowed by the previous item
    pub max_depth: usize,
}

/// Number of depth levels a horizontal offset amounts to
///
/// Halves round towards positive infinity. A width that is not a positive
/// finite number yields no depth change.
pub fn drag_depth(offset: f64, indentation_width: f64) -> i64 {
    if !(indentation_width.is_finite() && indentation_width > 0.0) || !offset.is_finite() {
        return 0;
    }
    (offset / indentation_width + 0.5).floor() as i64
}

/// Project the active item onto the visible sequence
///
/// Returns `None` when either id is not in `items`, or when no parent can be
/// resolved for the clamped depth.
pub fn get_projection(
    items: &[FlattenedItem],
    active_id: &ItemId,
    over_id: &ItemId,
    offset: f64,
    indentation_width: f64,
) -> Option<Projection> {
    let over_index = items.iter().position(|flat| flat.id() == over_id)?;
    let active_index = items.iter().position(|flat| flat.id() == active_id)?;
    let active = &items[active_index];

    // Post-move order: the active item sits at `over_index`
    let moved = move_indices(items.len(), active_index, over_index);
    let previous = over_index
        .checked_sub(1)
        .map(|position| &items[moved[position]]);
    let next = moved.get(over_index + 1).map(|&position| &items[position]);

    // Saturates: a huge offset or a tiny width only pins the depth to a bound
    let projected = (active.depth as i64).saturating_add(drag_depth(offset, indentation_width));
    let max_depth = previous.map_or(0, |flat| flat.depth + 1);
    let min_depth = next.map_or(0, |flat| flat.depth);

    let depth = if projected >= max_depth as i64 {
        max_depth
    } else if projected < min_depth as i64 {
        min_depth
    } else {
        projected as usize
    };

    let parent_id = match (depth, previous) {
        (0, _) => None,
        (_, None) => return None,
        (_, Some(previous)) => Some(resolve_parent(items, &moved, over_index, previous, depth)?),
    };

    Some(Projection {
        depth,
        parent_id,
        min_depth,
        max_depth,
    })
}

/// Positions into the original sequence, reordered as if the item at `from`
/// had been moved to `to`
fn move_indices(len: usize, from: usize, to: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let position = order.remove(from);
    order.insert(to, position);
    order
}

/// Follow parent links backward from `previous` to the item at `depth - 1`
fn resolve_parent(
    items: &[FlattenedItem],
    moved: &[usize],
    over_index: usize,
    previous: &FlattenedItem,
    depth: usize,
) -> Option<ItemId> {
    let target_depth = depth - 1;
    let mut current = previous;
    // Parents precede their children, so the search only moves backward
    let mut cursor = over_index - 1;

    loop {
        if current.depth == target_depth {
            return Some(current.id().clone());
        }
        if current.depth < target_depth {
            return None;
        }

        let parent_id = current.parent_id.as_ref()?;
        let found = moved[..cursor]
            .iter()
            .rposition(|&position| items[position].id() == parent_id)?;
        cursor = found;
        current = &items[moved[found]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::flatten;
    use crate::item::TreeItem;
    use crate::visibility::visible_items;
    use pretty_assertions::assert_eq;

    fn id(value: &str) -> ItemId {
        ItemId::from(value)
    }

    // [a[b, c], d]
    fn sample() -> Vec<TreeItem> {
        vec![
            TreeItem::leaf("a").with_children(vec![TreeItem::leaf("b"), TreeItem::leaf("c")]),
            TreeItem::leaf("d"),
        ]
    }

    fn project(active: &str, over: &str, offset: f64) -> Option<Projection> {
        let visible = visible_items(&sample(), Some(&id(active)), None);
        get_projection(&visible, &id(active), &id(over), offset, 50.0)
    }

    #[test]
    fn test_drag_depth_rounding() {
        assert_eq!(drag_depth(0.0, 50.0), 0);
        assert_eq!(drag_depth(24.0, 50.0), 0);
        assert_eq!(drag_depth(25.0, 50.0), 1);
        assert_eq!(drag_depth(60.0, 50.0), 1);
        assert_eq!(drag_depth(-25.0, 50.0), 0);
        assert_eq!(drag_depth(-26.0, 50.0), -1);
        assert_eq!(drag_depth(-120.0, 50.0), -2);
        assert_eq!(drag_depth(100.0, 0.0), 0);
        assert_eq!(drag_depth(f64::NAN, 50.0), 0);
    }

    #[test]
    fn test_drag_c_over_d_nests_under_d() {
        // c lands after d, so d is the new predecessor
        let projection = project("c", "d", 0.0).unwrap();
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.parent_id, Some(id("d")));
        assert_eq!((projection.min_depth, projection.max_depth), (0, 1));
    }

    #[test]
    fn test_drag_c_over_d_outdent() {
        let projection = project("c", "d", -50.0).unwrap();
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.parent_id, None);
    }

    #[test]
    fn test_drag_c_over_d_clamped_to_max() {
        let projection = project("c", "d", 60.0).unwrap();
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.parent_id, Some(id("d")));
    }

    #[test]
    fn test_drag_in_place_outdent() {
        // c over itself, one level left: previous is b, d follows at depth 0
        let projection = project("c", "c", -50.0).unwrap();
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.parent_id, None);
        assert_eq!((projection.min_depth, projection.max_depth), (0, 2));
    }

    #[test]
    fn test_drag_in_place_indent_under_sibling() {
        let projection = project("c", "c", 50.0).unwrap();
        assert_eq!(projection.depth, 2);
        assert_eq!(projection.parent_id, Some(id("b")));
    }

    #[test]
    fn test_drag_up_min_depth_from_next() {
        // d over b: lands between a and b, b keeps it at depth 1
        let projection = project("d", "b", -200.0).unwrap();
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.parent_id, Some(id("a")));
        assert_eq!((projection.min_depth, projection.max_depth), (1, 1));
    }

    #[test]
    fn test_drag_to_top_has_no_parent() {
        let projection = project("d", "a", 500.0).unwrap();
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.parent_id, None);
        assert_eq!((projection.min_depth, projection.max_depth), (0, 0));
    }

    #[test]
    fn test_parent_walk_skips_deeper_items() {
        // [a[b[x]], d]; drag d over itself one level left of a's grandchild
        let tree = vec![
            TreeItem::leaf("a").with_children(vec![
                TreeItem::leaf("b").with_children(vec![TreeItem::leaf("x")]),
            ]),
            TreeItem::leaf("d"),
        ];
        let visible = visible_items(&tree, Some(&id("d")), None);
        let projection = get_projection(&visible, &id("d"), &id("d"), 50.0, 50.0).unwrap();
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.parent_id, Some(id("a")));
    }

    #[test]
    fn test_extreme_offsets_pin_to_bounds() {
        let right = project("c", "c", 1e300).unwrap();
        assert_eq!(right.depth, right.max_depth);
        assert_eq!(right.parent_id, Some(id("b")));

        let left = project("c", "c", -1e300).unwrap();
        assert_eq!(left.depth, left.min_depth);
        assert_eq!(left.parent_id, None);
    }

    #[test]
    fn test_tiny_indentation_width_pins_to_max() {
        let visible = visible_items(&sample(), Some(&id("c")), None);
        let projection = get_projection(&visible, &id("c"), &id("c"), 50.0, 1e-310).unwrap();
        assert_eq!(projection.depth, projection.max_depth);
        assert_eq!(projection.depth, 2);
    }

    #[test]
    fn test_missing_ids() {
        assert_eq!(project("c", "nope", 0.0), None);
        assert_eq!(project("nope", "c", 0.0), None);
    }

    #[test]
    fn test_unresolvable_parent() {
        // The ancestor of b is not part of the sequence
        let flat: Vec<_> = flatten(&sample()).into_iter().skip(1).collect();
        assert_eq!(get_projection(&flat, &id("d"), &id("d"), 50.0, 50.0), None);
    }
}
