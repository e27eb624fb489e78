//! Conversion between the nested tree and its flat pre-order sequence

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{Result, StructuralError};
use crate::item::{FlattenedItem, ItemId, TreeItem, TreeItems};

/// Flatten a tree into its pre-order sequence
///
/// Each entry records its parent, depth, sibling index and dotted path.
pub fn flatten(items: &[TreeItem]) -> Vec<FlattenedItem> {
    let mut flattened = Vec::new();

    // (item, parent, depth, index, parent path)
    let mut stack: Vec<(&TreeItem, Option<&ItemId>, usize, usize, Option<Arc<str>>)> = items
        .iter()
        .enumerate()
        .rev()
        .map(|(index, item)| (item, None, 0, index, None))
        .collect();

    while let Some((item, parent_id, depth, index, parent_path)) = stack.pop() {
        let path = match parent_path {
            Some(parent_path) => format!("{}.{}", parent_path, index),
            None => index.to_string(),
        };
        let shared_path: Arc<str> = Arc::from(path.as_str());

        // Push children in reverse order so they're popped in sibling order
        for (child_index, child) in item.children.iter().enumerate().rev() {
            stack.push((
                child,
                Some(&item.id),
                depth + 1,
                child_index,
                Some(shared_path.clone()),
            ));
        }

        flattened.push(FlattenedItem {
            item: item.clone(),
            parent_id: parent_id.cloned(),
            depth,
            index,
            path,
        });
    }

    flattened
}

/// Rebuild a tree from a flat sequence
///
/// Items are attached to the item named by their `parent_id` (top-level
/// items to a synthetic root), in sequence order. A parent may appear after
/// its children. The `children` carried by the flattened items are ignored;
/// every other field is kept.
pub fn build(items: Vec<FlattenedItem>) -> Result<TreeItems> {
    let mut positions: HashMap<ItemId, usize> = HashMap::with_capacity(items.len());
    for (position, flat) in items.iter().enumerate() {
        if positions.insert(flat.id().clone(), position).is_some() {
            return Err(StructuralError::DuplicateId {
                id: flat.id().clone(),
            });
        }
    }

    // Child positions per item, plus the children of the synthetic root
    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    for (position, flat) in items.iter().enumerate() {
        match &flat.parent_id {
            None => roots.push(position),
            Some(parent_id) => {
                let parent = *positions.get(parent_id).ok_or_else(|| {
                    StructuralError::MissingParent {
                        id: flat.id().clone(),
                        parent_id: parent_id.clone(),
                    }
                })?;
                children[parent].push(position);
            }
        }
    }

    // Every item has exactly one parent, so anything not reachable from the
    // root sits on (or under) a parent cycle.
    let mut reachable = vec![false; items.len()];
    let mut order = Vec::with_capacity(items.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(position) = stack.pop() {
        reachable[position] = true;
        order.push(position);
        stack.extend(children[position].iter().rev().copied());
    }
    if let Some(position) = reachable.iter().position(|&seen| !seen) {
        return Err(StructuralError::Cycle {
            id: items[position].id().clone(),
        });
    }

    // Assemble bottom-up: reverse pre-order visits children before parents
    let mut slots: Vec<Option<TreeItem>> = items.into_iter().map(|flat| Some(flat.item)).collect();
    let mut built: Vec<Option<TreeItem>> = vec![None; slots.len()];
    for &position in order.iter().rev() {
        if let Some(mut item) = slots[position].take() {
            let assembled: Vec<TreeItem> = children[position]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            item.children = Arc::from(assembled);
            built[position] = Some(item);
        }
    }

    Ok(roots
        .into_iter()
        .filter_map(|position| built[position].take())
        .collect())
}

/// Check that every id in the tree is unique
pub fn validate(items: &[TreeItem]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut stack: Vec<&TreeItem> = items.iter().collect();
    while let Some(item) = stack.pop() {
        if !seen.insert(&item.id) {
            return Err(StructuralError::DuplicateId {
                id: item.id.clone(),
            });
        }
        stack.extend(item.children.iter());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeItems {
        vec![
            TreeItem::leaf("a").with_children(vec![
                TreeItem::leaf("b"),
                TreeItem::leaf("c").with_children(vec![TreeItem::leaf("e")]),
            ]),
            TreeItem::leaf("d"),
        ]
    }

    fn summary(flat: &[FlattenedItem]) -> Vec<(String, Option<String>, usize, usize, String)> {
        flat.iter()
            .map(|f| {
                (
                    f.id().to_string(),
                    f.parent_id.as_ref().map(ItemId::to_string),
                    f.depth,
                    f.index,
                    f.path.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_flatten_preorder() {
        let flat = flatten(&sample());
        assert_eq!(
            summary(&flat),
            vec![
                ("a".into(), None, 0, 0, "0".into()),
                ("b".into(), Some("a".into()), 1, 0, "0.0".into()),
                ("c".into(), Some("a".into()), 1, 1, "0.1".into()),
                ("e".into(), Some("c".into()), 2, 0, "0.1.0".into()),
                ("d".into(), None, 0, 1, "1".into()),
            ]
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_round_trip() {
        let tree = sample();
        assert_eq!(build(flatten(&tree)).unwrap(), tree);
    }

    #[test]
    fn test_round_trip_keeps_fields() {
        let tree = vec![TreeItem::new("a", "Alpha")
            .collapsed(true)
            .disabled(true)
            .with_metadata("owner", "me")
            .with_children(vec![TreeItem::new("b", "Beta")])];
        assert_eq!(build(flatten(&tree)).unwrap(), tree);
    }

    #[test]
    fn test_build_parent_after_child() {
        // a moved below its own children, which still point at it
        let mut flat = flatten(&sample());
        let a = flat.remove(0);
        flat.push(a);

        let tree = build(flat).unwrap();
        let ids: Vec<_> = tree.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a"]);
        let children: Vec<_> = tree[1].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(children, vec!["b", "c"]);
    }

    #[test]
    fn test_build_duplicate_id() {
        let mut flat = flatten(&sample());
        let copy = flat[1].clone();
        flat.push(copy);
        assert_eq!(
            build(flat),
            Err(StructuralError::DuplicateId { id: "b".into() })
        );
    }

    #[test]
    fn test_build_missing_parent() {
        let mut flat = flatten(&sample());
        flat[4].parent_id = Some("zzz".into());
        assert_eq!(
            build(flat),
            Err(StructuralError::MissingParent {
                id: "d".into(),
                parent_id: "zzz".into(),
            })
        );
    }

    #[test]
    fn test_build_cycle() {
        let mut flat = flatten(&sample());
        // a under e, which is under c, which is under a
        flat[0].parent_id = Some("e".into());
        assert!(matches!(build(flat), Err(StructuralError::Cycle { .. })));
    }

    #[test]
    fn test_build_self_parent() {
        let mut flat = flatten(&sample());
        flat[4].parent_id = Some("d".into());
        assert_eq!(build(flat), Err(StructuralError::Cycle { id: "d".into() }));
    }

    #[test]
    fn test_validate() {
        assert!(validate(&sample()).is_ok());
        let dup = vec![
            TreeItem::leaf("a").with_children(vec![TreeItem::leaf("x")]),
            TreeItem::leaf("x"),
        ];
        assert_eq!(
            validate(&dup),
            Err(StructuralError::DuplicateId { id: "x".into() })
        );
    }
}
