use sortable_tree::{ItemId, SortableTree, TreeConfig, TreeItem, TreeRow};

fn id(value: &str) -> ItemId {
    ItemId::from(value)
}

fn outline(rows: &[TreeRow]) -> String {
    rows.iter()
        .map(|row| {
            let marker = match (row.has_children, row.collapsed) {
                (true, true) => "+ ",
                (true, false) => "- ",
                (false, _) => "  ",
            };
            let mut line = format!("{}{}{}", "  ".repeat(row.depth), marker, row.title);
            if row.ghost {
                line.push_str(" [dragging]");
            }
            if row.indicator {
                line.push_str(" [over]");
            }
            if !row.draggable {
                line.push_str(" [locked]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn project() -> SortableTree {
    let items = vec![
        TreeItem::new("src", "src").with_children(vec![
            TreeItem::new("lib", "lib.rs"),
            TreeItem::new("tree", "tree.rs"),
        ]),
        TreeItem::new("tests", "tests").with_children(vec![TreeItem::new("outline", "outline.rs")]),
        TreeItem::new("readme", "README.md").disabled(true),
    ];
    SortableTree::with_config(items, TreeConfig::new().indicator(true)).unwrap()
}

#[test]
fn test_outline_idle() {
    let tree = project();
    insta::assert_snapshot!(outline(&tree.rows()), @r"
    - src
        lib.rs
        tree.rs
    - tests
        outline.rs
      README.md [locked]
    ");
}

#[test]
fn test_outline_while_dragging() {
    let mut tree = project();
    assert!(tree.drag_start(&id("tree")));
    tree.drag_move(Some(id("outline")), 0.0);

    // Rows keep their order; only the dragged row shows its projected depth
    insta::assert_snapshot!(outline(&tree.rows()), @r"
    - src
        lib.rs
        tree.rs [dragging]
    - tests
        outline.rs [over]
      README.md [locked]
    ");

    tree.drag_move(Some(id("outline")), -50.0);
    let rows = tree.rows();
    let dragged = rows.iter().find(|row| row.ghost).unwrap();
    assert_eq!(dragged.depth, 0);
}

#[test]
fn test_outline_after_drops() {
    let mut tree = project();

    tree.drag_start(&id("tree"));
    tree.drag_move(Some(id("outline")), 0.0);
    assert!(tree.drag_end(Some(&id("outline"))).unwrap().is_moved());

    tree.drag_start(&id("readme"));
    tree.drag_move(Some(id("src")), 0.0);
    assert!(!tree.drag_end(Some(&id("src"))).unwrap().is_moved());

    assert!(tree.toggle_collapsed(&id("src")));

    insta::assert_snapshot!(outline(&tree.rows()), @r"
    + src
    - tests
        outline.rs
        tree.rs
      README.md [locked]
    ");
}
