use anyhow::Result;
use sortable_tree::{DropOutcome, ItemId, SortableTree, TreeConfig, TreeItem};

fn print_rows(tree: &SortableTree) {
    for row in tree.rows() {
        let marker = if row.ghost { "*" } else { " " };
        println!(
            "{}{:indent$}{} ({} children)",
            marker,
            "",
            row.title,
            row.child_count,
            indent = row.depth * 2
        );
    }
}

fn main() -> Result<()> {
    // RUST_LOG=debug shows the session's decisions
    env_logger::init();

    let items = vec![
        TreeItem::new("home", "Home"),
        TreeItem::new("collections", "Collections").with_children(vec![
            TreeItem::new("spring", "Spring"),
            TreeItem::new("summer", "Summer"),
            TreeItem::new("fall", "Fall"),
            TreeItem::new("winter", "Winter"),
        ]),
        TreeItem::new("about", "About Us"),
        TreeItem::new("my-account", "My Account").with_children(vec![
            TreeItem::new("addresses", "Addresses"),
            TreeItem::new("order-history", "Order History"),
        ]),
    ];
    let mut tree = SortableTree::with_config(items, TreeConfig::new().max_depth(2))?;

    println!("Initial tree:");
    print_rows(&tree);

    // Pick up "Winter" and drag it below "About Us", one level in
    let winter = ItemId::from("winter");
    let about = ItemId::from("about");
    tree.drag_start(&winter);
    for offset in [-50.0, 0.0, 50.0] {
        if let Some(projection) = tree.drag_move(Some(about.clone()), offset) {
            println!(
                "\nOffset {:>5}: depth {} under {:?}",
                offset, projection.depth, projection.parent_id
            );
        }
    }

    println!("\nWhile dragging:");
    print_rows(&tree);

    match tree.drag_end(Some(&about))? {
        DropOutcome::Moved { projection, .. } => {
            println!("\nDropped at depth {}", projection.depth);
        }
        DropOutcome::Rejected(reason) => {
            println!("\nDrop rejected: {}", reason);
        }
    }

    println!("\nFinal tree:");
    print_rows(&tree);

    Ok(())
}
