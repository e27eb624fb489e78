//! Tree Outline
//!
//! Loads a tree from JSON, optionally replays a drag script on it, and prints
//! the result as an indented outline or as JSON.

mod script;

pub use script::{replay, Event, Summary};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use sortable_tree::{SortableTree, TreeConfig, TreeItems, TreeRow};

/// Usage line printed on bad arguments
pub const USAGE: &str = "Usage: tree-outline [--json] <tree.json> [events.json] [config.json]";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Outline,
    Json,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub tree: PathBuf,
    pub events: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: Format,
}

impl Options {
    /// Parse arguments, not including the program name
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut format = Format::Outline;
        let mut paths = Vec::new();

        for arg in args {
            let arg = arg.into();
            match arg.as_str() {
                "--json" => format = Format::Json,
                flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
                _ => paths.push(PathBuf::from(&arg)),
            }
        }

        let mut paths = paths.into_iter();
        let Some(tree) = paths.next() else {
            bail!("Missing tree file\n{}", USAGE);
        };
        let events = paths.next();
        let config = paths.next();
        if paths.next().is_some() {
            bail!("Too many arguments\n{}", USAGE);
        }

        Ok(Self {
            tree,
            events,
            config,
            format,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

/// Load a nested tree
pub fn load_tree(path: &Path) -> Result<TreeItems> {
    read_json(path, "tree")
}

/// Load a drag script
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    read_json(path, "events")
}

/// Load a tree configuration; missing keys take their defaults
pub fn load_config(path: &Path) -> Result<TreeConfig> {
    read_json(path, "config")
}

/// Render rows as an indented outline, one row per line
///
/// `+` marks a collapsed item with children, `-` an expanded one, and `!` a
/// locked item.
pub fn render_outline(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = match (row.has_children, row.collapsed) {
            (true, true) => '+',
            (true, false) => '-',
            (false, _) => ' ',
        };
        out.push_str(&"  ".repeat(row.depth));
        out.push(marker);
        out.push(' ');
        out.push_str(&row.title);
        if !row.draggable {
            out.push_str(" !");
        }
        out.push('\n');
    }
    out
}

/// Load, replay and render according to `options`
pub fn run(options: &Options) -> Result<String> {
    let items = load_tree(&options.tree)?;
    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => TreeConfig::default(),
    };
    let mut tree = SortableTree::with_config(items, config)
        .with_context(|| format!("Invalid tree in {}", options.tree.display()))?;

    if let Some(path) = &options.events {
        let events = load_events(path)?;
        let summary = replay(&mut tree, &events)?;
        info!(
            "Replayed {} events: {} moved, {} rejected, {} ignored",
            summary.events, summary.moved, summary.rejected, summary.ignored
        );
        if tree.drag_cancel() {
            info!("Script ended mid-drag; drag cancelled");
        }
    }

    match options.format {
        Format::Outline => Ok(render_outline(&tree.rows())),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(tree.items())?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const TREE: &str = r#"[
        {"id": "a", "title": "A", "children": [
            {"id": "b", "title": "B"},
            {"id": "c", "title": "C"}
        ]},
        {"id": "d", "title": "D", "disabled": true}
    ]"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_options() {
        let options = Options::parse(["--json", "tree.json", "events.json"]).unwrap();
        assert_eq!(
            options,
            Options {
                tree: PathBuf::from("tree.json"),
                events: Some(PathBuf::from("events.json")),
                config: None,
                format: Format::Json,
            }
        );
    }

    #[test]
    fn test_parse_options_errors() {
        let none: [&str; 0] = [];
        assert!(Options::parse(none).is_err());
        assert!(Options::parse(["--verbose", "tree.json"]).is_err());
        assert!(Options::parse(["a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn test_run_outline() {
        let dir = TempDir::new().unwrap();
        let tree = write(&dir, "tree.json", TREE);
        let events = write(
            &dir,
            "events.json",
            r#"[
                {"start": "c"},
                {"move": {"over": "c", "offset": -50}},
                {"commit": {"over": "c"}},
                {"toggle": "a"}
            ]"#,
        );

        let options = Options {
            tree,
            events: Some(events),
            config: None,
            format: Format::Outline,
        };
        insta::assert_snapshot!(run(&options).unwrap(), @r"
        + A
          C
          D !
        ");
    }

    #[test]
    fn test_run_json_with_config() {
        let dir = TempDir::new().unwrap();
        let tree = write(&dir, "tree.json", TREE);
        let events = write(
            &dir,
            "events.json",
            r#"[{"start": "b"}, {"move": {"over": "b", "offset": -50}}, {"commit": {"over": "b"}}]"#,
        );
        let config = write(&dir, "config.json", r#"{"canChangeParent": false}"#);

        let options = Options {
            tree,
            events: Some(events),
            config: Some(config),
            format: Format::Json,
        };
        let output: TreeItems = serde_json::from_str(&run(&options).unwrap()).unwrap();
        assert_eq!(output, load_tree(&options.tree).unwrap());
    }

    #[test]
    fn test_numeric_ids() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "tree.json",
            r#"[{"id": 1, "title": "One", "children": [{"id": "two", "title": "Two"}]}, {"id": 3, "title": "Three"}]"#,
        );
        let items = load_tree(&path).unwrap();
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[0].children[0].id.as_str(), "two");
        assert_eq!(items[1].id.as_str(), "3");

        let json = serde_json::to_string(&items[1]).unwrap();
        assert_eq!(json, r#"{"id":"3","title":"Three"}"#);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let options = Options::parse([dir.path().join("nope.json").display().to_string()]).unwrap();
        let err = run(&options).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.json"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let tree = write(&dir, "tree.json", r#"[{"id": "a", "title": "A"}, {"id": "a", "title": "A"}]"#);
        let options = Options::parse([tree.display().to_string()]).unwrap();
        let err = run(&options).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate"));
    }
}
