//! Drag scripts: a recorded sequence of pointer events replayed on a tree

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sortable_tree::{DropOutcome, DropRejection, ItemId, PermissionGate, SortableTree};

/// One recorded pointer event
///
/// In JSON each event is either a bare string (`"cancel"`) or a single-key
/// object such as `{"start": "c"}` or `{"move": {"over": "d", "offset": 50}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Pick up an item
    Start(ItemId),

    /// Pointer moved over an item, `offset` pixels right of where it started
    Move {
        over: Option<ItemId>,
        #[serde(default)]
        offset: f64,
    },

    /// Release the pointer over an item
    Commit { over: Option<ItemId> },

    /// Abandon the drag
    Cancel,

    /// Collapse or expand an item
    Toggle(ItemId),
}

/// Tally of a replayed script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub moved: usize,
    pub rejected: usize,
    /// Events that had no effect, such as a move or a commit while idle
    pub ignored: usize,
}

/// Replay `events` on `tree`
///
/// Rejected drops and ignored events are counted, not treated as errors; only
/// a drop that leaves the tree malformed stops the replay.
pub fn replay<G: PermissionGate>(tree: &mut SortableTree<G>, events: &[Event]) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();

    for (step, event) in events.iter().enumerate() {
        summary.events += 1;
        debug!("Step {}: {:?}", step, event);

        match event {
            Event::Start(id) => {
                if !tree.drag_start(id) {
                    summary.ignored += 1;
                }
            }
            Event::Move { over, offset } => {
                if !tree.session().is_dragging() {
                    summary.ignored += 1;
                }
                tree.drag_move(over.clone(), *offset);
            }
            Event::Commit { over } => match tree.drag_end(over.as_ref())? {
                DropOutcome::Moved { projection, .. } => {
                    info!(
                        "Step {}: dropped at depth {} under {:?}",
                        step, projection.depth, projection.parent_id
                    );
                    summary.moved += 1;
                }
                DropOutcome::Rejected(DropRejection::NotDragging) => {
                    summary.ignored += 1;
                }
                DropOutcome::Rejected(reason) => {
                    info!("Step {}: drop rejected, {}", step, reason);
                    summary.rejected += 1;
                }
            },
            Event::Cancel => {
                if !tree.drag_cancel() {
                    summary.ignored += 1;
                }
            }
            Event::Toggle(id) => {
                if !tree.toggle_collapsed(id) {
                    summary.ignored += 1;
                }
            }
        }
    }

    Ok(summary)
}
