//! Board reconstruction: replay a sequence tree up to a frame.
//!
//! Frames are numbered by a depth-first, pre-order walk over leaves only,
//! starting at 0. Sequences consume no index.
//!
//! Replaying frame `n` walks every earlier frame, advancing a running board
//! according to the additivity of the sequence that *directly* holds each
//! frame:
//!
//! - `cumulative`: the frame's effect is layered onto the board.
//! - `temporary`: the board resets to empty, so a temporary frame is only
//!   ever visible as the target itself.
//!
//! The target frame's effect is always applied, whatever its parent's
//! policy. An index past the last frame yields the end-of-timeline board.
//! Chronology plays no part here; it only shapes presentation.

use tilecast_types::{AdditivityType, FrameNode, Grid, GridError, Node, NodeId, SequenceNode};

/// Outcome of walking one sequence.
///
/// Each recursive call hands the running board and frame counter back to
/// its caller instead of sharing mutable state across the walk.
#[derive(Debug)]
enum Walk {
    /// The target frame was reached inside this subtree.
    Found(Grid),
    /// The subtree was exhausted without reaching the target.
    Continue { grid: Grid, counter: usize },
}

fn walk_sequence(
    seq: &SequenceNode,
    mut grid: Grid,
    mut counter: usize,
    target: usize,
    board_size: usize,
) -> Result<Walk, GridError> {
    for child in &seq.children {
        match child {
            Node::Frame(frame) => {
                if counter == target {
                    return Ok(Walk::Found(frame.effect.apply(&grid)?));
                }
                grid = match seq.additivity {
                    AdditivityType::Cumulative => frame.effect.apply(&grid)?,
                    AdditivityType::Temporary => Grid::empty(board_size),
                };
                counter += 1;
            }
            Node::Sequence(inner) => {
                match walk_sequence(inner, grid, counter, target, board_size)? {
                    found @ Walk::Found(_) => return Ok(found),
                    Walk::Continue { grid: g, counter: c } => {
                        grid = g;
                        counter = c;
                    }
                }
            }
        }
    }
    Ok(Walk::Continue { grid, counter })
}

/// The board as it stands at frame `target`.
///
/// Out-of-range targets return the end-of-timeline board. Fails only when
/// an applied effect touches a square off a `board_size` board.
pub fn compute_board_at_frame(
    root: &SequenceNode,
    target: usize,
    board_size: usize,
) -> Result<Grid, GridError> {
    match walk_sequence(root, Grid::empty(board_size), 0, target, board_size)? {
        Walk::Found(grid) => {
            tracing::debug!(target_frame = target, "reconstructed board");
            Ok(grid)
        }
        Walk::Continue { grid, counter } => {
            tracing::debug!(
                target_frame = target,
                frames = counter,
                "target past end of timeline, returning final board"
            );
            Ok(grid)
        }
    }
}

/// All frames in timeline order.
pub fn flatten_frames(root: &SequenceNode) -> Vec<&FrameNode> {
    let mut out = Vec::new();
    collect_frames(root, &mut out);
    out
}

fn collect_frames<'a>(seq: &'a SequenceNode, out: &mut Vec<&'a FrameNode>) {
    for child in &seq.children {
        match child {
            Node::Frame(f) => out.push(f),
            Node::Sequence(s) => collect_frames(s, out),
        }
    }
}

/// Timeline position of a frame, `None` if no frame has this id.
///
/// A sequence id is never found: sequences have no position.
pub fn find_frame_index(frame_id: NodeId, root: &SequenceNode) -> Option<usize> {
    flatten_frames(root).iter().position(|f| f.id == frame_id)
}

/// Number of frames in the tree.
pub fn frame_count(root: &SequenceNode) -> usize {
    root.children
        .iter()
        .map(|c| match c {
            Node::Frame(_) => 1,
            Node::Sequence(s) => frame_count(s),
        })
        .sum()
}

/// The board at every frame index, in one pass.
///
/// `board_timeline(root, n)[i] == compute_board_at_frame(root, i, n)` for
/// every valid `i`. Unlike single-frame reconstruction, every frame's effect
/// is applied, so any off-board effect fails the whole timeline.
pub fn board_timeline(root: &SequenceNode, board_size: usize) -> Result<Vec<Grid>, GridError> {
    let mut boards = Vec::new();
    collect_boards(root, Grid::empty(board_size), board_size, &mut boards)?;
    Ok(boards)
}

fn collect_boards(
    seq: &SequenceNode,
    mut grid: Grid,
    board_size: usize,
    out: &mut Vec<Grid>,
) -> Result<Grid, GridError> {
    for child in &seq.children {
        match child {
            Node::Frame(frame) => {
                let shown = frame.effect.apply(&grid)?;
                grid = match seq.additivity {
                    AdditivityType::Cumulative => shown.clone(),
                    AdditivityType::Temporary => Grid::empty(board_size),
                };
                out.push(shown);
            }
            Node::Sequence(inner) => {
                grid = collect_boards(inner, grid, board_size, out)?;
            }
        }
    }
    Ok(grid)
}

// ============================================================================
// Tests
// ============================================================================
