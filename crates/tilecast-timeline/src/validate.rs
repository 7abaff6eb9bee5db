//! Structural checks for games that did not come from this crate's edits,
//! e.g. a file read from disk.

use std::collections::HashSet;

use tilecast_types::{Game, MAX_BOARD_SIZE, MAX_NESTING, Node, NodeId, SequenceNode};

use crate::{Result, TimelineError};

/// Check what the editing operations otherwise guarantee: a board size in
/// `1..=MAX_BOARD_SIZE`, unique node ids, nesting within [`MAX_NESTING`],
/// and every effect on the board.
pub fn validate_game(game: &Game) -> Result<()> {
    if game.board_size == 0 || game.board_size > MAX_BOARD_SIZE {
        return Err(TimelineError::BoardSize {
            size: game.board_size,
            max: MAX_BOARD_SIZE,
        });
    }
    let depth = game.root_sequence.nesting_depth();
    if depth > MAX_NESTING {
        return Err(TimelineError::TooDeep {
            depth,
            limit: MAX_NESTING,
        });
    }
    let mut seen = HashSet::new();
    check_sequence(&game.root_sequence, game.board_size, &mut seen)
}

fn check_sequence(
    seq: &SequenceNode,
    board_size: usize,
    seen: &mut HashSet<NodeId>,
) -> Result<()> {
    if !seen.insert(seq.id) {
        return Err(TimelineError::DuplicateId(seq.id));
    }
    for child in &seq.children {
        match child {
            Node::Frame(f) => {
                if !seen.insert(f.id) {
                    return Err(TimelineError::DuplicateId(f.id));
                }
                f.effect.validate(board_size)?;
            }
            Node::Sequence(s) => check_sequence(s, board_size, seen)?,
        }
    }
    Ok(())
}
