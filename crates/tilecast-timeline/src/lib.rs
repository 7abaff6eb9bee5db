//! Reconstruction and editing for Tilecast sequence trees.
//!
//! A game's story is a tree of sequences and frames. This crate answers two
//! questions about it:
//!
//! - What does the board look like at frame `n`? ([`compute_board_at_frame`])
//! - What tree results from an edit? ([`mutation`])
//!
//! # Reconstruction
//!
//! Frames are numbered by a depth-first walk over leaves. Replaying frame
//! `n` runs every earlier frame through its parent sequence's additivity:
//! cumulative frames layer, temporary frames reset the board once passed.
//! The target frame is always drawn.
//!
//! # Editing
//!
//! Edits are persistent: each one borrows the current tree and returns a
//! new one, and a failed edit returns an error without touching anything.
//! [`Timeline`] owns a game, swaps in edited trees and memoizes boards per
//! tree generation.

mod engine;
mod error;
pub mod mutation;
mod timeline;
mod validate;

pub use engine::{
    board_timeline, compute_board_at_frame, find_frame_index, flatten_frames, frame_count,
};
pub use error::TimelineError;
pub use mutation::{
    NodePatch, delete_node, find_node, find_parent, insert_frame, insert_sequence, move_node,
    update_node,
};
pub use timeline::Timeline;
pub use validate::validate_game;

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;
