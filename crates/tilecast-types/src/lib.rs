//! Board, effect, and sequence-tree types for Tilecast.
//!
//! This crate is the data foundation: typed IDs, the board grid, the closed
//! set of effects, and the frame/sequence tree. It has **no internal tilecast
//! dependencies**. Reconstruction and tree editing live in
//! `tilecast-timeline`.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`Grid`]          | Square board of [`Tile`]s                    |
//! | [`Effect`]        | Tagged board transformation                  |
//! | [`EffectKind`]    | Payload-free effect names for pickers        |
//! | [`FrameNode`]     | Leaf: one effect plus transitions            |
//! | [`SequenceNode`]  | Internal: policies plus ordered children     |
//! | [`Node`]          | Either of the above                          |
//! | [`Game`]          | Title, board size, root sequence             |
//! | [`NodeId`]        | Which node (UUIDv7)                          |
//! |-------------------|----------------------------------------------|

pub mod effect;
pub mod game;
pub mod grid;
pub mod ids;
pub mod node;

// Re-export primary types at crate root for convenience.
pub use effect::{
    Effect, EffectKind, HighlightEffect, NoneEffect, PlayEffect, Square, TilePlacement,
};
pub use game::{DEFAULT_TITLE, Game};
pub use grid::{CellDiff, DEFAULT_BOARD_SIZE, Grid, GridError, MAX_BOARD_SIZE, Tile, TileState};
pub use ids::{GameId, NodeId, PrefixError, resolve_node_prefix};
pub use node::{
    AdditivityType, ChronologyType, FrameNode, MAX_NESTING, Node, NodeRef, SequenceNode,
    Transition, TransitionKind,
};
