//! Error types for tree editing and reconstruction.

use thiserror::Error;

use tilecast_types::{GridError, NodeId};

/// Errors that can occur while editing or replaying a sequence tree.
///
/// A rejected edit never changes the tree it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// No node with this id in the tree.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node exists but is not a direct child of the named parent.
    #[error("{child:?} is not a child of {parent:?}")]
    ChildNotFound { parent: NodeId, child: NodeId },

    /// Frames are leaves.
    #[error("frame {0:?} cannot have children")]
    ParentIsFrame(NodeId),

    /// The destination lies inside the subtree being moved.
    #[error("cannot move {node:?} under {target:?}: target is inside the moved subtree")]
    MoveIntoOwnSubtree { node: NodeId, target: NodeId },

    /// The root sequence has no parent to detach from.
    #[error("the root sequence cannot be moved")]
    CannotMoveRoot,

    /// A patch carries fields the node does not have.
    ///
    /// For example, an effect patch aimed at a sequence.
    #[error("patch does not apply to {kind} {id:?}")]
    PatchMismatch { id: NodeId, kind: &'static str },

    /// The edit would nest sequences deeper than allowed.
    #[error("sequences nested {depth} deep exceed the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },

    /// Two nodes in one tree share an id.
    #[error("duplicate node id: {0:?}")]
    DuplicateId(NodeId),

    /// A game declares a board edge outside `1..=max`.
    #[error("board size {size} is outside 1..={max}")]
    BoardSize { size: usize, max: usize },

    /// Effect application failed (off-board square).
    #[error(transparent)]
    Grid(#[from] GridError),
}
