//! The sequence tree: frames (leaves) grouped by sequences (internal nodes).
//!
//! ## Shape
//!
//! ```text
//! SequenceNode (root)            chronology + additivity
//! ├── FrameNode                  one Effect, optional transitions
//! ├── SequenceNode
//! │   ├── FrameNode
//! │   └── FrameNode
//! └── FrameNode
//! ```
//!
//! A node's parent is implied by its position. There are no back-pointers,
//! so reparenting is a structural move and a cycle cannot be expressed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::effect::Effect;
use crate::ids::NodeId;

// ============================================================================
// POLICIES
// ============================================================================

/// How a sequence's children relate in time when presented.
///
/// Presentation only: reconstruction ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ChronologyType {
    /// One after another.
    #[default]
    Consecutive,
    /// Overlaid at the same time.
    Simultaneous,
}

impl ChronologyType {
    pub const ALL: [ChronologyType; 2] =
        [ChronologyType::Consecutive, ChronologyType::Simultaneous];

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChronologyType::Consecutive => "consecutive",
            ChronologyType::Simultaneous => "simultaneous",
        }
    }
}

impl fmt::Display for ChronologyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether frames passed through inside a sequence build on each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum AdditivityType {
    /// Each frame layers onto the accumulated board.
    #[default]
    Cumulative,
    /// Each frame is shown on its own; the board resets after it.
    Temporary,
}

impl AdditivityType {
    pub const ALL: [AdditivityType; 2] = [AdditivityType::Cumulative, AdditivityType::Temporary];

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdditivityType::Cumulative => "cumulative",
            AdditivityType::Temporary => "temporary",
        }
    }
}

impl fmt::Display for AdditivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransitionKind {
    Fade,
    Slide,
    #[default]
    None,
}

/// Entrance/exit animation attached to a frame. Opaque to reconstruction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration_secs: f32,
    /// Overrides the game's tile color for this transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_color: Option<String>,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration_secs: f32) -> Self {
        Self {
            kind,
            duration_secs,
            tile_color: None,
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

/// Deepest sequence nesting a tree may have. The root is at depth 0.
///
/// Keeps saved games well inside serde_json's recursion limit.
pub const MAX_NESTING: usize = 32;

/// Leaf: one discrete board change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameNode {
    pub id: NodeId,
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<Transition>,
}

impl FrameNode {
    /// A frame with a fresh id and no transitions.
    pub fn new(effect: Effect) -> Self {
        Self {
            id: NodeId::new(),
            effect,
            transition_in: None,
            transition_out: None,
        }
    }
}

/// Internal node: an ordered group of children with composition policies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceNode {
    pub id: NodeId,
    pub chronology: ChronologyType,
    pub additivity: AdditivityType,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Any node of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Frame(FrameNode),
    Sequence(SequenceNode),
}

impl From<FrameNode> for Node {
    fn from(frame: FrameNode) -> Self {
        Node::Frame(frame)
    }
}

impl From<SequenceNode> for Node {
    fn from(seq: SequenceNode) -> Self {
        Node::Sequence(seq)
    }
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Frame(f) => f.id,
            Node::Sequence(s) => s.id,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Frame(f) => NodeRef::Frame(f),
            Node::Sequence(s) => NodeRef::Sequence(s),
        }
    }

    pub fn as_frame(&self) -> Option<&FrameNode> {
        match self {
            Node::Frame(f) => Some(f),
            Node::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceNode> {
        match self {
            Node::Sequence(s) => Some(s),
            Node::Frame(_) => None,
        }
    }

    /// Whether `target` is this node or lies beneath it.
    pub fn contains(&self, target: NodeId) -> bool {
        match self {
            Node::Frame(f) => f.id == target,
            Node::Sequence(s) => s.contains(target),
        }
    }
}

/// Borrowed view of a node, which may be the root sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Frame(&'a FrameNode),
    Sequence(&'a SequenceNode),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::Frame(f) => f.id,
            NodeRef::Sequence(s) => s.id,
        }
    }

    pub fn as_frame(&self) -> Option<&'a FrameNode> {
        match *self {
            NodeRef::Frame(f) => Some(f),
            NodeRef::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&'a SequenceNode> {
        match *self {
            NodeRef::Sequence(s) => Some(s),
            NodeRef::Frame(_) => None,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            NodeRef::Frame(_) => "frame",
            NodeRef::Sequence(_) => "sequence",
        }
    }

    /// Whether `target` is this node or lies beneath it.
    pub fn contains(&self, target: NodeId) -> bool {
        match self {
            NodeRef::Frame(f) => f.id == target,
            NodeRef::Sequence(s) => s.contains(target),
        }
    }
}

impl SequenceNode {
    /// An empty sequence with a fresh id.
    pub fn new(chronology: ChronologyType, additivity: AdditivityType) -> Self {
        Self {
            id: NodeId::new(),
            chronology,
            additivity,
            children: Vec::new(),
        }
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Find a node by id, including this sequence itself.
    pub fn find(&self, target: NodeId) -> Option<NodeRef<'_>> {
        if self.id == target {
            return Some(NodeRef::Sequence(self));
        }
        for child in &self.children {
            match child {
                Node::Frame(f) if f.id == target => return Some(NodeRef::Frame(f)),
                Node::Frame(_) => {}
                Node::Sequence(s) => {
                    if let Some(found) = s.find(target) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Find a sequence by id (mutable), including this sequence itself.
    pub fn find_sequence_mut(&mut self, target: NodeId) -> Option<&mut SequenceNode> {
        if self.id == target {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Sequence(s) = child
                && let Some(found) = s.find_sequence_mut(target)
            {
                return Some(found);
            }
        }
        None
    }

    /// Find a frame by id (mutable).
    pub fn find_frame_mut(&mut self, target: NodeId) -> Option<&mut FrameNode> {
        for child in &mut self.children {
            match child {
                Node::Frame(f) if f.id == target => return Some(f),
                Node::Frame(_) => {}
                Node::Sequence(s) => {
                    if let Some(found) = s.find_frame_mut(target) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Find the parent of a node.
    /// Returns (parent_id, index_of_child). `None` for the root or an unknown id.
    pub fn find_parent(&self, target: NodeId) -> Option<(NodeId, usize)> {
        for (i, child) in self.children.iter().enumerate() {
            if child.id() == target {
                return Some((self.id, i));
            }
            if let Node::Sequence(s) = child
                && let Some(found) = s.find_parent(target)
            {
                return Some(found);
            }
        }
        None
    }

    /// Whether `target` is this sequence or lies beneath it.
    pub fn contains(&self, target: NodeId) -> bool {
        self.id == target || self.children.iter().any(|c| c.contains(target))
    }

    /// Recursively collect all ids in this subtree, pre-order.
    pub fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id);
        for child in &self.children {
            match child {
                Node::Frame(f) => out.push(f.id),
                Node::Sequence(s) => s.collect_ids(out),
            }
        }
    }

    /// How many levels of sequences lie below this one. 0 when no child is a
    /// sequence.
    pub fn nesting_depth(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_sequence)
            .map(|s| 1 + s.nesting_depth())
            .max()
            .unwrap_or(0)
    }

    /// Depth of the sequence `target` below this one (`Some(0)` for itself).
    /// `None` if `target` is not a sequence in this subtree.
    pub fn sequence_depth(&self, target: NodeId) -> Option<usize> {
        if self.id == target {
            return Some(0);
        }
        self.children
            .iter()
            .filter_map(Node::as_sequence)
            .find_map(|s| s.sequence_depth(target).map(|d| d + 1))
    }

    /// Number of nodes in this subtree, including this sequence.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| match c {
                Node::Frame(_) => 1,
                Node::Sequence(s) => s.node_count(),
            })
            .sum::<usize>()
    }
}

// ============================================================================
// Tests
// ============================================================================
