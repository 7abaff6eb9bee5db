//! Structural edits on a sequence tree.
//!
//! Every edit borrows the current tree and returns a new one. The argument
//! is never modified, so a rejected edit leaves the caller holding exactly
//! what it had, and any other holder of the old tree never observes a
//! change. Checks run against the borrowed tree before anything is copied.
//!
//! Nodes are addressed by [`NodeId`]. The root is addressed by its own id;
//! there is no sentinel standing in for it.

use tilecast_types::{
    AdditivityType, ChronologyType, Effect, FrameNode, MAX_NESTING, Node, NodeId, NodeRef,
    SequenceNode, Transition,
};

use crate::{Result, TimelineError};

/// Fields to merge into a node. `None` leaves a field as it is.
///
/// Frame fields (`effect`, transitions) and sequence fields (policies) may
/// not be mixed with the other node kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
    pub effect: Option<Effect>,
    /// `Some(None)` clears the transition.
    pub transition_in: Option<Option<Transition>>,
    pub transition_out: Option<Option<Transition>>,
    pub chronology: Option<ChronologyType>,
    pub additivity: Option<AdditivityType>,
}

impl NodePatch {
    pub fn effect(effect: Effect) -> Self {
        Self {
            effect: Some(effect),
            ..Self::default()
        }
    }

    pub fn chronology(chronology: ChronologyType) -> Self {
        Self {
            chronology: Some(chronology),
            ..Self::default()
        }
    }

    pub fn additivity(additivity: AdditivityType) -> Self {
        Self {
            additivity: Some(additivity),
            ..Self::default()
        }
    }

    pub fn transitions(
        transition_in: Option<Transition>,
        transition_out: Option<Transition>,
    ) -> Self {
        Self {
            transition_in: Some(transition_in),
            transition_out: Some(transition_out),
            ..Self::default()
        }
    }

    fn touches_frame(&self) -> bool {
        self.effect.is_some() || self.transition_in.is_some() || self.transition_out.is_some()
    }

    fn touches_sequence(&self) -> bool {
        self.chronology.is_some() || self.additivity.is_some()
    }

    fn apply_to_frame(&self, frame: &mut FrameNode) {
        if let Some(effect) = &self.effect {
            frame.effect = effect.clone();
        }
        if let Some(t) = &self.transition_in {
            frame.transition_in = t.clone();
        }
        if let Some(t) = &self.transition_out {
            frame.transition_out = t.clone();
        }
    }

    fn apply_to_sequence(&self, seq: &mut SequenceNode) {
        if let Some(c) = self.chronology {
            seq.chronology = c;
        }
        if let Some(a) = self.additivity {
            seq.additivity = a;
        }
    }
}

/// Find a node by id, including the root. `None` is an expected answer,
/// e.g. for a node that was just deleted.
pub fn find_node(root: &SequenceNode, id: NodeId) -> Option<NodeRef<'_>> {
    root.find(id)
}

/// `(parent_id, index)` of a node. `None` for the root or an unknown id.
pub fn find_parent(root: &SequenceNode, id: NodeId) -> Option<(NodeId, usize)> {
    root.find_parent(id)
}

/// Merge `patch` into the node `id`. No other node changes.
pub fn update_node(root: &SequenceNode, id: NodeId, patch: &NodePatch) -> Result<SequenceNode> {
    let is_sequence = match root.find(id) {
        None => return Err(TimelineError::NodeNotFound(id)),
        Some(NodeRef::Frame(_)) if patch.touches_sequence() => {
            return Err(TimelineError::PatchMismatch { id, kind: "frame" });
        }
        Some(NodeRef::Sequence(_)) if patch.touches_frame() => {
            return Err(TimelineError::PatchMismatch { id, kind: "sequence" });
        }
        Some(node) => node.as_sequence().is_some(),
    };

    let mut next = root.clone();
    if is_sequence {
        let seq = next.find_sequence_mut(id).ok_or(TimelineError::NodeNotFound(id))?;
        patch.apply_to_sequence(seq);
    } else {
        let frame = next.find_frame_mut(id).ok_or(TimelineError::NodeNotFound(id))?;
        patch.apply_to_frame(frame);
    }
    tracing::debug!(node = %id, "updated node");
    Ok(next)
}

/// Insert a new frame under `parent_id`; `index` is clamped to the end.
///
/// Returns the new tree and the new frame's id.
pub fn insert_frame(
    root: &SequenceNode,
    parent_id: NodeId,
    index: usize,
    effect: Effect,
) -> Result<(SequenceNode, NodeId)> {
    let frame = FrameNode::new(effect);
    let id = frame.id;
    let next = insert_child(root, parent_id, index, frame.into())?;
    Ok((next, id))
}

/// Insert a new, empty sequence under `parent_id`; `index` is clamped to the end.
///
/// Returns the new tree and the new sequence's id.
pub fn insert_sequence(
    root: &SequenceNode,
    parent_id: NodeId,
    index: usize,
    chronology: ChronologyType,
    additivity: AdditivityType,
) -> Result<(SequenceNode, NodeId)> {
    check_parent(root, parent_id)?;
    check_nesting(root, parent_id, 1)?;
    let seq = SequenceNode::new(chronology, additivity);
    let id = seq.id;
    let next = insert_child(root, parent_id, index, seq.into())?;
    Ok((next, id))
}

fn insert_child(
    root: &SequenceNode,
    parent_id: NodeId,
    index: usize,
    child: Node,
) -> Result<SequenceNode> {
    check_parent(root, parent_id)?;

    let mut next = root.clone();
    let parent = next
        .find_sequence_mut(parent_id)
        .ok_or(TimelineError::NodeNotFound(parent_id))?;
    let at = index.min(parent.children.len());
    tracing::debug!(parent = %parent_id, child = %child.id(), index = at, "inserted node");
    parent.children.insert(at, child);
    Ok(next)
}

fn check_parent(root: &SequenceNode, parent_id: NodeId) -> Result<()> {
    match root.find(parent_id) {
        None => Err(TimelineError::NodeNotFound(parent_id)),
        Some(NodeRef::Frame(_)) => Err(TimelineError::ParentIsFrame(parent_id)),
        Some(NodeRef::Sequence(_)) => Ok(()),
    }
}

/// Reject placing `levels` more sequence levels under `parent_id`.
fn check_nesting(root: &SequenceNode, parent_id: NodeId, levels: usize) -> Result<()> {
    let parent_depth = root
        .sequence_depth(parent_id)
        .ok_or(TimelineError::NodeNotFound(parent_id))?;
    let depth = parent_depth + levels;
    if depth > MAX_NESTING {
        return Err(TimelineError::TooDeep {
            depth,
            limit: MAX_NESTING,
        });
    }
    Ok(())
}

/// Remove `child_id`, and everything beneath it, from `parent_id`.
///
/// Deleting a non-empty sequence is allowed; any confirmation belongs to
/// the caller.
pub fn delete_node(
    root: &SequenceNode,
    parent_id: NodeId,
    child_id: NodeId,
) -> Result<SequenceNode> {
    let parent = match root.find(parent_id) {
        None => return Err(TimelineError::NodeNotFound(parent_id)),
        Some(NodeRef::Frame(_)) => {
            return Err(TimelineError::ChildNotFound {
                parent: parent_id,
                child: child_id,
            });
        }
        Some(NodeRef::Sequence(s)) => s,
    };
    let index = parent
        .children
        .iter()
        .position(|c| c.id() == child_id)
        .ok_or(TimelineError::ChildNotFound {
            parent: parent_id,
            child: child_id,
        })?;

    let mut next = root.clone();
    let parent = next
        .find_sequence_mut(parent_id)
        .ok_or(TimelineError::NodeNotFound(parent_id))?;
    let removed = parent.children.remove(index);
    let removed_nodes = match &removed {
        Node::Frame(_) => 1,
        Node::Sequence(s) => s.node_count(),
    };
    tracing::debug!(parent = %parent_id, child = %child_id, removed_nodes, "deleted node");
    Ok(next)
}

/// Detach the subtree at `node_id` and reinsert it under `new_parent_id`.
///
/// `new_index` is a position among the new parent's children *after* the
/// node has been detached, clamped to the end. Moving a node into itself or
/// anything beneath it is rejected.
pub fn move_node(
    root: &SequenceNode,
    node_id: NodeId,
    new_parent_id: NodeId,
    new_index: usize,
) -> Result<SequenceNode> {
    if node_id == root.id {
        return Err(TimelineError::CannotMoveRoot);
    }
    let (old_parent_id, old_index) = root
        .find_parent(node_id)
        .ok_or(TimelineError::NodeNotFound(node_id))?;
    check_parent(root, new_parent_id)?;

    let moving = root.find(node_id).ok_or(TimelineError::NodeNotFound(node_id))?;
    if moving.contains(new_parent_id) {
        return Err(TimelineError::MoveIntoOwnSubtree {
            node: node_id,
            target: new_parent_id,
        });
    }
    if let NodeRef::Sequence(s) = moving {
        check_nesting(root, new_parent_id, 1 + s.nesting_depth())?;
    }

    let mut next = root.clone();
    let detached = next
        .find_sequence_mut(old_parent_id)
        .ok_or(TimelineError::NodeNotFound(old_parent_id))?
        .children
        .remove(old_index);

    let new_parent = next
        .find_sequence_mut(new_parent_id)
        .ok_or(TimelineError::NodeNotFound(new_parent_id))?;
    let at = new_index.min(new_parent.children.len());
    new_parent.children.insert(at, detached);

    tracing::debug!(
        node = %node_id,
        from = %old_parent_id,
        to = %new_parent_id,
        index = at,
        "moved node"
    );
    Ok(next)
}

// ============================================================================
// Tests
// ============================================================================
