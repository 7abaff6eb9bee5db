//! `Timeline`: the single owner of a game's current tree.
//!
//! Editing operations replace the tree wholesale and bump a generation
//! counter. Reconstructed boards are memoized per `(generation, frame)`, so
//! a board computed before an edit can never be served after it.

use std::collections::HashMap;

use tilecast_types::{
    AdditivityType, ChronologyType, Effect, FrameNode, Game, Grid, NodeId, NodeRef, SequenceNode,
};

use crate::engine;
use crate::mutation::{self, NodePatch};
use crate::validate::validate_game;
use crate::{Result, TimelineError};

#[derive(Debug)]
pub struct Timeline {
    game: Game,
    /// Bumped on every successful edit.
    generation: u64,
    boards: HashMap<(u64, usize), Grid>,
}

impl Timeline {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            generation: 0,
            boards: HashMap::new(),
        }
    }

    /// Like [`Timeline::new`], but first checks a game from an untrusted
    /// source with [`validate_game`].
    pub fn open(game: Game) -> Result<Self> {
        validate_game(&game)?;
        Ok(Self::new(game))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> &SequenceNode {
        &self.game.root_sequence
    }

    pub fn board_size(&self) -> usize {
        self.game.board_size
    }

    pub fn find(&self, id: NodeId) -> Option<NodeRef<'_>> {
        mutation::find_node(self.root(), id)
    }

    pub fn frames(&self) -> Vec<&FrameNode> {
        engine::flatten_frames(self.root())
    }

    pub fn frame_count(&self) -> usize {
        engine::frame_count(self.root())
    }

    pub fn frame_index(&self, frame_id: NodeId) -> Option<usize> {
        engine::find_frame_index(frame_id, self.root())
    }

    /// Board as seen at `frame`. Repeated calls between edits are served
    /// from the memo. Every index past the end shares one entry.
    pub fn board_at(&mut self, frame: usize) -> Result<Grid> {
        let frame = frame.min(self.frame_count());
        let key = (self.generation, frame);
        if let Some(grid) = self.boards.get(&key) {
            return Ok(grid.clone());
        }
        let grid = engine::compute_board_at_frame(self.root(), frame, self.board_size())?;
        self.boards.insert(key, grid.clone());
        Ok(grid)
    }

    /// Board after every frame has played.
    pub fn final_board(&mut self) -> Result<Grid> {
        let last = self.frame_count();
        self.board_at(last)
    }

    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> Result<()> {
        if let Some(effect) = &patch.effect {
            self.check_effect(effect)?;
        }
        let next = mutation::update_node(self.root(), id, &patch);
        self.commit("update", next)
    }

    pub fn insert_frame(
        &mut self,
        parent_id: NodeId,
        index: usize,
        effect: Effect,
    ) -> Result<NodeId> {
        self.check_effect(&effect)?;
        let staged = mutation::insert_frame(self.root(), parent_id, index, effect);
        let (next, id) = self.staged("insert_frame", staged)?;
        self.commit("insert_frame", Ok(next))?;
        Ok(id)
    }

    pub fn insert_sequence(
        &mut self,
        parent_id: NodeId,
        index: usize,
        chronology: ChronologyType,
        additivity: AdditivityType,
    ) -> Result<NodeId> {
        let staged =
            mutation::insert_sequence(self.root(), parent_id, index, chronology, additivity);
        let (next, id) = self.staged("insert_sequence", staged)?;
        self.commit("insert_sequence", Ok(next))?;
        Ok(id)
    }

    pub fn delete_node(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let next = mutation::delete_node(self.root(), parent_id, child_id);
        self.commit("delete", next)
    }

    pub fn move_node(
        &mut self,
        node_id: NodeId,
        new_parent_id: NodeId,
        new_index: usize,
    ) -> Result<()> {
        let next = mutation::move_node(self.root(), node_id, new_parent_id, new_index);
        self.commit("move", next)
    }

    fn check_effect(&self, effect: &Effect) -> Result<()> {
        effect.validate(self.board_size()).map_err(|e| {
            tracing::warn!(error = %e, "rejected effect");
            TimelineError::from(e)
        })
    }

    fn staged<T>(&self, op: &'static str, result: Result<T>) -> Result<T> {
        result.inspect_err(|e| tracing::warn!(op, error = %e, "edit rejected"))
    }

    /// Swap in a new tree, or leave everything untouched on error.
    fn commit(&mut self, op: &'static str, next: Result<SequenceNode>) -> Result<()> {
        let next = self.staged(op, next)?;
        self.game.root_sequence = next;
        self.generation += 1;
        self.boards.clear();
        tracing::debug!(op, generation = self.generation, "committed edit");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
