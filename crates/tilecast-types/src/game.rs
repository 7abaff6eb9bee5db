//! Game: the top-level container for one authored timeline.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::grid::DEFAULT_BOARD_SIZE;
use crate::ids::GameId;
use crate::node::{AdditivityType, ChronologyType, FrameNode, SequenceNode};

/// Title given to freshly created games.
pub const DEFAULT_TITLE: &str = "Untitled Game";

/// A titled timeline over a fixed-size board.
///
/// `board_size` fixes the grid dimensions of every reconstruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub root_sequence: SequenceNode,
    pub board_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_color: Option<String>,
}

impl Game {
    /// A new game: a consecutive, cumulative root holding one empty frame.
    pub fn new(title: impl Into<String>, board_size: usize) -> Self {
        let root = SequenceNode::new(ChronologyType::Consecutive, AdditivityType::Cumulative)
            .with_child(FrameNode::new(Effect::none()));
        Self {
            id: GameId::new(),
            title: title.into(),
            root_sequence: root,
            board_size,
            tile_color: None,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;

    #[test]
    fn test_default_game() {
        let game = Game::default();
        assert_eq!(game.title, "Untitled Game");
        assert_eq!(game.board_size, 15);
        assert_eq!(game.root_sequence.chronology, ChronologyType::Consecutive);
        assert_eq!(game.root_sequence.additivity, AdditivityType::Cumulative);
        assert_eq!(game.root_sequence.children.len(), 1);
        let first = game.root_sequence.children[0].as_frame().unwrap();
        assert_eq!(first.effect.kind(), EffectKind::None);
    }

    #[test]
    fn test_game_serde_roundtrip() {
        let mut game = Game::new("Final round", 11);
        game.tile_color = Some("orange".into());
        let json = serde_json::to_string_pretty(&game).unwrap();
        let parsed: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game);
    }
}
