//! Game files: pretty-printed JSON on disk.

use std::path::Path;

use anyhow::{Context, Result};
use tilecast_timeline::validate_game;
use tilecast_types::Game;

/// Read and check a game file. A file that parses but breaks the tree
/// invariants is rejected, since every later command would trip over it.
pub fn load_game(path: &Path) -> Result<Game> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading game {}", path.display()))?;
    let game: Game = serde_json::from_str(&content)
        .with_context(|| format!("parsing game {}", path.display()))?;
    validate_game(&game).with_context(|| format!("invalid game {}", path.display()))?;
    tracing::debug!(path = %path.display(), game = %game.id, "loaded game");
    Ok(game)
}

pub fn save_game(path: &Path, game: &Game) -> Result<()> {
    let mut json = serde_json::to_string_pretty(game).context("serializing game")?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("writing game {}", path.display()))?;
    tracing::debug!(path = %path.display(), game = %game.id, "saved game");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        let game = Game::new("Club night", 11);

        save_game(&path, &game).unwrap();
        assert_eq!(load_game(&path).unwrap(), game);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"root_sequence\""));
        assert!(raw.contains("\"kind\": \"frame\""));
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        let mut game = Game::new("dup", 5);
        let frame = game.root_sequence.children[0].clone();
        game.root_sequence.children.push(frame);
        save_game(&path, &game).unwrap();

        let err = format!("{:#}", load_game(&path).unwrap_err());
        assert!(err.contains("dup.json"), "{err}");
        assert!(err.contains("duplicate node id"), "{err}");
    }

    #[test]
    fn test_load_rejects_board_size_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        for (name, size) in [("zero.json", 0), ("huge.json", 1usize << 40)] {
            let path = dir.path().join(name);
            let game = Game {
                board_size: size,
                ..Game::new("bad", 5)
            };
            save_game(&path, &game).unwrap();
            let err = format!("{:#}", load_game(&path).unwrap_err());
            assert!(err.contains("board size"), "{err}");
        }
    }

    #[test]
    fn test_deeply_nested_file_still_loads() {
        use tilecast_timeline::insert_sequence;
        use tilecast_types::{AdditivityType, ChronologyType, MAX_NESTING};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.json");
        let mut game = Game::new("deep", 5);
        let mut parent = game.root_sequence.id;
        for _ in 0..MAX_NESTING {
            let (next, id) = insert_sequence(
                &game.root_sequence,
                parent,
                0,
                ChronologyType::Consecutive,
                AdditivityType::Cumulative,
            )
            .unwrap();
            game.root_sequence = next;
            parent = id;
        }
        save_game(&path, &game).unwrap();
        assert_eq!(load_game(&path).unwrap(), game);
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_game(&path).unwrap_err();
        assert!(format!("{err}").contains("broken.json"));
    }
}
