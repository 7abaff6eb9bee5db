//! Tilecast command-line authoring tool.
//!
//! Usage:
//!   tilecast new game.json --title "Club night"
//!   tilecast add-frame game.json --parent root --effect play
//!   tilecast play game.json --node 0193a2f4 --tile 7,7,C --tile 8,7,A
//!   tilecast tree game.json
//!   tilecast board game.json --frame 1
//!
//! Node arguments take `root`, a full UUID, or a unique hex prefix as shown
//! by `tilecast tree`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use tilecast_cli::Config;
use tilecast_cli::input::{
    parse_additivity, parse_chronology, parse_effect_kind, parse_square, parse_tile, resolve_node,
};
use tilecast_cli::store::{load_game, save_game};
use tilecast_cli::tree::{format_frames, format_tree};
use tilecast_timeline::{NodePatch, Timeline};
use tilecast_types::{
    AdditivityType, ChronologyType, Effect, EffectKind, Game, MAX_BOARD_SIZE, NodeId, Square,
    TilePlacement,
};

/// Author board-game replay timelines.
#[derive(Parser, Debug)]
#[command(name = "tilecast")]
#[command(about = "Author and replay board-game timelines")]
struct Args {
    /// Config file (default: ~/.config/tilecast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new game file with one empty frame
    New {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        board_size: Option<usize>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List frames in timeline order
    Frames { file: PathBuf },
    /// Show the sequence tree
    Tree { file: PathBuf },
    /// Render the board at a frame (default: end of timeline)
    Board {
        file: PathBuf,
        #[arg(long)]
        frame: Option<usize>,
    },
    /// Insert a frame under a sequence
    AddFrame {
        file: PathBuf,
        #[arg(long)]
        parent: String,
        /// Position among the parent's children (default: end)
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value = "none", value_parser = parse_effect_kind)]
        effect: EffectKind,
    },
    /// Insert an empty sequence under a sequence
    AddSequence {
        file: PathBuf,
        #[arg(long)]
        parent: String,
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value = "consecutive", value_parser = parse_chronology)]
        chronology: ChronologyType,
        #[arg(long, default_value = "cumulative", value_parser = parse_additivity)]
        additivity: AdditivityType,
    },
    /// Set a frame's effect to a play of the given tiles
    Play {
        file: PathBuf,
        #[arg(long)]
        node: String,
        /// Tile as X,Y,LETTER; repeatable
        #[arg(long = "tile", value_parser = parse_tile)]
        tiles: Vec<TilePlacement>,
        /// Show as a potential play instead of committing the tiles
        #[arg(long)]
        preview: bool,
    },
    /// Set a frame's effect to highlight squares
    Highlight {
        file: PathBuf,
        #[arg(long)]
        node: String,
        /// Square as X,Y; repeatable
        #[arg(long = "square", value_parser = parse_square)]
        squares: Vec<Square>,
    },
    /// Change a sequence's chronology or additivity
    Policy {
        file: PathBuf,
        #[arg(long)]
        node: String,
        #[arg(long, value_parser = parse_chronology)]
        chronology: Option<ChronologyType>,
        #[arg(long, value_parser = parse_additivity)]
        additivity: Option<AdditivityType>,
    },
    /// Delete a node and everything beneath it
    Delete {
        file: PathBuf,
        #[arg(long)]
        parent: String,
        #[arg(long)]
        node: String,
    },
    /// Move a node under a new parent
    Move {
        file: PathBuf,
        #[arg(long)]
        node: String,
        #[arg(long)]
        parent: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// List effect kinds
    Effects,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    // Logs go to stderr; stdout carries command output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    run(args.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::New {
            file,
            title,
            board_size,
            force,
        } => {
            if file.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", file.display());
            }
            let board_size = board_size.unwrap_or(config.board_size);
            if !(1..=MAX_BOARD_SIZE).contains(&board_size) {
                anyhow::bail!("board size must be between 1 and {MAX_BOARD_SIZE}");
            }
            let game = Game::new(title.unwrap_or_else(|| config.title.clone()), board_size);
            save_game(&file, &game)?;
            tracing::info!(game = %game.id, "created game");
            println!("{}", file.display());
        }
        Command::Frames { file } => {
            let game = load_game(&file)?;
            for line in format_frames(&game.root_sequence) {
                println!("{line}");
            }
        }
        Command::Tree { file } => {
            let game = load_game(&file)?;
            println!("{} ({}x{})", game.title, game.board_size, game.board_size);
            for line in format_tree(&game.root_sequence) {
                println!("{line}");
            }
        }
        Command::Board { file, frame } => {
            let mut timeline = Timeline::new(load_game(&file)?);
            let index = frame.unwrap_or(timeline.frame_count());
            let board = timeline.board_at(index)?;
            print!("{board}");
        }
        Command::AddFrame {
            file,
            parent,
            index,
            effect,
        } => {
            edit(&file, |tl| {
                let parent = node_arg(tl, &parent)?;
                let index = index.unwrap_or(usize::MAX);
                let id = tl.insert_frame(parent, index, Effect::default_for(effect))?;
                Ok(Some(id))
            })?;
        }
        Command::AddSequence {
            file,
            parent,
            index,
            chronology,
            additivity,
        } => {
            edit(&file, |tl| {
                let parent = node_arg(tl, &parent)?;
                let index = index.unwrap_or(usize::MAX);
                let id = tl.insert_sequence(parent, index, chronology, additivity)?;
                Ok(Some(id))
            })?;
        }
        Command::Play {
            file,
            node,
            tiles,
            preview,
        } => {
            let effect = if preview {
                Effect::show_potential_play(tiles)
            } else {
                Effect::play(tiles)
            };
            set_effect(&file, &node, effect)?;
        }
        Command::Highlight { file, node, squares } => {
            set_effect(&file, &node, Effect::highlight(squares))?;
        }
        Command::Policy {
            file,
            node,
            chronology,
            additivity,
        } => {
            if chronology.is_none() && additivity.is_none() {
                anyhow::bail!("nothing to change: pass --chronology and/or --additivity");
            }
            edit(&file, |tl| {
                let id = node_arg(tl, &node)?;
                let patch = NodePatch {
                    chronology,
                    additivity,
                    ..NodePatch::default()
                };
                tl.update_node(id, patch)?;
                Ok(None)
            })?;
        }
        Command::Delete { file, parent, node } => {
            edit(&file, |tl| {
                let parent = node_arg(tl, &parent)?;
                let node = node_arg(tl, &node)?;
                tl.delete_node(parent, node)?;
                Ok(None)
            })?;
        }
        Command::Move {
            file,
            node,
            parent,
            index,
        } => {
            edit(&file, |tl| {
                let node = node_arg(tl, &node)?;
                let parent = node_arg(tl, &parent)?;
                tl.move_node(node, parent, index.unwrap_or(usize::MAX))?;
                Ok(None)
            })?;
        }
        Command::Effects => {
            for kind in EffectKind::ALL {
                println!("{:<20} {}", kind.as_str(), kind.label());
            }
        }
    }
    Ok(())
}

fn node_arg(timeline: &Timeline, query: &str) -> Result<NodeId> {
    resolve_node(timeline.root(), query).with_context(|| format!("resolving node '{query}'"))
}

fn set_effect(file: &Path, node: &str, effect: Effect) -> Result<()> {
    edit(file, |tl| {
        let id = node_arg(tl, node)?;
        tl.update_node(id, NodePatch::effect(effect))?;
        Ok(None)
    })
}

/// Load, apply one edit, save. The file is only rewritten if the edit
/// succeeds. A returned id is printed for scripting.
fn edit(file: &Path, op: impl FnOnce(&mut Timeline) -> Result<Option<NodeId>>) -> Result<()> {
    let mut timeline = Timeline::new(load_game(file)?);
    let created = op(&mut timeline)?;
    save_game(file, timeline.game())?;
    if let Some(id) = created {
        println!("{id}");
    }
    Ok(())
}
