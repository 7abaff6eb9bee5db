//! Effects: the closed set of operations a frame applies to the board.
//!
//! ## Wire shape
//!
//! Effects serialize adjacently tagged, with kebab-case type names:
//!
//! ```text
//! { "type": "play",      "payload": { "tiles": [ { "x": 7, "y": 7, "letter": "C" } ] } }
//! { "type": "highlight", "payload": { "squares": [ { "x": 7, "y": 7 } ] } }
//! { "type": "none",      "payload": {} }
//! ```
//!
//! [`EffectKind`] names the variants without their payloads so editors can
//! offer a picker without matching on [`Effect`] internals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::grid::{Grid, GridError, TileState};

/// A letter written at a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub x: usize,
    pub y: usize,
    pub letter: char,
}

impl TilePlacement {
    pub fn new(x: usize, y: usize, letter: char) -> Self {
        Self { x, y, letter }
    }
}

/// A board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Letters placed on the board. Used by both `play` and `show-potential-play`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEffect {
    pub tiles: Vec<TilePlacement>,
}

impl PlayEffect {
    pub fn new(tiles: Vec<TilePlacement>) -> Self {
        Self { tiles }
    }

    /// Placements a user typed onto `live` to produce `edited`.
    ///
    /// Only squares that gained (or changed) a letter count; erased letters
    /// are not placements.
    pub fn from_diff(live: &Grid, edited: &Grid) -> Result<Self, GridError> {
        let tiles = live
            .diff(edited)?
            .into_iter()
            .filter_map(|d| d.letter.map(|letter| TilePlacement::new(d.x, d.y, letter)))
            .collect();
        Ok(Self { tiles })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEffect {
    pub squares: Vec<Square>,
}

impl HighlightEffect {
    pub fn new(squares: Vec<Square>) -> Self {
        Self { squares }
    }
}

/// Payload of the identity effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoneEffect {}

/// A board transformation carried by a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Effect {
    /// Write letters and lock them.
    Play(PlayEffect),
    /// Mark squares as current, keeping their letters.
    Highlight(HighlightEffect),
    /// Write letters as unlocked preview tiles.
    ShowPotentialPlay(PlayEffect),
    /// Leave the board as it is.
    None(NoneEffect),
}

impl Default for Effect {
    fn default() -> Self {
        Effect::None(NoneEffect::default())
    }
}

impl Effect {
    pub fn play(tiles: Vec<TilePlacement>) -> Self {
        Effect::Play(PlayEffect::new(tiles))
    }

    pub fn highlight(squares: Vec<Square>) -> Self {
        Effect::Highlight(HighlightEffect::new(squares))
    }

    pub fn show_potential_play(tiles: Vec<TilePlacement>) -> Self {
        Effect::ShowPotentialPlay(PlayEffect::new(tiles))
    }

    pub fn none() -> Self {
        Effect::None(NoneEffect::default())
    }

    /// The empty effect of a given kind, as offered by an "add frame" picker.
    pub fn default_for(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Play => Effect::Play(PlayEffect::default()),
            EffectKind::Highlight => Effect::Highlight(HighlightEffect::default()),
            EffectKind::ShowPotentialPlay => Effect::ShowPotentialPlay(PlayEffect::default()),
            EffectKind::None => Effect::none(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Play(_) => EffectKind::Play,
            Effect::Highlight(_) => EffectKind::Highlight,
            Effect::ShowPotentialPlay(_) => EffectKind::ShowPotentialPlay,
            Effect::None(_) => EffectKind::None,
        }
    }

    /// Every square this effect touches, in payload order.
    pub fn squares(&self) -> Vec<Square> {
        match self {
            Effect::Play(p) | Effect::ShowPotentialPlay(p) => {
                p.tiles.iter().map(|t| Square::new(t.x, t.y)).collect()
            }
            Effect::Highlight(h) => h.squares.clone(),
            Effect::None(_) => Vec::new(),
        }
    }

    /// Check every touched square against a board of edge `size`.
    pub fn validate(&self, size: usize) -> Result<(), GridError> {
        match self.squares().into_iter().find(|s| s.x >= size || s.y >= size) {
            Some(s) => Err(GridError::OutOfBounds { x: s.x, y: s.y, size }),
            None => Ok(()),
        }
    }

    /// Apply to `grid`, returning a new board. `grid` is never modified.
    ///
    /// Fails before writing anything if any square is off the board.
    pub fn apply(&self, grid: &Grid) -> Result<Grid, GridError> {
        self.validate(grid.size())?;
        let mut next = grid.clone();
        match self {
            Effect::Play(p) => write_tiles(&mut next, &p.tiles, TileState::Locked)?,
            Effect::ShowPotentialPlay(p) => write_tiles(&mut next, &p.tiles, TileState::Unlocked)?,
            Effect::Highlight(h) => {
                for s in &h.squares {
                    next.get_mut(s.x, s.y)?.state = TileState::Current;
                }
            }
            Effect::None(_) => {}
        }
        Ok(next)
    }
}

fn write_tiles(
    grid: &mut Grid,
    tiles: &[TilePlacement],
    state: TileState,
) -> Result<(), GridError> {
    for t in tiles {
        let tile = grid.get_mut(t.x, t.y)?;
        tile.letter = Some(t.letter);
        tile.state = state;
    }
    Ok(())
}

/// Names of the effect variants, without payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EffectKind {
    #[default]
    Play,
    Highlight,
    #[strum(
        serialize = "show-potential-play",
        serialize = "show_potential_play",
        serialize = "preview"
    )]
    ShowPotentialPlay,
    None,
}

impl EffectKind {
    /// Every kind, in picker order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Play,
        EffectKind::Highlight,
        EffectKind::ShowPotentialPlay,
        EffectKind::None,
    ];

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Play => "play",
            EffectKind::Highlight => "highlight",
            EffectKind::ShowPotentialPlay => "show-potential-play",
            EffectKind::None => "none",
        }
    }

    /// Human label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Play => "Play",
            EffectKind::Highlight => "Highlight",
            EffectKind::ShowPotentialPlay => "Show Potential Play",
            EffectKind::None => "None",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
