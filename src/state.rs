//! Wire-level game snapshots as served by the rules server.
//!
//! Every value here is an immutable snapshot: the client never edits a board in
//! place, it only receives fresh ones from `/api/state`, `/api/play`,
//! `/api/reset` and `/api/set_mode`. Shape checks (6x7 grid, marker range, mode
//! tags) happen while decoding so the rest of the crate can rely on them.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

// --- Markers ----------------------------------------------------------------

/// Value occupying a board cell. Encoded as `0 | 1 | 2` on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Marker {
    #[default]
    Empty,
    One,
    Two,
}

impl Marker {
    /// Player number (1 or 2), `None` for an empty cell.
    pub fn player_number(self) -> Option<u8> {
        match self {
            Marker::Empty => None,
            Marker::One => Some(1),
            Marker::Two => Some(2),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Marker::Empty)
    }

    /// CSS class used for a disc of this marker (`p1` / `p2`).
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Marker::Empty => None,
            Marker::One => Some("p1"),
            Marker::Two => Some("p2"),
        }
    }
}

impl TryFrom<u8> for Marker {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Marker::Empty),
            1 => Ok(Marker::One),
            2 => Ok(Marker::Two),
            other => Err(format!("unknown marker {other}")),
        }
    }
}

impl From<Marker> for u8 {
    fn from(m: Marker) -> u8 {
        m.player_number().unwrap_or(0)
    }
}

// --- Board ------------------------------------------------------------------

/// 6x7 grid, row 0 at the top. Decoding rejects any other shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Marker>>", into = "Vec<Vec<Marker>>")]
pub struct Board {
    cells: [[Marker; COLS]; ROWS],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Marker::Empty; COLS]; ROWS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Marker> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Row-major walk over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Marker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, m)| (r, c, *m)))
    }

    /// Copy of this snapshot with one cell replaced. Out-of-range positions
    /// return an unchanged copy.
    pub fn with_marker(&self, row: usize, col: usize, marker: Marker) -> Self {
        let mut next = self.clone();
        if let Some(cell) = next.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = marker;
        }
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<Marker>>> for Board {
    type Error = String;

    fn try_from(rows: Vec<Vec<Marker>>) -> Result<Self, Self::Error> {
        if rows.len() != ROWS {
            return Err(format!("board must have {ROWS} rows, got {}", rows.len()));
        }
        let mut cells = [[Marker::Empty; COLS]; ROWS];
        for (r, row) in rows.into_iter().enumerate() {
            let row: [Marker; COLS] = row.try_into().map_err(|row: Vec<Marker>| {
                format!("board row {r} must have {COLS} cells, got {}", row.len())
            })?;
            cells[r] = row;
        }
        Ok(Self { cells })
    }
}

impl From<Board> for Vec<Vec<Marker>> {
    fn from(b: Board) -> Self {
        b.cells.iter().map(|row| row.to_vec()).collect()
    }
}

// --- Coordinates / columns --------------------------------------------------

/// `(row, col)` pair, encoded as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Row-major index into the 42 rendered cells.
    pub fn cell_index(self) -> usize {
        self.row * COLS + self.col
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for (usize, usize) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

/// Column a player drops into. Only `0..7` is constructible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column(u8);

impl Column {
    pub fn new(index: usize) -> Option<Self> {
        (index < COLS).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Column> {
        (0..COLS as u8).map(Column)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Game modes -------------------------------------------------------------

/// Server-side game variant. The `anti_*` tags invert gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Pvp,
    PveEasy,
    PveSmart,
    AntiPvp,
    AntiPveEasy,
    AntiPveSmart,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Pvp,
        Mode::PveEasy,
        Mode::PveSmart,
        Mode::AntiPvp,
        Mode::AntiPveEasy,
        Mode::AntiPveSmart,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Mode::Pvp => "pvp",
            Mode::PveEasy => "pve_easy",
            Mode::PveSmart => "pve_smart",
            Mode::AntiPvp => "anti_pvp",
            Mode::AntiPveEasy => "anti_pve_easy",
            Mode::AntiPveSmart => "anti_pve_smart",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Pvp => "Player vs Player",
            Mode::PveEasy => "Player vs AI (easy)",
            Mode::PveSmart => "Player vs AI (smart)",
            Mode::AntiPvp => "Reverse gravity: Player vs Player",
            Mode::AntiPveEasy => "Reverse gravity: Player vs AI (easy)",
            Mode::AntiPveSmart => "Reverse gravity: Player vs AI (smart)",
        }
    }
}

// --- Game state -------------------------------------------------------------

/// Full server snapshot. `win_coords` may arrive as `null`; `mode` is only
/// sent by mode-aware servers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Marker,
    #[serde(default)]
    pub winner: Marker,
    #[serde(default)]
    pub draw: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub win_coords: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl GameState {
    /// Canonical fresh game: empty board, player one to move.
    pub fn initial() -> Self {
        Self {
            board: Board::empty(),
            current_player: Marker::One,
            winner: Marker::Empty,
            draw: false,
            win_coords: Vec::new(),
            mode: None,
        }
    }

    pub fn is_over(&self) -> bool {
        !self.winner.is_empty() || self.draw
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Coord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Coord>>::deserialize(deserializer)?.unwrap_or_default())
}
