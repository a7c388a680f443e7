//! Pure projection of a [`GameState`] into what the board view draws.
//!
//! No state is carried between calls; the DOM layer rebuilds the whole board
//! from each projection.

use std::collections::HashSet;

use crate::engine::diff::PlacedDisc;
use crate::state::{Coord, GameState, Marker, Mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub marker: Marker,
    /// Part of the winning line.
    pub highlighted: bool,
    /// The disc the last drop animation targeted.
    pub just_placed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardProjection {
    /// 42 cells, row-major.
    pub cells: Vec<CellView>,
    pub status: String,
    pub mode_label: Option<&'static str>,
    pub selected_mode: Option<Mode>,
    pub game_over: bool,
}

impl BoardProjection {
    pub fn cell(&self, coord: Coord) -> Option<&CellView> {
        coord
            .in_bounds()
            .then(|| self.cells.get(coord.cell_index()))
            .flatten()
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &CellView> + '_ {
        self.cells.iter().filter(|c| c.highlighted)
    }
}

pub fn status_line(state: &GameState) -> String {
    if let Some(n) = state.winner.player_number() {
        format!("Player {n} wins!")
    } else if state.draw {
        "Draw.".to_string()
    } else {
        match state.current_player.player_number() {
            Some(n) => format!("Player {n} to move"),
            None => "Waiting for the server".to_string(),
        }
    }
}

pub fn project(state: &GameState, placed: Option<PlacedDisc>) -> BoardProjection {
    let winning: HashSet<Coord> = state
        .win_coords
        .iter()
        .copied()
        .filter(|c| c.in_bounds())
        .collect();
    let placed_at = placed.map(|p| p.coord());

    let cells = state
        .board
        .iter()
        .map(|(row, col, marker)| {
            let coord = Coord::new(row, col);
            CellView {
                row,
                col,
                marker,
                highlighted: winning.contains(&coord),
                just_placed: placed_at == Some(coord),
            }
        })
        .collect();

    BoardProjection {
        cells,
        status: status_line(state),
        mode_label: state.mode.map(Mode::label),
        selected_mode: state.mode,
        game_over: state.is_over(),
    }
}
