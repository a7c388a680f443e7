//! Locating the disc a move added.

use crate::state::{Board, Coord, Marker};

/// Disc found by diffing two snapshots. Lives for a single animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedDisc {
    pub row: usize,
    pub col: usize,
    pub marker: Marker,
}

impl PlacedDisc {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// First cell, in row-major order, whose marker differs between `prev` and
/// `next`. A move only ever adds one disc, so the first difference is the
/// placement. `None` means nothing to animate.
pub fn find_placed_disc(prev: &Board, next: &Board) -> Option<PlacedDisc> {
    prev.iter()
        .zip(next.iter())
        .find(|((_, _, before), (_, _, after))| before != after)
        .map(|(_, (row, col, marker))| PlacedDisc { row, col, marker })
}
