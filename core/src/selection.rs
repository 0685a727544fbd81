use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// A selected cell, captured with its value at the moment it was picked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub coords: Coord2,
    pub value: CellValue,
}

/// Result of releasing the pointer on a pick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickEnd {
    /// No pick was in progress.
    NotPicking,
    /// The pick ended on nothing usable and was dropped.
    Cancelled,
    /// The pick completed into a two-cell pair.
    Paired,
}

/// Ordered cells picked by the player, at most two.
///
/// Length 0 is idle, length 1 is a pick waiting for its end cell, and length 2 is a
/// pair that is being judged or waiting for its cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    entries: SmallVec<[SelectionEntry; 2]>,
}

impl Selection {
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pick_in_progress(&self) -> bool {
        self.entries.len() == 1
    }

    pub fn is_pair(&self) -> bool {
        self.entries.len() == 2
    }

    pub fn start(&self) -> Option<SelectionEntry> {
        self.entries.first().copied()
    }

    /// The most recently selected cell.
    pub fn pivot(&self) -> Option<SelectionEntry> {
        self.entries.last().copied()
    }

    pub fn sum(&self) -> u8 {
        self.entries.iter().map(|entry| entry.value).sum()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.entries.iter().map(|entry| entry.coords)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Starts a new pick on `coords`, which must be a revealed cell.
    ///
    /// Stale `selecting` cells from a pick that never ended are returned to
    /// `revealed` first.
    pub(crate) fn begin(&mut self, board: &mut Board, coords: Coord2) -> bool {
        let Some(entry) = selectable_entry(board, coords) else {
            return false;
        };

        let stale = board.revert_selecting();
        if stale > 0 {
            log::warn!("reverted {} stale selecting cell(s) before new pick", stale);
        }

        board.transition(coords, CellState::Selecting);
        self.entries.clear();
        self.entries.push(entry);
        true
    }

    /// Ends the current pick on `end`, or cancels it when `end` is unusable.
    pub(crate) fn end(&mut self, board: &mut Board, end: Option<Coord2>) -> PickEnd {
        let Some(start) = self.start().filter(|_| self.is_pick_in_progress()) else {
            return PickEnd::NotPicking;
        };

        let end_entry = end
            .filter(|&coords| coords != start.coords)
            .and_then(|coords| selectable_entry(board, coords));

        match end_entry {
            Some(entry) => {
                board.transition(entry.coords, CellState::Selecting);
                self.entries.push(entry);
                PickEnd::Paired
            }
            None => {
                board.revert_selecting();
                self.entries.clear();
                PickEnd::Cancelled
            }
        }
    }
}

fn selectable_entry(board: &Board, coords: Coord2) -> Option<SelectionEntry> {
    let cell = board.cell_at(coords);
    if !cell.state().is_selectable() {
        return None;
    }
    cell.value().map(|value| SelectionEntry { coords, value })
}
