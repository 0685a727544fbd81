use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle state of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// Value assigned but hidden from the player.
    Covered,
    /// Value visible and available for selection.
    Revealed,
    /// Member of the in-progress selection.
    Selecting,
    /// Part of a confirmed match waiting for the cascade.
    Success,
    /// Permanently removed from play.
    Cleared,
    /// The center cell, which never holds a value.
    Void,
}

impl CellState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cleared | Self::Void)
    }

    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Revealed)
    }

    /// Whether the cell counts as opened on the scoreboard.
    pub const fn is_opened(self) -> bool {
        !matches!(self, Self::Covered | Self::Void)
    }

    /// Whether the cell's value is shown to the player.
    pub const fn shows_value(self) -> bool {
        matches!(self, Self::Revealed | Self::Selecting | Self::Success)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        use CellState::*;
        matches!(
            (self, next),
            (Covered, Revealed | Cleared)
                | (Revealed, Selecting | Cleared)
                | (Selecting, Revealed | Success | Cleared)
                | (Success, Revealed | Cleared)
        )
    }
}

/// Canonical cell record stored by the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<CellValue>,
    state: CellState,
}

impl Cell {
    pub(crate) const fn void() -> Self {
        Self {
            value: None,
            state: CellState::Void,
        }
    }

    pub(crate) fn with_value(value: CellValue, state: CellState) -> Result<Self> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) || state == CellState::Void {
            return Err(GameError::InvalidValue);
        }
        Ok(Self {
            value: Some(value),
            state,
        })
    }

    pub const fn value(&self) -> Option<CellValue> {
        self.value
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Value the player can currently see, blank otherwise.
    pub const fn visible_value(&self) -> Option<CellValue> {
        if self.state.shows_value() {
            self.value
        } else {
            None
        }
    }

    /// Moves the cell to `next` when the lifecycle allows it.
    pub(crate) fn transition(&mut self, next: CellState) -> bool {
        if self.state.can_transition_to(next) {
            self.state = next;
            true
        } else {
            false
        }
    }
}
