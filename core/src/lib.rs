#![no_std]

extern crate alloc;

use core::time::Duration;

pub use board::*;
pub use cascade::*;
pub use cell::*;
pub use completion::*;
pub use error::*;
pub use generator::*;
pub use schedule::*;
pub use selection::*;
pub use session::*;
pub use types::*;
pub use view::*;

pub(crate) use resolver::{Resolution, resolve};
pub use resolver::{MatchVerdict, MistakeCounter};

mod board;
mod cascade;
mod cell;
mod completion;
mod error;
mod generator;
mod resolver;
mod schedule;
mod selection;
mod session;
mod types;
mod view;

/// Rows and columns of the board.
pub const BOARD_SIZE: Coord = 9;

/// Two selected values must add up to this to match.
pub const TARGET_SUM: CellValue = 10;

/// Mismatches allowed before the game is lost.
pub const MISTAKE_LIMIT: u8 = 3;

pub const MIN_VALUE: CellValue = 1;
pub const MAX_VALUE: CellValue = 9;

/// Pause between confirming a match and applying its cascade.
pub const RESOLUTION_DELAY: Duration = Duration::from_millis(120);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The request did not apply and nothing changed.
    Ignored,
    PickStarted,
    PickCancelled,
    /// The pair matched and its cascade is scheduled.
    Matched,
    Mismatched,
    /// The mismatch used up the last allowed mistake.
    Failed,
    /// The interaction left no playable pair on the board.
    Completed,
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing scheduled.
    Idle,
    /// A cascade is scheduled but not due yet.
    Waiting,
    Cascaded(CascadeOutcome),
    /// The cascade ran and left no playable pair.
    Completed(CascadeOutcome),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Cascaded(_) | Self::Completed(_))
    }
}
