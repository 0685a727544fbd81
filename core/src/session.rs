use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Failed,
    Completed,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Failed | Self::Completed)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Everything owned by a single game, from deal to restart.
///
/// Input requests that do not apply to the current state are ignored and
/// reported as [`InputOutcome::Ignored`]; they never fail.
#[derive(Clone, Debug)]
pub struct GameSession {
    seeder: SmallRng,
    board: Board,
    selection: Selection,
    sum: SumExpression,
    mistakes: MistakeCounter,
    status: GameStatus,
    pointer_active: bool,
    pending: TaskSlot<Selection>,
}

impl GameSession {
    /// Starts a session whose boards, including those dealt on restart, all derive from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut seeder = SmallRng::seed_from_u64(seed);
        let board = RandomBoardGenerator::new(seeder.random()).generate();
        Self::assemble(seeder, board)
    }

    /// Starts a session on a prepared board. Restarts deal random boards seeded from `seed`.
    pub fn with_board(board: Board, seed: u64) -> Self {
        Self::assemble(SmallRng::seed_from_u64(seed), board)
    }

    fn assemble(seeder: SmallRng, board: Board) -> Self {
        let mut session = Self {
            seeder,
            board,
            selection: Selection::default(),
            sum: SumExpression::Placeholder,
            mistakes: MistakeCounter::default(),
            status: GameStatus::Playing,
            pointer_active: false,
            pending: TaskSlot::default(),
        };
        session.evaluate_completion();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mistake_count(&self) -> u8 {
        self.mistakes.count()
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn is_pointer_active(&self) -> bool {
        self.pointer_active
    }

    /// Time left before the pending cascade runs.
    pub fn resolution_remaining(&self) -> Option<Duration> {
        self.pending.remaining()
    }

    /// Whether the board currently rejects picks.
    pub fn is_locked(&self) -> bool {
        self.status.is_finished() || self.is_resolving()
    }

    pub fn sum_expression(&self) -> SumExpression {
        self.sum
    }

    /// True while a completed pair summing to the target is held.
    pub fn sum_is_target(&self) -> bool {
        self.selection.is_pair() && self.selection.sum() == TARGET_SUM
    }

    pub fn opened_count(&self) -> CellCount {
        self.board.opened_count()
    }

    pub fn opened_percent(&self) -> u8 {
        self.board.opened_percent()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_session(self)
    }

    /// Pointer pressed on `coords`; starts a pick when the cell is revealed.
    pub fn pointer_down(&mut self, coords: Coord2) -> InputOutcome {
        if self.is_locked() {
            log::trace!("pointer down at {:?} ignored, board locked", coords);
            return InputOutcome::Ignored;
        }
        let Ok(coords) = self.board.validate_coords(coords) else {
            log::trace!("pointer down outside the board at {:?}", coords);
            return InputOutcome::Ignored;
        };
        if !self.selection.begin(&mut self.board, coords) {
            log::trace!(
                "pointer down at {:?} ignored, cell is {:?}",
                coords,
                self.board.state_at(coords)
            );
            return InputOutcome::Ignored;
        }

        self.sum = SumExpression::Placeholder;
        self.pointer_active = true;
        log::debug!("pick started at {:?}", coords);
        InputOutcome::PickStarted
    }

    /// Pointer released over `end`, or over nothing when `None`.
    pub fn pointer_up(&mut self, end: Option<Coord2>) -> InputOutcome {
        if self.is_locked() || !self.pointer_active {
            log::trace!("pointer up at {:?} ignored", end);
            return InputOutcome::Ignored;
        }
        self.pointer_active = false;

        let end = end.and_then(|coords| self.board.validate_coords(coords).ok());
        match self.selection.end(&mut self.board, end) {
            PickEnd::NotPicking => {
                log::warn!("pointer was active without a pick in progress");
                self.selection.clear();
                InputOutcome::Ignored
            }
            PickEnd::Cancelled => {
                log::debug!("pick cancelled at {:?}", end);
                self.sum = SumExpression::Placeholder;
                self.settle(InputOutcome::PickCancelled)
            }
            PickEnd::Paired => {
                self.sum = SumExpression::from_selection(&self.selection);
                self.resolve_pair()
            }
        }
    }

    /// The shell lost the pointer; behaves like a release over nothing.
    pub fn pointer_cancel(&mut self) -> InputOutcome {
        self.pointer_up(None)
    }

    /// Reports time passing, running the pending cascade once its delay is over.
    pub fn advance(&mut self, elapsed: Duration) -> TickOutcome {
        let Some(path) = self.pending.advance(elapsed) else {
            return if self.is_resolving() {
                TickOutcome::Waiting
            } else {
                TickOutcome::Idle
            };
        };

        let plan = CascadePlan::new(path.entries(), self.board.size());
        let cascade = self.board.apply_cascade(&plan);
        self.selection.clear();

        if self.evaluate_completion() {
            TickOutcome::Completed(cascade)
        } else {
            TickOutcome::Cascaded(cascade)
        }
    }

    /// Throws the current game away and deals a fresh one.
    pub fn restart(&mut self) {
        let seed = self.seeder.random();
        let board = RandomBoardGenerator::new(seed).generate();
        self.restart_with_board(board);
    }

    /// Throws the current game away and starts over on `board`.
    pub fn restart_with_board(&mut self, board: Board) {
        if self.pending.cancel().is_some() {
            log::debug!("restart cancelled a pending cascade");
        }
        let seeder = self.seeder.clone();
        *self = Self::assemble(seeder, board);
        log::debug!("restarted, status: {:?}", self.status);
    }

    fn resolve_pair(&mut self) -> InputOutcome {
        match resolve(&mut self.board, &self.selection, &mut self.mistakes) {
            Resolution::Matched => {
                self.pending
                    .schedule(RESOLUTION_DELAY, self.selection.clone());
                InputOutcome::Matched
            }
            Resolution::Mismatched { limit_reached } => {
                self.selection.clear();
                if limit_reached {
                    self.set_status(GameStatus::Failed);
                    return InputOutcome::Failed;
                }
                self.settle(InputOutcome::Mismatched)
            }
        }
    }

    /// Re-checks completion after a board mutation made by `outcome`.
    fn settle(&mut self, outcome: InputOutcome) -> InputOutcome {
        if self.evaluate_completion() {
            InputOutcome::Completed
        } else {
            outcome
        }
    }

    fn evaluate_completion(&mut self) -> bool {
        let gate = CompletionGate {
            status: self.status,
            pick_in_progress: self.pointer_active,
            resolving: self.is_resolving(),
        };
        if self.board.is_exhausted(gate) {
            self.set_status(GameStatus::Completed);
            true
        } else {
            false
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!("status: {:?} -> {:?}", self.status, status);
        self.status = status;
    }
}
