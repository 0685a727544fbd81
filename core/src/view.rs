use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Text shown for the most recently formed pair. Serialized as its display text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SumExpression {
    Placeholder,
    Pair {
        lhs: CellValue,
        rhs: CellValue,
        sum: u8,
    },
}

impl SumExpression {
    pub const PLACEHOLDER: &'static str = "--";

    pub fn from_selection(selection: &Selection) -> Self {
        match selection.entries() {
            [lhs, rhs] => Self::Pair {
                lhs: lhs.value,
                rhs: rhs.value,
                sum: lhs.value + rhs.value,
            },
            _ => Self::Placeholder,
        }
    }
}

impl fmt::Display for SumExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => f.write_str(Self::PLACEHOLDER),
            Self::Pair { lhs, rhs, sum } => write!(f, "{} + {} = {}", lhs, rhs, sum),
        }
    }
}

impl FromStr for SumExpression {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        if text == Self::PLACEHOLDER {
            return Ok(Self::Placeholder);
        }
        let pair = || {
            let (lhs, rest) = text.split_once(" + ")?;
            let (rhs, sum) = rest.split_once(" = ")?;
            Some(Self::Pair {
                lhs: lhs.parse().ok()?,
                rhs: rhs.parse().ok()?,
                sum: sum.parse().ok()?,
            })
        };
        pair().ok_or(GameError::InvalidExpression)
    }
}

impl From<SumExpression> for String {
    fn from(expr: SumExpression) -> Self {
        expr.to_string()
    }
}

impl TryFrom<String> for SumExpression {
    type Error = GameError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}

/// Render-ready view of one cell. `value` is blank unless the player may see it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub coords: Coord2,
    pub value: Option<CellValue>,
    pub state: CellState,
}

impl CellView {
    /// Stable key for the cell, `"{row}-{col}"`.
    pub fn key(&self) -> String {
        alloc::format!("{}-{}", self.coords.0, self.coords.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub status: GameStatus,
    pub mistakes: u8,
    pub mistake_limit: u8,
    pub opened: CellCount,
    pub playable: CellCount,
    pub opened_percent: u8,
}

/// Everything a presentation shell needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: Coord2,
    /// Row-major cell views.
    pub cells: Vec<CellView>,
    pub sum: SumExpression,
    pub sum_is_target: bool,
    pub locked: bool,
    pub scoreboard: Scoreboard,
}

impl GameSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let cells = board
            .iter()
            .map(|(coords, cell)| CellView {
                coords,
                value: cell.visible_value(),
                state: cell.state(),
            })
            .collect();

        Self {
            size: board.size(),
            cells,
            sum: session.sum_expression(),
            sum_is_target: session.sum_is_target(),
            locked: session.is_locked(),
            scoreboard: Scoreboard {
                status: session.status(),
                mistakes: session.mistake_count(),
                mistake_limit: MISTAKE_LIMIT,
                opened: board.opened_count(),
                playable: board.playable_cells(),
                opened_percent: board.opened_percent(),
            },
        }
    }

    pub fn cell(&self, (row, col): Coord2) -> Option<&CellView> {
        if row >= self.size.0 || col >= self.size.1 {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.size.1) + usize::from(col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(usize::from(self.size.1).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::board_with;

    #[test]
    fn expression_formats_pair_or_placeholder() {
        assert_eq!(SumExpression::Placeholder.to_string(), "--");
        let pair = SumExpression::Pair {
            lhs: 4,
            rhs: 6,
            sum: 10,
        };
        assert_eq!(pair.to_string(), "4 + 6 = 10");
    }

    #[test]
    fn expression_parses_its_own_text() {
        let pair = SumExpression::Pair {
            lhs: 3,
            rhs: 8,
            sum: 11,
        };
        assert_eq!("3 + 8 = 11".parse::<SumExpression>(), Ok(pair));
        assert_eq!("--".parse::<SumExpression>(), Ok(SumExpression::Placeholder));
        assert_eq!(
            "3 + x = 11".parse::<SumExpression>(),
            Err(GameError::InvalidExpression)
        );
        assert_eq!(
            "3 - 8".parse::<SumExpression>(),
            Err(GameError::InvalidExpression)
        );
    }

    #[test]
    fn snapshot_hides_covered_values() {
        let session = GameSession::with_board(board_with(&[((3, 3), 4), ((3, 4), 6)]), 0);
        let snapshot = session.snapshot();

        assert_eq!(snapshot.cells.len(), 81);
        assert_eq!(snapshot.rows().count(), 9);

        let revealed = snapshot.cell((3, 3)).unwrap();
        assert_eq!(revealed.value, Some(4));
        assert_eq!(revealed.state, CellState::Revealed);
        assert_eq!(revealed.key(), "3-3");

        let covered = snapshot.cell((0, 0)).unwrap();
        assert_eq!(covered.value, None);
        assert_eq!(covered.state, CellState::Covered);

        let void = snapshot.cell(Board::center()).unwrap();
        assert_eq!(void.value, None);
        assert_eq!(void.state, CellState::Void);

        assert_eq!(snapshot.cell((9, 0)), None);
    }

    #[test]
    fn snapshot_scoreboard_tracks_session() {
        let mut session = GameSession::with_board(
            board_with(&[((3, 3), 4), ((3, 4), 6), ((5, 5), 3)]),
            0,
        );
        session.pointer_down((3, 3));
        session.pointer_up(Some((5, 5)));
        session.pointer_down((3, 3));
        session.pointer_up(Some((3, 4)));

        let snapshot = session.snapshot();

        assert_eq!(snapshot.sum.to_string(), "4 + 6 = 10");
        assert!(snapshot.sum_is_target);
        assert!(snapshot.locked);
        assert_eq!(
            snapshot.scoreboard,
            Scoreboard {
                status: GameStatus::Playing,
                mistakes: 1,
                mistake_limit: 3,
                opened: 3,
                playable: 80,
                opened_percent: 3,
            }
        );
    }

    #[test]
    fn snapshot_serializes_lowercase_states() {
        let session = GameSession::with_board(board_with(&[((3, 3), 4), ((3, 4), 6)]), 0);
        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["cells"][0]["state"], "covered");
        assert_eq!(json["cells"][30]["state"], "revealed");
        assert_eq!(json["cells"][30]["value"], 4);
        assert_eq!(json["scoreboard"]["status"], "playing");
    }

    #[test]
    fn snapshot_serializes_sum_as_display_text() {
        let mut session = GameSession::with_board(board_with(&[((3, 3), 4), ((3, 4), 6)]), 0);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["sum"], "--");

        session.pointer_down((3, 3));
        session.pointer_up(Some((3, 4)));
        let snapshot = session.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["sum"], "4 + 6 = 10");
        assert_eq!(json["sum_is_target"], true);

        let restored: GameSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
