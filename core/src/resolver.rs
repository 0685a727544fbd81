use serde::{Deserialize, Serialize};

use crate::*;

/// Judgement on a completed pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    Matched,
    Mismatched,
}

impl MatchVerdict {
    pub fn judge(entries: &[SelectionEntry]) -> Self {
        let sum: u16 = entries.iter().map(|entry| u16::from(entry.value)).sum();
        if entries.len() >= 2 && sum == u16::from(TARGET_SUM) {
            Self::Matched
        } else {
            Self::Mismatched
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// Monotonic count of mismatched pairs within one session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCounter {
    count: u8,
}

impl MistakeCounter {
    pub const fn count(&self) -> u8 {
        self.count
    }

    pub const fn limit_reached(&self) -> bool {
        self.count >= MISTAKE_LIMIT
    }

    /// Records a mistake, returning `true` once the limit is reached.
    pub(crate) fn record(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.limit_reached()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Both cells moved to `success`, cascade still owed.
    Matched,
    /// Both cells returned to `revealed` and a mistake was counted.
    Mismatched { limit_reached: bool },
}

/// Applies the verdict for a completed pair to the board and the mistake counter.
pub(crate) fn resolve(
    board: &mut Board,
    selection: &Selection,
    mistakes: &mut MistakeCounter,
) -> Resolution {
    match MatchVerdict::judge(selection.entries()) {
        MatchVerdict::Matched => {
            board.transition_all(selection.coords(), CellState::Success);
            log::debug!("matched {:?}", selection.entries());
            Resolution::Matched
        }
        MatchVerdict::Mismatched => {
            board.transition_all(selection.coords(), CellState::Revealed);
            let limit_reached = mistakes.record();
            log::debug!(
                "mismatched {:?}, mistakes: {}/{}",
                selection.entries(),
                mistakes.count(),
                MISTAKE_LIMIT
            );
            Resolution::Mismatched { limit_reached }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::board_with;

    fn entry(coords: Coord2, value: CellValue) -> SelectionEntry {
        SelectionEntry { coords, value }
    }

    fn paired(board: &mut Board, start: Coord2, end: Coord2) -> Selection {
        let mut selection = Selection::default();
        assert!(selection.begin(board, start));
        assert_eq!(selection.end(board, Some(end)), PickEnd::Paired);
        selection
    }

    #[test]
    fn judge_accepts_exactly_the_target_sum() {
        for a in MIN_VALUE..=MAX_VALUE {
            for b in MIN_VALUE..=MAX_VALUE {
                let verdict = MatchVerdict::judge(&[entry((0, 0), a), entry((0, 1), b)]);
                assert_eq!(verdict.is_match(), a + b == TARGET_SUM, "{a} + {b}");
            }
        }
    }

    #[test]
    fn judge_rejects_incomplete_selection() {
        assert_eq!(MatchVerdict::judge(&[]), MatchVerdict::Mismatched);
        assert_eq!(
            MatchVerdict::judge(&[entry((0, 0), 9)]),
            MatchVerdict::Mismatched
        );
    }

    #[test]
    fn resolve_match_marks_cells_success_without_mistake() {
        let mut board = board_with(&[((3, 3), 4), ((3, 4), 6)]);
        let mut mistakes = MistakeCounter::default();
        let selection = paired(&mut board, (3, 3), (3, 4));

        assert_eq!(
            resolve(&mut board, &selection, &mut mistakes),
            Resolution::Matched
        );
        assert_eq!(board.state_at((3, 3)), CellState::Success);
        assert_eq!(board.state_at((3, 4)), CellState::Success);
        assert_eq!(mistakes.count(), 0);
    }

    #[test]
    fn resolve_mismatch_reverts_cells_and_counts() {
        let mut board = board_with(&[((3, 3), 4), ((3, 4), 3)]);
        let mut mistakes = MistakeCounter::default();
        let selection = paired(&mut board, (3, 3), (3, 4));

        assert_eq!(
            resolve(&mut board, &selection, &mut mistakes),
            Resolution::Mismatched {
                limit_reached: false
            }
        );
        assert_eq!(board.state_at((3, 3)), CellState::Revealed);
        assert_eq!(board.state_at((3, 4)), CellState::Revealed);
        assert_eq!(mistakes.count(), 1);
    }

    #[test]
    fn mistake_counter_reports_limit_on_third_mistake() {
        let mut mistakes = MistakeCounter::default();
        assert!(!mistakes.record());
        assert!(!mistakes.record());
        assert!(mistakes.record());
        assert!(mistakes.limit_reached());
        assert_eq!(mistakes.count(), MISTAKE_LIMIT);
    }
}
