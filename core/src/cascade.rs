use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Extra cells affected by a cascade, chosen by how long the resolved path was.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusShape {
    Empty,
    Cross,
    Square,
}

impl BonusShape {
    pub const CROSS_MIN_PATH: usize = 3;
    pub const SQUARE_MIN_PATH: usize = 5;

    pub const fn for_path_length(path_length: usize) -> Self {
        if path_length >= Self::SQUARE_MIN_PATH {
            Self::Square
        } else if path_length >= Self::CROSS_MIN_PATH {
            Self::Cross
        } else {
            Self::Empty
        }
    }

    pub fn cells(self, pivot: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
        let shape = match self {
            Self::Empty => None,
            Self::Cross => Some(Shape::Cross),
            Self::Square => Some(Shape::Square),
        };
        shape
            .into_iter()
            .flat_map(move |shape| shape.cells(pivot, bounds))
    }
}

/// Cells a successful match clears and reveals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePlan {
    pub clear: SmallVec<[Coord2; 11]>,
    pub reveal: SmallVec<[Coord2; 9]>,
}

impl CascadePlan {
    /// Plans the cascade for a resolved path, anchored on its last cell.
    pub fn new(path: &[SelectionEntry], bounds: Coord2) -> Self {
        let Some(pivot) = path.last() else {
            return Self::default();
        };
        let shape = BonusShape::for_path_length(path.len());

        let mut clear: SmallVec<[Coord2; 11]> = SmallVec::new();
        let targets = path
            .iter()
            .map(|entry| entry.coords)
            .chain(shape.cells(pivot.coords, bounds));
        for coords in targets {
            if !clear.contains(&coords) {
                clear.push(coords);
            }
        }

        let reveal = shape.cells(pivot.coords, bounds).collect();

        Self { clear, reveal }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub cleared: CellCount,
    pub revealed: CellCount,
}

impl CascadeOutcome {
    pub const fn has_update(self) -> bool {
        self.cleared > 0 || self.revealed > 0
    }
}

impl Board {
    /// Applies a cascade in one step: clears first, then reveals whatever is still covered.
    pub(crate) fn apply_cascade(&mut self, plan: &CascadePlan) -> CascadeOutcome {
        let cleared = self.transition_all(plan.clear.iter().copied(), CellState::Cleared);
        let mut revealed = 0;
        for &coords in &plan.reveal {
            if self.state_at(coords) == CellState::Covered
                && self.transition(coords, CellState::Revealed)
            {
                revealed += 1;
            }
        }

        let outcome = CascadeOutcome { cleared, revealed };
        log::debug!("cascade {:?}", outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::board_with;
    use alloc::vec::Vec;

    const BOUNDS: Coord2 = (BOARD_SIZE, BOARD_SIZE);

    fn path(coords: &[Coord2]) -> Vec<SelectionEntry> {
        coords
            .iter()
            .map(|&coords| SelectionEntry { coords, value: 5 })
            .collect()
    }

    #[test]
    fn shape_follows_path_length() {
        assert_eq!(BonusShape::for_path_length(0), BonusShape::Empty);
        assert_eq!(BonusShape::for_path_length(2), BonusShape::Empty);
        assert_eq!(BonusShape::for_path_length(3), BonusShape::Cross);
        assert_eq!(BonusShape::for_path_length(4), BonusShape::Cross);
        assert_eq!(BonusShape::for_path_length(5), BonusShape::Square);
        assert_eq!(BonusShape::for_path_length(8), BonusShape::Square);
    }

    #[test]
    fn pair_plan_clears_only_the_pair() {
        let plan = CascadePlan::new(&path(&[(3, 3), (3, 4)]), BOUNDS);

        assert_eq!(plan.clear.as_slice(), [(3, 3), (3, 4)]);
        assert!(plan.reveal.is_empty());
    }

    #[test]
    fn cross_plan_deduplicates_pivot() {
        let plan = CascadePlan::new(&path(&[(0, 1), (0, 2), (0, 3)]), BOUNDS);

        assert_eq!(
            plan.clear.as_slice(),
            [(0, 1), (0, 2), (0, 3), (1, 3), (0, 4)]
        );
        assert_eq!(plan.reveal.as_slice(), [(0, 3), (1, 3), (0, 4), (0, 2)]);
    }

    #[test]
    fn square_plan_is_clipped_at_corner() {
        let plan = CascadePlan::new(&path(&[(2, 2), (1, 1), (0, 1), (1, 0), (0, 0)]), BOUNDS);

        assert_eq!(plan.reveal.len(), 4);
        assert_eq!(plan.clear.len(), 5);
        assert!(plan.clear.contains(&(2, 2)));
    }

    #[test]
    fn empty_path_plans_nothing() {
        assert_eq!(CascadePlan::new(&[], BOUNDS), CascadePlan::default());
    }

    #[test]
    fn apply_clears_pair_and_leaves_rest() {
        let mut board = board_with(&[((3, 3), 4), ((3, 4), 6), ((5, 5), 1)]);
        let plan = CascadePlan::new(&path(&[(3, 3), (3, 4)]), BOUNDS);

        let outcome = board.apply_cascade(&plan);

        assert_eq!(
            outcome,
            CascadeOutcome {
                cleared: 2,
                revealed: 0
            }
        );
        assert_eq!(board.state_at((3, 3)), CellState::Cleared);
        assert_eq!(board.state_at((3, 4)), CellState::Cleared);
        assert_eq!(board.state_at((5, 5)), CellState::Revealed);
        assert_eq!(board.state_at((2, 4)), CellState::Covered);
    }

    #[test]
    fn apply_square_spares_void_and_cleared_cells() {
        let mut board = board_with(&[((3, 3), 4), ((3, 4), 6)]);
        board.transition((5, 5), CellState::Cleared);
        let plan = CascadePlan::new(
            &path(&[(3, 3), (3, 4), (3, 5), (5, 3), (4, 5)]),
            BOUNDS,
        );

        let outcome = board.apply_cascade(&plan);

        assert_eq!(board.state_at(Board::center()), CellState::Void);
        assert_eq!(board.state_at((5, 5)), CellState::Cleared);
        for coords in Shape::Square.cells((4, 5), BOUNDS) {
            assert_ne!(board.state_at(coords), CellState::Covered);
        }
        assert_eq!(outcome.revealed, 0);
    }

    #[test]
    fn apply_cross_reveals_covered_neighbors_outside_clear_set() {
        let mut board = board_with(&[((0, 0), 2)]);
        let plan = CascadePlan {
            clear: SmallVec::from_slice(&[(0, 0)]),
            reveal: Shape::Cross.cells((1, 1), BOUNDS).collect(),
        };

        let outcome = board.apply_cascade(&plan);

        assert_eq!(
            outcome,
            CascadeOutcome {
                cleared: 1,
                revealed: 5
            }
        );
        assert_eq!(board.state_at((1, 1)), CellState::Revealed);
        assert_eq!(board.state_at((0, 1)), CellState::Revealed);
        assert_eq!(board.state_at((2, 2)), CellState::Covered);
    }
}
