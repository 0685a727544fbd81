/// Single coordinate axis used for board rows, columns, and the board size.
pub type Coord = u8;

/// Count type used for cell totals and opened-cell counts.
pub type CellCount = u16;

/// Numeric face value of a cell, always within `1..=9`.
pub type CellValue = u8;

/// Two-dimensional coordinates `(row, col)`, origin at the top-left corner.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Relative cell sets anchored on a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The 8 cells surrounding the anchor, excluding the anchor itself.
    Ring,
    /// The anchor plus its 4 orthogonal neighbors.
    Cross,
    /// The full 3x3 block centered on the anchor.
    Square,
}

const RING: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const CROSS: [(i8, i8); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

const SQUARE: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Shape {
    const fn displacements(self) -> &'static [(i8, i8)] {
        match self {
            Self::Ring => &RING,
            Self::Cross => &CROSS,
            Self::Square => &SQUARE,
        }
    }

    /// Iterates the in-bounds cells of this shape anchored at `anchor`.
    pub fn cells(self, anchor: Coord2, bounds: Coord2) -> ShapeIter {
        ShapeIter::new(self.displacements(), anchor, bounds)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug, Clone)]
pub struct ShapeIter {
    displacements: &'static [(i8, i8)],
    anchor: Coord2,
    bounds: Coord2,
    index: usize,
}

impl ShapeIter {
    fn new(displacements: &'static [(i8, i8)], anchor: Coord2, bounds: Coord2) -> Self {
        Self {
            displacements,
            anchor,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for ShapeIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(self.index)?;
            self.index += 1;

            if let Some(coords) = apply_delta(self.anchor, delta, self.bounds) {
                return Some(coords);
            }
        }
    }
}
