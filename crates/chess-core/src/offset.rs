//! Relative displacements on the board.

use std::ops::Mul;

/// A relative `(file, rank)` displacement.
///
/// Movement templates are sets of offsets; sliding pieces scale them by a
/// multiplier to reach further along the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Change in file (positive towards the `h` side).
    pub file: i8,
    /// Change in rank (positive towards Black's side).
    pub rank: i8,
}

impl Offset {
    /// Creates a new offset.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Offset { file, rank }
    }

    /// Returns this offset scaled by `factor`.
    #[inline]
    pub const fn scale(self, factor: i8) -> Self {
        Offset::new(self.file * factor, self.rank * factor)
    }
}

impl Mul<i8> for Offset {
    type Output = Offset;

    fn mul(self, rhs: i8) -> Offset {
        self.scale(rhs)
    }
}
