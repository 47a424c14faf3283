use crate::chess::Square;
use derive_more::Display;

/// A chess move in [pure coordinate notation].
///
/// Carries no inherent legality; that is a judgment of the
/// [rules][`crate::chess::validate`] relative to a board and a side to move.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", _0, _1)]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The number of rows travelled, signed.
    #[inline(always)]
    pub fn row_delta(&self) -> i8 {
        self.whither().row() as i8 - self.whence().row() as i8
    }

    /// The number of columns travelled, signed.
    #[inline(always)]
    pub fn col_delta(&self) -> i8 {
        self.whither().col() as i8 - self.whence().col() as i8
    }
}
