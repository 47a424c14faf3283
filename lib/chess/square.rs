use derive_more::{Display, Error};
use std::fmt::{self, Display, Formatter};

/// A coordinate on the board.
///
/// Rows grow from Black's home rank at the top (row 0) to White's at the
/// bottom (row 7); columns grow from the queenside (col 0) to the kingside
/// (col 7).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square(#[cfg_attr(test, strategy(0u8..64))] u8);

impl Square {
    /// Constructs [`Square`] from a pair of row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is off the board.
    #[inline(always)]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "({row}, {col}) is off the board");
        Square(row * 8 + col)
    }

    /// This square's row.
    #[inline(always)]
    pub fn row(&self) -> u8 {
        self.0 / 8
    }

    /// This square's column.
    #[inline(always)]
    pub fn col(&self) -> u8 {
        self.0 % 8
    }

    /// The square displaced by the given number of rows and columns, if any.
    #[inline(always)]
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;

        match (0..8).contains(&row) && (0..8).contains(&col) {
            true => Some(Square::new(row as u8, col as u8)),
            false => None,
        }
    }

    /// An iterator over all squares in row-major order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> {
        (0..64).map(Square)
    }
}

/// The reason why a pair of coordinates does not address a square.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "square off the board")]
pub struct InvalidSquare;

impl TryFrom<(u8, u8)> for Square {
    type Error = InvalidSquare;

    #[inline(always)]
    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        match row < 8 && col < 8 {
            true => Ok(Square::new(row, col)),
            false => Err(InvalidSquare),
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, 8 - self.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn new_constructs_square_from_pair_of_row_and_col(sq: Square) {
        assert_eq!(Square::new(sq.row(), sq.col()), sq);
    }

    #[proptest]
    #[should_panic]
    fn new_panics_if_row_is_off_the_board(#[strategy(8u8..)] row: u8, #[strategy(0u8..8)] col: u8) {
        Square::new(row, col);
    }

    #[test]
    fn iter_yields_all_squares_in_row_major_order() {
        assert_eq!(Square::iter().len(), 64);
        assert_eq!(Square::iter().next(), Some(Square::new(0, 0)));
        assert_eq!(Square::iter().last(), Some(Square::new(7, 7)));
    }

    #[proptest]
    fn offset_by_zero_is_an_identity(sq: Square) {
        assert_eq!(sq.offset(0, 0), Some(sq));
    }

    #[proptest]
    fn offset_stays_on_the_board(sq: Square, #[strategy(-8i8..8)] dr: i8, #[strategy(-8i8..8)] dc: i8) {
        if let Some(to) = sq.offset(dr, dc) {
            assert_eq!(to.row() as i8, sq.row() as i8 + dr);
            assert_eq!(to.col() as i8, sq.col() as i8 + dc);
        }
    }

    #[proptest]
    fn squares_convert_from_coordinate_pairs(sq: Square) {
        assert_eq!(Square::try_from((sq.row(), sq.col())), Ok(sq));
    }

    #[proptest]
    fn conversion_fails_for_coordinates_off_the_board(#[strategy(8u8..)] row: u8, col: u8) {
        assert_eq!(Square::try_from((row, col)), Err(InvalidSquare));
        assert_eq!(Square::try_from((col.min(7), row)), Err(InvalidSquare));
    }

    #[test]
    fn squares_print_in_algebraic_notation() {
        assert_eq!(Square::new(7, 0).to_string(), "a1");
        assert_eq!(Square::new(0, 7).to_string(), "h8");
        assert_eq!(Square::new(6, 4).to_string(), "e2");
    }
}
