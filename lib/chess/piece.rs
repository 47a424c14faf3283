use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Display, Formatter, Write};

/// A chess piece of a certain [`Role`] and [`Color`].
///
/// Discriminants are the wire codes: 1–6 for white, 7–12 for black, with
/// 0 reserved for the empty square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 1,
    WhiteRook,
    WhiteKnight,
    WhiteBishop,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackRook,
    BlackKnight,
    BlackBishop,
    BlackQueen,
    BlackKing,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline(always)]
    pub fn new(r: Role, c: Color) -> Self {
        const PIECES: [[Piece; 6]; 2] = [
            [
                Piece::WhitePawn,
                Piece::WhiteRook,
                Piece::WhiteKnight,
                Piece::WhiteBishop,
                Piece::WhiteQueen,
                Piece::WhiteKing,
            ],
            [
                Piece::BlackPawn,
                Piece::BlackRook,
                Piece::BlackKnight,
                Piece::BlackBishop,
                Piece::BlackQueen,
                Piece::BlackKing,
            ],
        ];

        PIECES[c as usize][r.index()]
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        Role::from_index((self.code() - 1) % 6)
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        match self.code() <= 6 {
            true => Color::White,
            false => Color::Black,
        }
    }

    /// This piece's wire code.
    #[inline(always)]
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// The reason why decoding [`Piece`] from its wire code failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "not a valid piece code")]
pub struct DecodePieceError;

impl TryFrom<u8> for Piece {
    type Error = DecodePieceError;

    #[inline(always)]
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1..=12 => {
                let c = match code <= 6 {
                    true => Color::White,
                    false => Color::Black,
                };

                Ok(Piece::new(Role::from_index((code - 1) % 6), c))
            }

            _ => Err(DecodePieceError),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.color() {
            Color::White => f.write_char(self.role().glyph().to_ascii_uppercase()),
            Color::Black => f.write_char(self.role().glyph()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn piece_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Piece>>(), size_of::<Piece>());
    }

    #[proptest]
    fn piece_has_a_role(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).role(), r);
    }

    #[proptest]
    fn piece_has_a_color(r: Role, c: Color) {
        assert_eq!(Piece::new(r, c).color(), c);
    }

    #[proptest]
    fn decoding_encoded_piece_is_an_identity(p: Piece) {
        assert_eq!(Piece::try_from(p.code()), Ok(p));
    }

    #[proptest]
    fn decoding_piece_fails_for_codes_off_the_wire(#[strategy(13u8..)] n: u8) {
        assert_eq!(Piece::try_from(n), Err(DecodePieceError));
    }

    #[test]
    fn the_empty_square_is_not_a_piece() {
        assert_eq!(Piece::try_from(0), Err(DecodePieceError));
    }

    #[proptest]
    fn white_pieces_print_in_uppercase(r: Role) {
        assert_eq!(
            Piece::new(r, Color::White).to_string(),
            Piece::new(r, Color::Black).to_string().to_uppercase()
        );
    }
}
