use derive_more::Display;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
///
/// Roles are ordered the way the wire format numbers them.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    #[display(fmt = "pawn")]
    Pawn,
    #[display(fmt = "rook")]
    Rook,
    #[display(fmt = "knight")]
    Knight,
    #[display(fmt = "bishop")]
    Bishop,
    #[display(fmt = "queen")]
    Queen,
    #[display(fmt = "king")]
    King,
}

impl Role {
    const ROLES: [Self; 6] = [
        Role::Pawn,
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Queen,
        Role::King,
    ];

    /// An iterator over all roles in wire order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> {
        Self::ROLES.into_iter()
    }

    /// This role's index in wire order.
    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline(always)]
    pub(crate) fn from_index(i: u8) -> Self {
        Self::ROLES[i as usize]
    }

    /// This role's letter in algebraic notation.
    #[inline(always)]
    pub fn glyph(&self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Rook => 'r',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }
}
