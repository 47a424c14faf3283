use crate::chess::{Board, Color, DecodePieceError, InvalidSquare, Move, Piece, Record, Square};
use crate::game::Game;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::io;

mod directory;
mod memory;

pub use directory::*;
pub use memory::*;

/// A structural encoding of a [`Game`], fit for storage and transfer.
///
/// The board is the 8×8 matrix of wire codes the front end renders; the
/// rest is everything needed to reconstruct the game exactly.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: [[u8; 8]; 8],
    pub turn: u8,
    pub history: Vec<Entry>,
    pub cursor: usize,
}

/// One logged move in a [`Snapshot`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub from: [u8; 2],
    pub to: [u8; 2],
    pub piece: u8,
    pub capture: u8,
    pub castling: bool,
    pub promotion: bool,
}

impl From<&Game> for Snapshot {
    fn from(game: &Game) -> Self {
        let mut board = [[0; 8]; 8];

        for (p, sq) in game.board().pieces() {
            board[sq.row() as usize][sq.col() as usize] = p.code();
        }

        Snapshot {
            board,
            turn: game.turn() as u8,
            cursor: game.cursor(),
            history: game
                .history()
                .iter()
                .map(|r| Entry {
                    from: [r.whence().row(), r.whence().col()],
                    to: [r.whither().row(), r.whither().col()],
                    piece: r.piece().code(),
                    capture: r.capture().map_or(0, |p| p.code()),
                    castling: r.is_castling(),
                    promotion: r.is_promotion(),
                })
                .collect(),
        }
    }
}

/// The reason why a [`Snapshot`] does not describe a game.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum InvalidSnapshot {
    #[display(fmt = "{}", _0)]
    Piece(DecodePieceError),
    #[display(fmt = "{}", _0)]
    Square(InvalidSquare),
    #[display(fmt = "not a valid side to move")]
    #[from(ignore)]
    Turn,
    #[display(fmt = "cursor beyond the end of history")]
    #[from(ignore)]
    Cursor,
}

impl TryFrom<&Snapshot> for Game {
    type Error = InvalidSnapshot;

    fn try_from(s: &Snapshot) -> Result<Self, Self::Error> {
        let mut board = Board::empty();

        for (row, codes) in s.board.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                if code != 0 {
                    let sq = Square::new(row as u8, col as u8);
                    board.set(sq, Some(Piece::try_from(code)?));
                }
            }
        }

        let turn = match s.turn {
            0 => Color::White,
            1 => Color::Black,
            _ => return Err(InvalidSnapshot::Turn),
        };

        let mut history = Vec::with_capacity(s.history.len());

        for e in &s.history {
            let from = Square::try_from((e.from[0], e.from[1]))?;
            let to = Square::try_from((e.to[0], e.to[1]))?;
            let piece = Piece::try_from(e.piece)?;

            let capture = match e.capture {
                0 => None,
                code => Some(Piece::try_from(code)?),
            };

            history.push(Record::new(
                Move(from, to),
                piece,
                capture,
                e.castling,
                e.promotion,
            ));
        }

        if s.cursor > history.len() {
            return Err(InvalidSnapshot::Cursor);
        }

        Ok(Game::from_parts(board, turn, history, s.cursor))
    }
}

/// The reason why the store failed.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display(fmt = "{}", _0)]
    Io(io::Error),
    #[display(fmt = "{}", _0)]
    Codec(serde_json::Error),
}

/// A catalogue of games saved by name.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    /// Looks up a game.
    fn find(&self, name: &str) -> Result<Option<Snapshot>, StoreError>;

    /// Saves a game under a new name.
    fn insert(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Overwrites a saved game.
    fn update(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Forgets a game; forgetting an unknown name is a no-op.
    fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// The names of all saved games, sorted.
    fn names(&self) -> Result<Vec<String>, StoreError>;
}

/// A generic game store.
#[derive(Debug, From)]
pub enum Storage {
    InMemory(InMemory),
    Directory(Directory),
}

impl Store for Storage {
    fn find(&self, name: &str) -> Result<Option<Snapshot>, StoreError> {
        match self {
            Storage::InMemory(s) => s.find(name),
            Storage::Directory(s) => s.find(name),
        }
    }

    fn insert(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        match self {
            Storage::InMemory(s) => s.insert(name, snapshot),
            Storage::Directory(s) => s.insert(name, snapshot),
        }
    }

    fn update(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        match self {
            Storage::InMemory(s) => s.update(name, snapshot),
            Storage::Directory(s) => s.update(name, snapshot),
        }
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        match self {
            Storage::InMemory(s) => s.delete(name),
            Storage::Directory(s) => s.delete(name),
        }
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        match self {
            Storage::InMemory(s) => s.names(),
            Storage::Directory(s) => s.names(),
        }
    }
}
