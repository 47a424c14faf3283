use crate::chess::{Board, Color, Move, Record, Role, Square};
use derive_more::{Display, Error};

/// How a legal move will be carried out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveKind {
    Regular,
    Castling,
}

/// The reason why a move is not legal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalMove {
    #[display(fmt = "zero-length move")]
    ZeroLength,
    #[display(fmt = "no piece to move")]
    NoPiece,
    #[display(fmt = "wrong turn")]
    WrongTurn,
    #[display(fmt = "cannot capture own piece")]
    OwnCapture,
    #[display(fmt = "the {} does not move that way", _0)]
    Shape(#[error(not(source))] Role),
    #[display(fmt = "pawns capture only on the diagonal")]
    PawnCapture,
    #[display(fmt = "cannot jump pieces")]
    Jump,
    #[display(fmt = "the king has already moved")]
    KingMoved,
}

/// Judges whether a move is legal for the side to play.
///
/// Castling is requested by moving the king onto its own rook; it remains
/// available only while no move in `past` ever departed the king's start
/// square. Reads the board and the log, mutates neither.
pub fn validate(
    board: &Board,
    m: Move,
    turn: Color,
    past: &[Record],
) -> Result<MoveKind, IllegalMove> {
    if m.whence() == m.whither() {
        return Err(IllegalMove::ZeroLength);
    }

    let piece = board[m.whence()].ok_or(IllegalMove::NoPiece)?;

    if piece.color() != turn {
        return Err(IllegalMove::WrongTurn);
    }

    let castling = match board[m.whither()] {
        Some(target) if target.color() == piece.color() => {
            match piece.role() == Role::King && target.role() == Role::Rook {
                true => true,
                false => return Err(IllegalMove::OwnCapture),
            }
        }

        _ => false,
    };

    if !castling {
        shape(board, piece.color(), piece.role(), m)?;
    }

    if piece.role() != Role::Knight {
        clearance(board, piece.role(), m)?;
    }

    if castling {
        let start = Square::new(turn.home_row(), 4);

        if past.iter().any(|r| r.whence() == start) {
            return Err(IllegalMove::KingMoved);
        }

        return Ok(MoveKind::Castling);
    }

    Ok(MoveKind::Regular)
}

fn shape(board: &Board, color: Color, role: Role, m: Move) -> Result<(), IllegalMove> {
    let (dr, dc) = (m.row_delta(), m.col_delta());

    match role {
        Role::King if dr.abs() <= 1 && dc.abs() <= 1 => Ok(()),
        Role::Queen if dr == 0 || dc == 0 || dr.abs() == dc.abs() => Ok(()),
        Role::Rook if (dr == 0) != (dc == 0) => Ok(()),
        Role::Bishop if dr.abs() == dc.abs() => Ok(()),
        Role::Knight if matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)) => Ok(()),
        Role::Pawn => pawn(board, color, m),
        role => Err(IllegalMove::Shape(role)),
    }
}

fn pawn(board: &Board, color: Color, m: Move) -> Result<(), IllegalMove> {
    let (dr, dc) = (m.row_delta(), m.col_delta());
    let heading = color.heading();

    if dc == 0 {
        if dr != heading && dr != 2 * heading {
            Err(IllegalMove::Shape(Role::Pawn))
        } else if board[m.whither()].is_some() {
            Err(IllegalMove::PawnCapture)
        } else if dr == 2 * heading && m.whence().row() != color.pawn_row() {
            Err(IllegalMove::Shape(Role::Pawn))
        } else {
            Ok(())
        }
    } else if dc.abs() == 1 && dr == heading {
        match board[m.whither()] {
            Some(_) => Ok(()),
            None => Err(IllegalMove::PawnCapture),
        }
    } else {
        Err(IllegalMove::Shape(Role::Pawn))
    }
}

fn clearance(board: &Board, role: Role, m: Move) -> Result<(), IllegalMove> {
    let (dr, dc) = (m.row_delta(), m.col_delta());

    // every regular shape is aligned; only a stray castling target is not
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return Err(IllegalMove::Shape(role));
    }

    let (sr, sc) = (dr.signum(), dc.signum());

    for i in 1..dr.abs().max(dc.abs()) {
        let sq = m
            .whence()
            .offset(sr * i, sc * i)
            .expect("interpolated squares are on the board");

        if board[sq].is_some() {
            return Err(IllegalMove::Jump);
        }
    }

    Ok(())
}
