use crate::chess::{validate, Board, Color, IllegalMove, Move, MoveKind};
use crate::chess::{Piece, Record, Role, Square};
use derive_more::{Display, Error};

/// The reason why the history cursor cannot move there.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "history cursor out of range")]
pub struct InvalidCursor;

/// A game of chess: the board, the side to move, and the move log.
///
/// The log carries a cursor; everything before it is reflected on the
/// board, everything at or after it is a future that [`Game::seek`] can
/// reach and [`Game::play`] discards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<Record>,
    cursor: usize,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            turn: Color::White,
            history: Vec::new(),
            cursor: 0,
        }
    }
}

impl Game {
    pub(crate) fn from_parts(
        board: Board,
        turn: Color,
        history: Vec<Record>,
        cursor: usize,
    ) -> Self {
        Game {
            board,
            turn,
            history,
            cursor,
        }
    }

    /// The current [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The move log, including any rewound future.
    #[inline(always)]
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    /// The history cursor.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Judges whether a move is legal in the current position.
    #[inline(always)]
    pub fn validate(&self, m: Move) -> Result<MoveKind, IllegalMove> {
        validate(&self.board, m, self.turn, &self.history[..self.cursor])
    }

    /// An iterator over the legal moves out of a square.
    pub fn moves_from(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        Square::iter()
            .map(move |to| Move(from, to))
            .filter(|&m| self.validate(m).is_ok())
    }

    /// An iterator over all legal moves for the side to play, in row-major
    /// order of their source square.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        Square::iter().flat_map(|from| self.moves_from(from))
    }

    /// An iterator over the legal capturing moves out of a square.
    pub fn captures_from(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        self.moves_from(from)
            .filter(|m| self.board[m.whither()].is_some_and(|p| p.color() != self.turn))
    }

    /// Validates and applies a move, recording it in the log.
    ///
    /// A pawn reaching the far rank becomes a queen. Playing while rewound
    /// discards the log's future before recording.
    pub fn play(&mut self, m: Move) -> Result<(), IllegalMove> {
        let kind = self.validate(m)?;
        let piece = self.board[m.whence()].expect("the source square is occupied");

        let record = match kind {
            MoveKind::Castling => Record::new(m, piece, None, true, false),

            MoveKind::Regular => {
                let promotion = piece.role() == Role::Pawn
                    && m.whither().row() == piece.color().promotion_row();

                let moved = match promotion {
                    true => Piece::new(Role::Queen, piece.color()),
                    false => piece,
                };

                Record::new(m, moved, self.board[m.whither()], false, promotion)
            }
        };

        self.history.truncate(self.cursor);
        self.advance(&record);
        self.history.push(record);
        self.cursor += 1;

        Ok(())
    }

    /// Moves the history cursor, replaying or taking back recorded moves
    /// one at a time until the board matches.
    pub fn seek(&mut self, cursor: usize) -> Result<(), InvalidCursor> {
        if cursor > self.history.len() {
            return Err(InvalidCursor);
        }

        while self.cursor < cursor {
            let r = self.history[self.cursor];
            self.advance(&r);
            self.cursor += 1;
        }

        while self.cursor > cursor {
            let r = self.history[self.cursor - 1];
            self.retract(&r);
            self.cursor -= 1;
        }

        Ok(())
    }

    /// Where the king and the rook land when castling toward the rook the
    /// record targets.
    fn posts(r: &Record) -> (Square, Square) {
        let row = r.whence().row();

        match r.whither().col() == 7 {
            true => (Square::new(row, 6), Square::new(row, 5)),
            false => (Square::new(row, 2), Square::new(row, 3)),
        }
    }

    fn advance(&mut self, r: &Record) {
        if r.is_castling() {
            let (king, rook) = Self::posts(r);
            self.board.set(r.whence(), None);
            self.board.set(r.whither(), None);
            self.board.set(king, Some(r.piece()));
            self.board
                .set(rook, Some(Piece::new(Role::Rook, r.piece().color())));
        } else {
            self.board.set(r.whence(), None);
            self.board.set(r.whither(), Some(r.piece()));
        }

        self.turn = !r.piece().color();
    }

    fn retract(&mut self, r: &Record) {
        let color = r.piece().color();

        if r.is_castling() {
            let (king, rook) = Self::posts(r);
            self.board.set(king, None);
            self.board.set(rook, None);
            self.board.set(r.whence(), Some(r.piece()));
            self.board.set(r.whither(), Some(Piece::new(Role::Rook, color)));
        } else {
            let piece = match r.is_promotion() {
                true => Piece::new(Role::Pawn, color),
                false => r.piece(),
            };

            self.board.set(r.whence(), Some(piece));
            self.board.set(r.whither(), r.capture());
        }

        self.turn = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn m(from: (u8, u8), to: (u8, u8)) -> Move {
        Move(Square::new(from.0, from.1), Square::new(to.0, to.1))
    }

    #[test]
    fn a_fresh_game_awaits_whites_first_move() {
        let g = Game::default();
        assert_eq!(g.turn(), Color::White);
        assert_eq!(g.cursor(), 0);
        assert!(g.history().is_empty());
    }

    #[test]
    fn the_initial_position_has_exactly_twenty_moves() {
        assert_eq!(Game::default().moves().count(), 20);
    }

    #[test]
    fn playing_flips_the_turn_and_grows_the_log() {
        let mut g = Game::default();
        g.play(m((6, 4), (4, 4))).unwrap();

        assert_eq!(g.turn(), Color::Black);
        assert_eq!(g.cursor(), 1);
        assert_eq!(g.history().len(), 1);
    }

    #[test]
    fn playing_an_illegal_move_changes_nothing() {
        let mut g = Game::default();
        let before = g.clone();

        assert_eq!(
            g.play(m((7, 0), (5, 0))),
            Err(IllegalMove::Jump)
        );

        assert_eq!(g, before);
    }

    #[test]
    fn undoing_a_move_restores_the_board_and_the_turn() {
        let mut g = Game::default();
        let before = g.clone();

        g.play(m((6, 4), (4, 4))).unwrap();
        g.seek(0).unwrap();

        assert_eq!(g.board(), before.board());
        assert_eq!(g.turn(), before.turn());
    }

    #[test]
    fn undoing_a_capture_restores_the_victim() {
        let mut g = Game::default();
        g.play(m((6, 4), (4, 4))).unwrap();
        g.play(m((1, 3), (3, 3))).unwrap();
        g.play(m((4, 4), (3, 3))).unwrap();

        let after = *g.board();
        g.seek(2).unwrap();

        assert_eq!(g.board()[Square::new(3, 3)], Some(Piece::BlackPawn));
        assert_eq!(g.board()[Square::new(4, 4)], Some(Piece::WhitePawn));

        g.seek(3).unwrap();
        assert_eq!(*g.board(), after);
    }

    #[test]
    fn seeking_back_and_forth_is_an_identity() {
        let mut g = Game::default();
        g.play(m((6, 4), (4, 4))).unwrap();
        g.play(m((1, 4), (3, 4))).unwrap();
        g.play(m((7, 6), (5, 5))).unwrap();

        let before = g.clone();
        g.seek(0).unwrap();
        g.seek(3).unwrap();

        assert_eq!(g, before);
    }

    #[test]
    fn a_pawn_reaching_the_far_rank_becomes_a_queen() {
        let mut b = Board::empty();
        b.set(Square::new(1, 0), Some(Piece::WhitePawn));
        let mut g = Game::from_parts(b, Color::White, vec![], 0);

        g.play(m((1, 0), (0, 0))).unwrap();
        assert_eq!(g.board()[Square::new(0, 0)], Some(Piece::WhiteQueen));

        g.seek(0).unwrap();
        assert_eq!(g.board()[Square::new(1, 0)], Some(Piece::WhitePawn));
        assert_eq!(g.board()[Square::new(0, 0)], None);
    }

    #[test]
    fn castling_kingside_posts_the_king_and_rook_on_their_columns() {
        let mut b = Board::empty();
        b.set(Square::new(7, 4), Some(Piece::WhiteKing));
        b.set(Square::new(7, 7), Some(Piece::WhiteRook));
        let mut g = Game::from_parts(b, Color::White, vec![], 0);

        g.play(m((7, 4), (7, 7))).unwrap();

        assert_eq!(g.board()[Square::new(7, 6)], Some(Piece::WhiteKing));
        assert_eq!(g.board()[Square::new(7, 5)], Some(Piece::WhiteRook));
        assert_eq!(g.board()[Square::new(7, 4)], None);
        assert_eq!(g.board()[Square::new(7, 7)], None);

        g.seek(0).unwrap();
        assert_eq!(g.board(), &b);
        assert_eq!(g.turn(), Color::White);
    }

    #[test]
    fn castling_queenside_posts_the_king_and_rook_on_their_columns() {
        let mut b = Board::empty();
        b.set(Square::new(0, 4), Some(Piece::BlackKing));
        b.set(Square::new(0, 0), Some(Piece::BlackRook));
        let mut g = Game::from_parts(b, Color::Black, vec![], 0);

        g.play(m((0, 4), (0, 0))).unwrap();

        assert_eq!(g.board()[Square::new(0, 2)], Some(Piece::BlackKing));
        assert_eq!(g.board()[Square::new(0, 3)], Some(Piece::BlackRook));

        g.seek(0).unwrap();
        assert_eq!(g.board(), &b);
    }

    #[test]
    fn playing_while_rewound_discards_the_future() {
        let mut g = Game::default();
        g.play(m((6, 4), (4, 4))).unwrap();
        g.play(m((1, 4), (3, 4))).unwrap();

        g.seek(0).unwrap();
        g.play(m((6, 3), (4, 3))).unwrap();

        assert_eq!(g.history().len(), 1);
        assert_eq!(g.cursor(), 1);
        assert_eq!(g.seek(2), Err(InvalidCursor));
    }

    #[test]
    fn the_discarded_future_no_longer_binds_castling() {
        let mut b = Board::empty();
        b.set(Square::new(7, 4), Some(Piece::WhiteKing));
        b.set(Square::new(7, 7), Some(Piece::WhiteRook));
        b.set(Square::new(1, 0), Some(Piece::BlackPawn));
        let mut g = Game::from_parts(b, Color::White, vec![], 0);

        g.play(m((7, 4), (6, 4))).unwrap();
        g.seek(0).unwrap();

        assert_eq!(g.validate(m((7, 4), (7, 7))), Ok(MoveKind::Castling));
    }

    #[proptest]
    fn seeking_nowhere_is_a_no_op(#[strategy(0usize..4)] n: usize) {
        let mut g = Game::default();

        for _ in 0..n {
            let m = g.moves().next().unwrap();
            g.play(m).unwrap();
        }

        let before = g.clone();
        g.seek(g.cursor()).unwrap();
        assert_eq!(g, before);
    }

    #[proptest]
    fn seeking_past_the_end_of_history_fails(#[strategy(1usize..)] n: usize) {
        let mut g = Game::default();
        assert_eq!(g.seek(n), Err(InvalidCursor));
    }

    #[proptest]
    fn undoing_any_opening_move_restores_the_initial_position(
        #[strategy(0usize..20)] n: usize,
    ) {
        let mut g = Game::default();
        let m = g.moves().nth(n).unwrap();

        g.play(m).unwrap();
        g.seek(0).unwrap();

        assert_eq!(g.board(), Game::default().board());
        assert_eq!(g.turn(), Color::White);
    }
}
