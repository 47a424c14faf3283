use crate::chess::{Board, Color};
use crate::eval::Eval;

/// Evaluates boards purely on material, after [Shannon].
///
/// The rook counts for nothing in this scheme.
///
/// [Shannon]: https://www.chessprogramming.org/Claude_Shannon
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Materialist {}

impl Materialist {
    // pawn, rook, knight, bishop, queen, king
    const WEIGHT: [f64; 6] = [1., 0., 3., 3., 9., 200.];
}

impl Eval for Materialist {
    fn eval(&self, board: &Board) -> f64 {
        board
            .pieces()
            .map(|(p, _)| match p.color() {
                Color::White => Self::WEIGHT[p.role().index()],
                Color::Black => -Self::WEIGHT[p.role().index()],
            })
            .sum()
    }
}
