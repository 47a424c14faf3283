use crate::chess::Board;
use derive_more::From;

mod materialist;

pub use materialist::*;

/// Trait for types that can evaluate a [`Board`].
#[cfg_attr(test, mockall::automock)]
pub trait Eval {
    /// Evaluates a board.
    ///
    /// Positive values favor White.
    fn eval(&self, board: &Board) -> f64;
}

/// A generic evaluator.
#[derive(Debug, Clone, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Evaluator {
    Materialist(Materialist),
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::Materialist(Materialist::default())
    }
}

impl Eval for Evaluator {
    fn eval(&self, board: &Board) -> f64 {
        match self {
            Evaluator::Materialist(e) => e.eval(board),
        }
    }
}
