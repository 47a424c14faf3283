use crate::chess::{Color, Move};
use crate::eval::Eval;
use crate::game::Game;
use derive_more::{Display, Error};
use rand::seq::IndexedRandom;
use tracing::debug;

/// The reason why no move could be selected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "no legal move in this position")]
pub struct NoLegalMove;

/// An implementation of [minimax] with alpha-beta pruning.
///
/// White maximizes the evaluation, Black minimizes it. Every node passes
/// its running best to its children as their bound and stops examining
/// siblings once its own best is past that bound from the parent's
/// perspective. Ties at the root are broken uniformly at random.
///
/// [minimax]: https://www.chessprogramming.org/Minimax
#[derive(Debug, Clone)]
pub struct Minimax<E: Eval> {
    engine: E,
    depth: u8,
}

impl<E: Eval + Default> Default for Minimax<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: Eval> Minimax<E> {
    /// The default search horizon, in plies.
    pub const DEPTH: u8 = 4;

    /// Constructs [`Minimax`] with the default search horizon.
    pub fn new(engine: E) -> Self {
        Self::with_depth(engine, Self::DEPTH)
    }

    /// Constructs [`Minimax`] that looks `depth` plies ahead.
    pub fn with_depth(engine: E, depth: u8) -> Self {
        Minimax { engine, depth }
    }

    /// The value of a position reached `depth - 1` moves into the search,
    /// given the parent's running best as `bound`.
    fn minimax(&self, game: &Game, bound: f64, depth: u8) -> f64 {
        if depth >= self.depth {
            return self.engine.eval(game.board());
        }

        let maximizing = game.turn() == Color::White;

        let mut best = match maximizing {
            true => f64::NEG_INFINITY,
            false => f64::INFINITY,
        };

        for m in game.moves() {
            let mut next = game.clone();
            next.play(m).expect("enumerated moves are legal");

            let value = self.minimax(&next, best, depth + 1);

            best = match maximizing {
                true => best.max(value),
                false => best.min(value),
            };

            // the parent will never choose a line this good for us
            if maximizing && best > bound {
                break;
            } else if !maximizing && best < bound {
                break;
            }
        }

        best
    }

    /// Selects a strongest [`Move`] for the side to play, uniformly at
    /// random among those judged equally best.
    ///
    /// The given game is never mutated; every explored branch plays out on
    /// its own copy.
    pub fn select(&self, game: &Game) -> Result<Move, NoLegalMove> {
        let maximizing = game.turn() == Color::White;

        let mut best = match maximizing {
            true => f64::NEG_INFINITY,
            false => f64::INFINITY,
        };

        let mut picks = Vec::new();

        for m in game.moves() {
            let mut next = game.clone();
            next.play(m).expect("enumerated moves are legal");

            let value = self.minimax(&next, best, 2);

            if maximizing && value > best || !maximizing && value < best {
                best = value;
                picks.clear();
                picks.push(m);
            } else if value == best {
                picks.push(m);
            }
        }

        let m = *picks.choose(&mut rand::rng()).ok_or(NoLegalMove)?;
        debug!(%m, score = best, "move selected");

        Ok(m)
    }
}
