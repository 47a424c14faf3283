use crate::chess::{Color, IllegalMove, Move, Square};
use crate::eval::Evaluator;
use crate::game::{Game, InvalidCursor};
use crate::search::{Minimax, NoLegalMove};
use crate::store::{InvalidSnapshot, Snapshot, Store, StoreError};
use derive_more::{Display, Error, From};
use tracing::{info, instrument};

/// The reason why a request could not be served.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    #[display(fmt = "no game goes by that name")]
    #[from(ignore)]
    NotFound,
    #[display(fmt = "a game by that name already exists")]
    #[from(ignore)]
    Occupied,
    #[display(fmt = "game names are short and alphanumeric")]
    #[from(ignore)]
    BadName,
    #[display(fmt = "it is not your turn")]
    #[from(ignore)]
    OutOfTurn,
    #[display(fmt = "{}", _0)]
    Illegal(IllegalMove),
    #[display(fmt = "{}", _0)]
    Cursor(InvalidCursor),
    #[display(fmt = "{}", _0)]
    Stalled(NoLegalMove),
    #[display(fmt = "{}", _0)]
    Snapshot(InvalidSnapshot),
    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

/// Serves game requests against a [`Store`].
///
/// Knows nothing of the transport; every operation takes and returns plain
/// values and every failure is a structured [`ServiceError`].
#[derive(Debug)]
pub struct Service<S: Store> {
    store: S,
    engine: Minimax<Evaluator>,
}

impl<S: Store> Service<S> {
    /// Constructs [`Service`] with the default engine.
    pub fn new(store: S) -> Self {
        Self::with_engine(store, Minimax::default())
    }

    /// Constructs [`Service`] with the given engine.
    pub fn with_engine(store: S, engine: Minimax<Evaluator>) -> Self {
        Service { store, engine }
    }

    fn vet(name: &str) -> Result<(), ServiceError> {
        let ok = !name.is_empty()
            && name.len() <= 64
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        match ok {
            true => Ok(()),
            false => Err(ServiceError::BadName),
        }
    }

    fn load(&self, name: &str) -> Result<Game, ServiceError> {
        let snapshot = self.store.find(name)?.ok_or(ServiceError::NotFound)?;
        Ok(Game::try_from(&snapshot)?)
    }

    fn save(&self, name: &str, game: &Game) -> Result<Snapshot, ServiceError> {
        let snapshot = Snapshot::from(game);
        self.store.update(name, &snapshot)?;
        Ok(snapshot)
    }

    /// Starts a fresh game under a new name.
    #[instrument(level = "debug", skip(self), err)]
    pub fn create(&self, name: &str) -> Result<Snapshot, ServiceError> {
        Self::vet(name)?;

        if self.store.find(name)?.is_some() {
            return Err(ServiceError::Occupied);
        }

        let snapshot = Snapshot::from(&Game::default());
        self.store.insert(name, &snapshot)?;
        info!(name, "game created");

        Ok(snapshot)
    }

    /// Forgets a game.
    #[instrument(level = "debug", skip(self), err)]
    pub fn delete(&self, name: &str) -> Result<(), ServiceError> {
        self.store.find(name)?.ok_or(ServiceError::NotFound)?;
        Ok(self.store.delete(name)?)
    }

    /// The names of all games, sorted.
    pub fn names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.store.names()?)
    }

    /// The current state of a game.
    pub fn state(&self, name: &str) -> Result<Snapshot, ServiceError> {
        self.store.find(name)?.ok_or(ServiceError::NotFound)
    }

    /// The side to move in a game.
    pub fn turn(&self, name: &str) -> Result<Color, ServiceError> {
        Ok(self.load(name)?.turn())
    }

    /// The legal moves out of a square.
    pub fn moves(&self, name: &str, from: Square) -> Result<Vec<Move>, ServiceError> {
        let game = self.load(name)?;
        Ok(game.moves_from(from).collect())
    }

    /// The legal capturing moves out of a square.
    pub fn captures(&self, name: &str, from: Square) -> Result<Vec<Move>, ServiceError> {
        let game = self.load(name)?;
        Ok(game.captures_from(from).collect())
    }

    /// Applies a player's move.
    ///
    /// Pass the side the player controls to reject out-of-turn moves, or
    /// `None` to play both sides.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play(&self, name: &str, m: Move, side: Option<Color>) -> Result<Snapshot, ServiceError> {
        let mut game = self.load(name)?;

        if side.is_some_and(|c| c != game.turn()) {
            return Err(ServiceError::OutOfTurn);
        }

        game.play(m)?;
        self.save(name, &game)
    }

    /// Lets the engine reply with a move of its own.
    #[instrument(level = "debug", skip(self), err)]
    pub fn respond(&self, name: &str) -> Result<(Move, Snapshot), ServiceError> {
        let mut game = self.load(name)?;
        let m = self.engine.select(&game)?;
        game.play(m)?;

        Ok((m, self.save(name, &game)?))
    }

    /// Moves the history cursor of a game.
    #[instrument(level = "debug", skip(self), err)]
    pub fn seek(&self, name: &str, cursor: usize) -> Result<Snapshot, ServiceError> {
        let mut game = self.load(name)?;
        game.seek(cursor)?;
        self.save(name, &game)
    }
}
