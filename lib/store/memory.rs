use crate::store::{Snapshot, Store, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A [`Store`] that lives and dies with the process.
#[derive(Debug, Default)]
pub struct InMemory {
    games: Mutex<HashMap<String, Snapshot>>,
}

impl InMemory {
    fn games(&self) -> MutexGuard<'_, HashMap<String, Snapshot>> {
        self.games.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for InMemory {
    fn find(&self, name: &str) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.games().get(name).cloned())
    }

    fn insert(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.games().insert(name.to_string(), snapshot.clone());
        Ok(())
    }

    fn update(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.insert(name, snapshot)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.games().remove(name);
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::from_iter(self.games().keys().cloned());
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    fn snapshot() -> Snapshot {
        Snapshot::from(&Game::default())
    }

    #[test]
    fn find_returns_what_insert_saved() {
        let store = InMemory::default();
        assert!(store.find("morphy").unwrap().is_none());

        store.insert("morphy", &snapshot()).unwrap();
        assert_eq!(store.find("morphy").unwrap(), Some(snapshot()));
    }

    #[test]
    fn update_overwrites_a_saved_game() {
        let store = InMemory::default();
        store.insert("anderssen", &snapshot()).unwrap();

        let mut s = snapshot();
        s.turn = 1;
        store.update("anderssen", &s).unwrap();

        assert_eq!(store.find("anderssen").unwrap(), Some(s));
    }

    #[test]
    fn delete_forgets_a_game_and_tolerates_unknown_names() {
        let store = InMemory::default();
        store.insert("steinitz", &snapshot()).unwrap();

        store.delete("steinitz").unwrap();
        store.delete("steinitz").unwrap();

        assert!(store.find("steinitz").unwrap().is_none());
    }

    #[test]
    fn names_lists_saved_games_in_order() {
        let store = InMemory::default();
        store.insert("lasker", &snapshot()).unwrap();
        store.insert("capablanca", &snapshot()).unwrap();

        assert_eq!(store.names().unwrap(), vec!["capablanca", "lasker"]);
    }
}
