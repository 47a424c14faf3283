use crate::store::{Snapshot, Store, StoreError};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::fs;

/// A [`Store`] that keeps every game as a JSON document under a directory.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Opens the store rooted at `root`, creating the directory if missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Directory { root })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl Store for Directory {
    fn find(&self, name: &str) -> Result<Option<Snapshot>, StoreError> {
        match fs::read(self.path(name)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        Ok(fs::write(self.path(name), serde_json::to_vec(snapshot)?)?)
    }

    fn update(&self, name: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.insert(name, snapshot)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(name)) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            r => Ok(r?),
        }
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
