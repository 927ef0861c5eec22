use chrono::Utc;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{Idea, Metadata, StateData};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no state document at {0} (run `idea-forge generate` first)")]
    StateMissing(PathBuf),
}

/// File-backed state document: the ordered idea collection plus run
/// metadata, loaded once per invocation and saved atomically.
pub struct Storage {
    storage_path: PathBuf,
    data: StateData,
}

impl Storage {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().expect("couldn't find home dir");
        home.join(".idea-forge").join("ideas.json")
    }

    pub fn at(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            data: StateData::empty(Utc::now().to_rfc3339()),
        }
    }

    /// Load the state document if it exists; otherwise keep the freshly
    /// seeded empty one.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        if self.storage_path.exists() {
            let mut file = File::open(&self.storage_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            self.data = serde_json::from_str(&contents)?;
        }
        Ok(())
    }

    /// Load an existing state document, failing before any mutation if it
    /// is absent. Used by the commands that evolve existing ideas.
    pub fn open_required(storage_path: PathBuf) -> Result<Self, StorageError> {
        if !storage_path.exists() {
            return Err(StorageError::StateMissing(storage_path));
        }
        let mut storage = Self::at(storage_path);
        storage.initialize()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.data.ideas
    }

    pub fn ideas_mut(&mut self) -> &mut Vec<Idea> {
        &mut self.data.ideas
    }

    pub fn metadata(&self) -> &Metadata {
        &self.data.metadata
    }

    pub fn push_idea(&mut self, idea: Idea) {
        self.data.ideas.push(idea);
    }

    /// One generate invocation happened, regardless of idea count.
    pub fn record_generate_run(&mut self) {
        self.data.metadata.total_runs += 1;
        self.data.metadata.last_generate = Some(Utc::now().to_rfc3339());
    }

    /// One iterate invocation processed `processed` ideas.
    pub fn record_iterate_run(&mut self, processed: usize) {
        let total = self.data.metadata.total_iterations.unwrap_or(0);
        self.data.metadata.total_iterations = Some(total + processed as u64);
        self.data.metadata.last_iterate = Some(Utc::now().to_rfc3339());
    }

    pub fn record_scaffold_run(&mut self) {
        self.data.metadata.last_scaffold = Some(Utc::now().to_rfc3339());
    }

    /// Persist the state document with a temporary file and an atomic
    /// rename to avoid partial writes.
    pub fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.storage_path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&self.data)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.storage_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::{fallback_content, new_idea};
    use crate::engine::iterate::iterate_idea;
    use crate::engine::registry::Registry;

    #[test]
    fn initialize_seeds_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::at(dir.path().join("ideas.json"));
        storage.initialize().unwrap();
        assert!(storage.ideas().is_empty());
        assert_eq!(storage.metadata().total_runs, 0);
        assert!(storage.metadata().total_iterations.is_none());
    }

    #[test]
    fn open_required_fails_when_document_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let result = Storage::open_required(dir.path().join("ideas.json"));
        assert!(matches!(result, Err(StorageError::StateMissing(_))));
    }

    #[test]
    fn state_round_trips_losslessly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideas.json");
        let registry = Registry::builtin();

        let mut storage = Storage::at(path.clone());
        storage.initialize().unwrap();
        let mut idea = new_idea(fallback_content(&registry, 0), 1);
        iterate_idea(&registry, None, &mut idea).unwrap();
        storage.push_idea(idea);
        storage.record_generate_run();
        storage.record_iterate_run(1);
        storage.save().unwrap();

        let reloaded = Storage::open_required(path).unwrap();
        let original = serde_json::to_value(&storage.data).unwrap();
        let round_tripped = serde_json::to_value(&reloaded.data).unwrap();
        assert_eq!(original, round_tripped);
        assert_eq!(reloaded.metadata().total_runs, 1);
        assert_eq!(reloaded.metadata().total_iterations, Some(1));
        assert_eq!(reloaded.ideas()[0].history.len(), 1);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("ideas.json");
        let mut storage = Storage::at(path.clone());
        storage.initialize().unwrap();
        storage.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn counters_accumulate_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::at(dir.path().join("ideas.json"));
        storage.initialize().unwrap();
        storage.record_generate_run();
        storage.record_generate_run();
        storage.record_iterate_run(3);
        storage.record_iterate_run(2);
        assert_eq!(storage.metadata().total_runs, 2);
        assert_eq!(storage.metadata().total_iterations, Some(5));
    }
}
