//! Best-score persistence
//!
//! The store holds one integer. Reading it may fail (missing or corrupt file);
//! callers that only need a number use [`ScoreStore::best`], which treats any
//! failure as zero.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why the stored best score could not be read or written
#[derive(Debug)]
pub enum ScoreStoreError {
    /// Nothing has been saved yet
    Missing,
    /// The store exists but could not be read or written
    Io(io::Error),
    /// The store does not hold a non-negative integer
    Corrupt(serde_json::Error),
}

impl fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no high score saved yet"),
            Self::Io(e) => write!(f, "high score I/O failed: {e}"),
            Self::Corrupt(e) => write!(f, "high score unreadable: {e}"),
        }
    }
}

impl std::error::Error for ScoreStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Missing => None,
            Self::Io(e) => Some(e),
            Self::Corrupt(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScoreStoreError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            Self::Missing
        } else {
            Self::Io(e)
        }
    }
}

impl From<serde_json::Error> for ScoreStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e)
    }
}

/// A single persisted best score
pub trait ScoreStore {
    /// Read the stored best score
    fn load(&self) -> Result<u64, ScoreStoreError>;

    /// Overwrite the stored best score
    fn write(&mut self, score: u64) -> Result<(), ScoreStoreError>;

    /// Stored best score, zero when it cannot be read
    fn best(&self) -> u64 {
        match self.load() {
            Ok(score) => score,
            Err(ScoreStoreError::Missing) => 0,
            Err(e) => {
                log::warn!("{e}; treating high score as 0");
                0
            }
        }
    }

    /// Record a finished round: writes only when `score` beats the stored value
    ///
    /// Returns whether the stored value changed.
    fn save(&mut self, score: u64) -> Result<bool, ScoreStoreError> {
        if score <= self.best() {
            return Ok(false);
        }
        self.write(score)?;
        log::info!("New high score: {score}");
        Ok(true)
    }
}

/// Best score kept as a plain integer in a text file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, ScoreStoreError> {
        let text = std::fs::read_to_string(&self.path)?;
        // A bare JSON number is the same text as the plain integer format
        Ok(serde_json::from_str(text.trim())?)
    }

    fn write(&mut self, score: u64) -> Result<(), ScoreStoreError> {
        let text = serde_json::to_string(&score)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-memory store (no persistence), counting the rounds submitted to it
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Option<u64>,
    /// Number of `save` calls
    pub saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(score: u64) -> Self {
        Self {
            best: Some(score),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, ScoreStoreError> {
        self.best.ok_or(ScoreStoreError::Missing)
    }

    fn write(&mut self, score: u64) -> Result<(), ScoreStoreError> {
        self.best = Some(score);
        Ok(())
    }

    fn save(&mut self, score: u64) -> Result<bool, ScoreStoreError> {
        self.saves += 1;
        if score <= self.best() {
            return Ok(false);
        }
        self.write(score)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileScoreStore {
        let path = std::env::temp_dir().join(format!(
            "astrocrash-{}-{}.txt",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        FileScoreStore::new(path)
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = temp_store("missing");
        assert!(matches!(store.load(), Err(ScoreStoreError::Missing)));
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "not a number").unwrap();
        assert!(matches!(store.load(), Err(ScoreStoreError::Corrupt(_))));
        assert_eq!(store.best(), 0);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_reads_plain_integer_with_newline() {
        let store = temp_store("plain");
        std::fs::write(store.path(), "120\n").unwrap();
        assert_eq!(store.load().unwrap(), 120);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_lower_score_keeps_stored_value() {
        let mut store = temp_store("lower");
        store.write(50).unwrap();

        assert!(!store.save(30).unwrap());
        assert_eq!(store.best(), 50);

        assert!(store.save(80).unwrap());
        assert_eq!(store.best(), 80);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "80");
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_equal_score_is_not_written() {
        let mut store = MemoryScoreStore::with_best(40);
        assert!(!store.save(40).unwrap());
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_first_score_on_empty_store() {
        let mut store = MemoryScoreStore::new();
        assert!(store.save(10).unwrap());
        assert_eq!(store.best(), 10);
        // Zero never beats the empty store
        let mut empty = MemoryScoreStore::new();
        assert!(!empty.save(0).unwrap());
    }

    #[test]
    fn test_write_failure_surfaces_as_error() {
        // A directory cannot be written as a file
        let mut store = FileScoreStore::new(std::env::temp_dir());
        assert!(store.save(10).is_err());
    }
}
