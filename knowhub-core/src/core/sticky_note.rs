//! Persistence for the sticky note's text.

use crate::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// File name the sticky note is stored under inside the data directory.
pub const STICKY_NOTE_FILE: &str = "sticky-note.txt";

/// Reads and writes the single sticky-note text blob.
///
/// Clones share one write lock, so saves from several threads never race on
/// the temp file.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl NoteStore {
    /// A store keeping its file inside `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(STICKY_NOTE_FILE),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `content`, creating the data directory as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HubError::Io`] if the directory or file cannot be written.
    pub fn save(&self, content: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers never observe a partially written note.
        let tmp = self.path.with_extension("txt.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Returns the saved text, or an empty string if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HubError::Io`] for any failure other than a missing file.
    pub fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_before_first_save_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path());
        assert_eq!(store.load().unwrap(), "");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("nested").join("data"));
        store.save("remember the milk\n").unwrap();
        assert_eq!(store.load().unwrap(), "remember the milk\n");

        store.save("").unwrap();
        assert_eq!(store.load().unwrap(), "");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path());
        store.save("x").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![STICKY_NOTE_FILE.to_string()]);
    }

    #[test]
    fn test_concurrent_saves_all_succeed() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| store.save(&format!("thread {t} save {i}")).is_err())
                        .count()
                })
            })
            .collect();
        let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(failures, 0);

        let saved = store.load().unwrap();
        assert!(saved.starts_with("thread ") && saved.ends_with(" save 99"));
        assert!(!dir.path().join("sticky-note.txt.tmp").exists());
    }
}
